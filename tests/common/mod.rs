/*!
 * Common test utilities for the ectran test suite
 */

use ectran::record::TransactionRecord;

// Re-export the mock engines module
pub mod mock_engines;

/// Create a fully-populated record whose field values encode the given index,
/// so order preservation is observable in tests
pub fn make_record(index: usize) -> TransactionRecord {
    TransactionRecord {
        survey_number: Some(format!("SN-{index}")),
        document_number: Some(format!("DOC-{index}")),
        document_year: Some("2021".to_string()),
        registration_date: Some(format!("2021-01-{:02}", (index % 28) + 1)),
        execution_date: Some(format!("2021-01-{:02}", (index % 28) + 1)),
        transaction_type: Some("விற்பனை".to_string()),
        executant: Some(format!("executant {index}")),
        claimant: Some(format!("claimant {index}")),
        plot_number: Some(format!("{index}A")),
        property_description: Some(format!("plot number {index} description")),
        property_value: Some(format!("{}", 100_000 + index)),
    }
}

/// Create an ordered sequence of records of the given length
pub fn make_records(count: usize) -> Vec<TransactionRecord> {
    (0..count).map(make_record).collect()
}
