/*!
 * Transaction record model and strict schema validation.
 *
 * A record is the unit of data throughout the pipeline: exactly eleven
 * named fields, each either a string or null. The validator enforces that
 * contract over raw JSON values so that every violation can be reported
 * at once, before anything is deserialized into the typed struct.
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::PipelineError;

/// The eleven wire-format field names of a record, in canonical order
pub const RECORD_FIELDS: [&str; 11] = [
    "surveyNumber",
    "documentNumber",
    "documentYear",
    "registrationDate",
    "executionDate",
    "transactionType",
    "executant",
    "claimant",
    "plotNumber",
    "propertyDescription",
    "propertyValue",
];

/// Fields containing human-readable text that the translation stage may rewrite.
/// Every other field must pass through the pipeline byte-identical.
pub const TRANSLATABLE_FIELDS: [&str; 5] = [
    "executant",
    "claimant",
    "transactionType",
    "plotNumber",
    "propertyDescription",
];

/// A single Encumbrance Certificate transaction.
///
/// All fields are nullable strings; numeric and date values are carried
/// as strings exactly as the model produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransactionRecord {
    /// Survey number of the property
    pub survey_number: Option<String>,

    /// Registered document number
    pub document_number: Option<String>,

    /// Year of the document
    pub document_year: Option<String>,

    /// Date of registration
    pub registration_date: Option<String>,

    /// Date of execution
    pub execution_date: Option<String>,

    /// Nature of the transaction (sale, mortgage, gift, ...)
    pub transaction_type: Option<String>,

    /// Executing parties (sellers), combined
    pub executant: Option<String>,

    /// Claiming parties (buyers), combined
    pub claimant: Option<String>,

    /// Plot number within the survey
    pub plot_number: Option<String>,

    /// Free-text description of the property
    pub property_description: Option<String>,

    /// Declared value of the property
    pub property_value: Option<String>,
}

impl TransactionRecord {
    /// Create an all-null record
    pub fn empty() -> Self {
        Self {
            survey_number: None,
            document_number: None,
            document_year: None,
            registration_date: None,
            execution_date: None,
            transaction_type: None,
            executant: None,
            claimant: None,
            plot_number: None,
            property_description: None,
            property_value: None,
        }
    }
}

/// Check one JSON value against the record contract and return every
/// violation found, prefixed with the record's position in its sequence.
fn record_violations(index: usize, value: &Value) -> Vec<String> {
    let mut violations = Vec::new();

    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            violations.push(format!("record {index}: expected a JSON object"));
            return violations;
        }
    };

    for field in RECORD_FIELDS {
        match obj.get(field) {
            None => violations.push(format!("record {index}: missing required field \"{field}\"")),
            Some(Value::String(_)) | Some(Value::Null) => {}
            Some(other) => violations.push(format!(
                "record {index}: field \"{field}\" must be a string or null, got {other}"
            )),
        }
    }

    for key in obj.keys() {
        if !RECORD_FIELDS.contains(&key.as_str()) {
            violations.push(format!("record {index}: unexpected field \"{key}\""));
        }
    }

    violations
}

/// Validate a sequence of JSON values against the strict record contract.
///
/// All violations across all records are aggregated into a single
/// [`PipelineError::Schema`] message. An empty sequence is valid.
pub fn validate_records(items: &[Value]) -> Result<(), PipelineError> {
    let violations: Vec<String> = items
        .iter()
        .enumerate()
        .flat_map(|(index, item)| record_violations(index, item))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::Schema(violations.join("; ")))
    }
}
