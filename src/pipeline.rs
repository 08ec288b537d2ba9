/*!
 * Full document pipeline: structured extraction followed by batch
 * translation.
 */

use log::info;
use std::sync::Arc;

use crate::client::Completion;
use crate::errors::PipelineError;
use crate::extraction::extract_transactions;
use crate::record::TransactionRecord;
use crate::translation::BatchTranslator;

/// Process one document's raw text into ordered, translated, schema-valid
/// transaction records.
///
/// Either stage failing aborts the whole invocation; no partial output is
/// ever produced for a document.
pub async fn process_document(
    engine: Arc<dyn Completion>,
    raw_text: &str,
    max_concurrent_batches: Option<usize>,
) -> Result<Vec<TransactionRecord>, PipelineError> {
    let records = extract_transactions(engine.as_ref(), raw_text).await?;

    if records.is_empty() {
        info!("No transactions found; skipping translation");
        return Ok(records);
    }

    let translator =
        BatchTranslator::new(engine).with_concurrency_cap(max_concurrent_batches);
    translator.translate(&records).await
}
