/*!
 * Batch translation processing.
 *
 * This module partitions a record sequence into contiguous batches using
 * an adaptive size policy, dispatches one completion request per batch
 * concurrently, and reassembles the results by original batch index so
 * record order is preserved deterministically regardless of completion
 * order. The whole operation either fully succeeds or fully fails; no
 * partially translated sequence is ever returned.
 */

use futures::stream::{self, StreamExt};
use log::{debug, error, info};
use serde_json::Value;
use std::sync::Arc;

use crate::client::{Completion, GenerationOptions};
use crate::errors::PipelineError;
use crate::json_extract::extract_json;
use crate::prompts::TRANSLATION_SYSTEM_PROMPT;
use crate::providers::openai::ChatMessage;
use crate::record::{validate_records, TransactionRecord, RECORD_FIELDS};

/// Inputs at or below this count go out as a single batch
const MIN_BATCH_SIZE: usize = 5;

/// Upper bound on batch size for large inputs
const MAX_BATCH_SIZE: usize = 20;

/// Preferred batch size for mid-sized inputs
const DEFAULT_BATCH_SIZE: usize = 10;

/// Near-deterministic sampling for structured output
const TRANSLATION_TEMPERATURE: f32 = 0.1;

/// Adaptive batch size as a deterministic function of the input length.
///
/// Bounds per-request payload while amortizing request overhead: small
/// inputs avoid unnecessary batch padding, large inputs get a predictable,
/// bounded request count.
pub fn optimal_batch_size(total_records: usize) -> usize {
    if total_records <= MIN_BATCH_SIZE {
        total_records
    } else if total_records <= 20 {
        DEFAULT_BATCH_SIZE.min(total_records)
    } else if total_records <= 50 {
        15
    } else {
        MAX_BATCH_SIZE
    }
}

/// Batch translator for translating record sequences in concurrent batches
pub struct BatchTranslator {
    /// The completion engine to use
    engine: Arc<dyn Completion>,

    /// Maximum number of batches in flight at once; None means all at once
    max_concurrent_batches: Option<usize>,
}

impl BatchTranslator {
    /// Create a new batch translator with uncapped concurrent dispatch
    pub fn new(engine: Arc<dyn Completion>) -> Self {
        Self { engine, max_concurrent_batches: None }
    }

    /// Limit the number of batches in flight at once
    pub fn with_concurrency_cap(mut self, cap: Option<usize>) -> Self {
        self.max_concurrent_batches = cap;
        self
    }

    /// Translate the free-text fields of an ordered record sequence.
    ///
    /// Record count and order are preserved exactly; the non-translatable
    /// fields of every record pass through byte-identical, nulls included.
    /// An empty input short-circuits to an empty output with no call issued.
    pub async fn translate(
        &self,
        records: &[TransactionRecord],
    ) -> Result<Vec<TransactionRecord>, PipelineError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = optimal_batch_size(records.len());
        let batches: Vec<&[TransactionRecord]> = records.chunks(batch_size).collect();
        let total_batches = batches.len();
        let in_flight = self.max_concurrent_batches.unwrap_or(total_batches).max(1);

        info!(
            "Translating {} record(s) in {} batch(es) of up to {}",
            records.len(),
            total_batches,
            batch_size
        );

        // Dispatch in partition order; completion order is unconstrained.
        let mut results: Vec<(usize, Result<Vec<Value>, PipelineError>)> =
            stream::iter(batches.into_iter().enumerate())
                .map(|(batch_index, batch)| {
                    let engine = Arc::clone(&self.engine);
                    async move {
                        debug!(
                            "Dispatching batch {} of {} ({} record(s))",
                            batch_index + 1,
                            total_batches,
                            batch.len()
                        );
                        let result = translate_batch(engine.as_ref(), batch).await;
                        (batch_index, result)
                    }
                })
                .buffer_unordered(in_flight)
                .collect()
                .await;

        // Reassemble by batch index, never by completion order.
        results.sort_by_key(|(batch_index, _)| *batch_index);

        let mut translated: Vec<Value> = Vec::with_capacity(records.len());
        let mut first_failure: Option<PipelineError> = None;
        for (batch_index, result) in results {
            match result {
                Ok(items) => translated.extend(items),
                Err(e) => {
                    error!("Batch {} of {} failed: {}", batch_index + 1, total_batches, e);
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        // All batches are awaited before failing so behavior stays deterministic.
        if let Some(failure) = first_failure {
            return Err(failure);
        }

        validate_records(&translated)?;

        serde_json::from_value(Value::Array(translated))
            .map_err(|e| PipelineError::Schema(format!("Failed to deserialize records: {e}")))
    }
}

/// Translate one batch with a single completion request and normalize
/// the response against the input records.
async fn translate_batch(
    engine: &dyn Completion,
    batch: &[TransactionRecord],
) -> Result<Vec<Value>, PipelineError> {
    let payload = serde_json::to_string(batch)
        .map_err(|e| PipelineError::Parse(format!("Failed to serialize batch: {e}")))?;

    let messages = vec![
        ChatMessage::system(TRANSLATION_SYSTEM_PROMPT),
        ChatMessage::user(payload),
    ];

    let response = engine
        .generate(
            messages,
            GenerationOptions {
                temperature: Some(TRANSLATION_TEMPERATURE),
                max_tokens: None,
            },
        )
        .await?;

    let parsed = extract_json(&response)?;
    let items = match parsed {
        Value::Array(items) => items,
        _ => {
            return Err(PipelineError::Shape(
                "Batch translation response was not an array".to_string(),
            ));
        }
    };

    Ok(normalize_batch(items, batch))
}

/// Backfill any of the eleven required keys missing from a returned element
/// with the corresponding input record's value (null when absent there too).
///
/// This assumes the model preserved per-record count and order within the
/// batch; divergence is caught only by the final schema pass, not here.
fn normalize_batch(items: Vec<Value>, batch: &[TransactionRecord]) -> Vec<Value> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, mut item)| {
            if let Value::Object(map) = &mut item {
                if let Some(original) = batch.get(index) {
                    // Serialization of a record cannot fail; every field is
                    // an optional string.
                    let original_value =
                        serde_json::to_value(original).unwrap_or(Value::Null);
                    for field in RECORD_FIELDS {
                        if !map.contains_key(field) {
                            let backfill = original_value
                                .get(field)
                                .cloned()
                                .unwrap_or(Value::Null);
                            map.insert(field.to_string(), backfill);
                        }
                    }
                }
            }
            item
        })
        .collect()
}
