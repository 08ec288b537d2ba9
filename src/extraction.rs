/*!
 * Structured extraction stage.
 *
 * Turns the raw text of one document into an ordered sequence of
 * schema-valid transaction records with a single completion call.
 * Any failure aborts the stage; there are no retries and no partial
 * acceptance.
 */

use log::{debug, info};
use serde_json::Value;

use crate::client::{Completion, GenerationOptions};
use crate::errors::PipelineError;
use crate::json_extract::extract_json;
use crate::prompts::EXTRACTION_SYSTEM_PROMPT;
use crate::providers::openai::ChatMessage;
use crate::record::{validate_records, TransactionRecord};

/// Maximum number of characters of raw text included in the prompt,
/// bounding model-context usage for very large documents
pub const MAX_INPUT_CHARS: usize = 120_000;

/// Near-deterministic sampling for structured output
const EXTRACTION_TEMPERATURE: f32 = 0.1;

/// Extract an ordered sequence of transaction records from raw document text.
///
/// Issues exactly one completion request, tolerantly parses the response,
/// requires a top-level JSON array and strict-validates every element.
/// An empty array is a valid result meaning "no transactions found".
pub async fn extract_transactions(
    engine: &dyn Completion,
    raw_text: &str,
) -> Result<Vec<TransactionRecord>, PipelineError> {
    let truncated = truncate_chars(raw_text, MAX_INPUT_CHARS);
    if truncated.len() < raw_text.len() {
        debug!(
            "Input text truncated from {} to {} bytes before prompting",
            raw_text.len(),
            truncated.len()
        );
    }

    let messages = vec![
        ChatMessage::system(EXTRACTION_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Here is the document content:\n################\n{truncated}\n################"
        )),
    ];

    let response = engine
        .generate(
            messages,
            GenerationOptions {
                temperature: Some(EXTRACTION_TEMPERATURE),
                max_tokens: None,
            },
        )
        .await?;

    let parsed = extract_json(&response)?;

    let items: Vec<Value> = match parsed {
        Value::Array(items) => items,
        other => {
            return Err(PipelineError::Shape(format!(
                "Extraction response was not a top-level JSON array, got {}",
                value_kind(&other)
            )));
        }
    };

    validate_records(&items)?;

    let records: Vec<TransactionRecord> = serde_json::from_value(Value::Array(items))
        .map_err(|e| PipelineError::Schema(format!("Failed to deserialize records: {e}")))?;

    info!("Extracted {} transaction(s) from document text", records.len());
    Ok(records)
}

/// Truncate a string to at most `max_chars` characters on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Short name of a JSON value's type, for error messages
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
