/*!
 * Tolerant JSON extraction from free-form model output.
 *
 * Completion models wrap their JSON in prose, code fences or both. This
 * module recovers the embedded value in two phases: narrow the candidate
 * to a fenced code block when one exists, then take the span from the
 * first `{` to the last `}` or from the first `[` to the last `]`,
 * whichever opens earlier, and parse that span as JSON.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::PipelineError;

// Matches a fenced code block, optionally tagged `json` in any case.
static CODE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?i:json)?\s*(.*?)\s*```")
        .unwrap_or_else(|_| Regex::new(r"(?s)```(.*?)```").unwrap())
});

/// Extract a JSON object or array embedded in arbitrary model output text.
///
/// Fails with [`PipelineError::Parse`] when no bracketed span is found or
/// when the span is not syntactically valid JSON. There is no silent
/// recovery; the caller receives the failure.
pub fn extract_json(raw: &str) -> Result<Value, PipelineError> {
    let candidate = CODE_BLOCK_REGEX
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map_or(raw, |m| m.as_str());

    let span = json_span(candidate).ok_or_else(|| {
        PipelineError::Parse("No JSON object or array found in model output".to_string())
    })?;

    serde_json::from_str(span)
        .map_err(|e| PipelineError::Parse(format!("Invalid JSON in model output: {e}")))
}

/// The earliest-starting bracketed span, object winning over array when
/// both open at distinct positions and the object opens first. This mirrors
/// leftmost-match alternation, so an array of objects resolves to the whole
/// array, not to its first element.
fn json_span(candidate: &str) -> Option<&str> {
    let object = bracket_span(candidate, '{', '}');
    let array = bracket_span(candidate, '[', ']');
    match (object, array) {
        (Some((object_start, object_span)), Some((array_start, _)))
            if object_start < array_start =>
        {
            Some(object_span)
        }
        (_, Some((_, array_span))) => Some(array_span),
        (Some((_, object_span)), None) => Some(object_span),
        (None, None) => None,
    }
}

/// Start offset and span from the first `open` to the last `close`,
/// if both exist in order.
fn bracket_span(text: &str, open: char, close: char) -> Option<(usize, &str)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if start < end {
        Some((start, &text[start..=end]))
    } else {
        None
    }
}
