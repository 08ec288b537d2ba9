/*!
 * End-to-end tests for the extraction-then-translation pipeline
 */

use std::sync::Arc;

use ectran::errors::PipelineError;
use ectran::pipeline::process_document;

use crate::common::make_records;
use crate::common::mock_engines::MockEngine;

#[tokio::test]
async fn test_pipeline_withExtractionThenEchoTranslation_shouldReturnRecords() {
    let records = make_records(3);
    let extraction_response = serde_json::to_string(&records).unwrap();
    // First call answers extraction; the second echoes the translation
    // batch back, acting as an identity translation.
    let engine = Arc::new(MockEngine::script(vec![
        format!("```json\n{extraction_response}\n```"),
        extraction_response.clone(),
    ]));

    let result = process_document(
        Arc::clone(&engine) as Arc<dyn ectran::Completion>,
        "raw document text",
        None,
    )
    .await
    .unwrap();

    assert_eq!(result, records);
    assert_eq!(engine.request_count(), 2);
}

#[tokio::test]
async fn test_pipeline_withNoTransactionsFound_shouldSkipTranslation() {
    let engine = Arc::new(MockEngine::fixed("[]"));

    let result = process_document(
        Arc::clone(&engine) as Arc<dyn ectran::Completion>,
        "empty document",
        None,
    )
    .await
    .unwrap();

    assert!(result.is_empty());
    assert_eq!(engine.request_count(), 1);
}

#[tokio::test]
async fn test_pipeline_withNonArrayExtraction_shouldFailBeforeTranslation() {
    let engine = Arc::new(MockEngine::fixed(r#"{"error": "none found"}"#));

    let result = process_document(
        Arc::clone(&engine) as Arc<dyn ectran::Completion>,
        "doc",
        None,
    )
    .await;

    assert!(matches!(result, Err(PipelineError::Shape(_))));
    // Extraction failed, so no translation request was ever issued.
    assert_eq!(engine.request_count(), 1);
}

#[tokio::test]
async fn test_pipeline_withFailingTranslation_shouldProduceNoPartialOutput() {
    let records = make_records(2);
    let extraction_response = serde_json::to_string(&records).unwrap();
    // Extraction succeeds; the lone translation batch then exhausts the
    // script and fails.
    let engine = Arc::new(MockEngine::script(vec![extraction_response]));

    let result = process_document(
        Arc::clone(&engine) as Arc<dyn ectran::Completion>,
        "doc",
        None,
    )
    .await;

    assert!(result.is_err());
}
