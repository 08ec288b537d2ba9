/*!
 * Tests for error types and conversions
 */

use ectran::errors::{AppError, PipelineError, ProviderError};

#[test]
fn test_provider_error_display_shouldIncludeStatusCode() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "too many requests".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("429"));
    assert!(message.contains("too many requests"));
}

#[test]
fn test_pipeline_error_fromProviderError_shouldWrap() {
    let provider_error = ProviderError::ConnectionError("refused".to_string());
    let pipeline_error: PipelineError = provider_error.into();
    assert!(matches!(pipeline_error, PipelineError::Provider(_)));
    assert!(pipeline_error.to_string().contains("refused"));
}

#[test]
fn test_app_error_fromPipelineError_shouldWrap() {
    let app_error: AppError = PipelineError::Schema("record 0: bad".to_string()).into();
    assert!(matches!(app_error, AppError::Pipeline(_)));
    assert!(app_error.to_string().contains("record 0"));
}

#[test]
fn test_app_error_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
}

#[test]
fn test_schema_error_display_shouldCarryAggregatedMessage() {
    let error = PipelineError::Schema("record 0: a; record 1: b".to_string());
    assert_eq!(
        error.to_string(),
        "Schema validation failed: record 0: a; record 1: b"
    );
}
