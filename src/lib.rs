/*!
 * # ectran - Encumbrance Certificate Transaction Translator
 *
 * A Rust library for extracting structured transaction records from raw
 * Encumbrance Certificate document text and translating their Tamil
 * free-text fields to English using an LLM completion service.
 *
 * ## Features
 *
 * - Single-call structured extraction with strict 11-field schema validation
 * - Tolerant recovery of JSON embedded in free-form model output
 * - Adaptive, order-preserving batch translation with concurrent dispatch
 * - Per-record normalization of partially omitted fields
 * - All-or-nothing semantics: no retries, no partial results
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `record`: Transaction record model and strict schema validation
 * - `json_extract`: Tolerant JSON extraction from model output
 * - `prompts`: Fixed system prompts for both stages
 * - `extraction`: Structured extraction stage
 * - `translation`: Batch translation of extracted records:
 *   - `translation::batch`: Adaptive batch sizing and concurrent orchestration
 * - `client`: Shared completion client and the `Completion` trait
 * - `pipeline`: Extraction-then-translation facade
 * - `providers`: Client implementation for the OpenAI completion API
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod client;
pub mod errors;
pub mod extraction;
pub mod json_extract;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod record;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use client::{Completion, CompletionClient, GenerationOptions};
pub use errors::{AppError, PipelineError, ProviderError};
pub use extraction::extract_transactions;
pub use json_extract::extract_json;
pub use pipeline::process_document;
pub use record::TransactionRecord;
pub use translation::BatchTranslator;
