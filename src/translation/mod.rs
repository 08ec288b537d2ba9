/*!
 * Batch translation of extracted transaction records.
 *
 * This module contains the orchestrator that partitions a record sequence
 * into order-preserving batches, dispatches concurrent completion requests,
 * normalizes each batch response and re-validates the reassembled output.
 *
 * - `batch`: Adaptive batch sizing and the concurrent orchestrator
 */

// Re-export main types for easier usage
pub use self::batch::{optimal_batch_size, BatchTranslator};

// Submodules
pub mod batch;
