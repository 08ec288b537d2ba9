/*!
 * Completion client: the single shared resource through which both
 * pipeline stages talk to the LLM service.
 *
 * The process-wide instance is constructed lazily on first use and reused
 * for the lifetime of the process. Construction requires a credential and
 * fails immediately with a configuration error when none is present.
 * There is no retry or backoff; transport and provider errors propagate
 * unmodified to the caller.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::app_config::ProviderConfig;
use crate::errors::PipelineError;
use crate::providers::Provider;
use crate::providers::openai::{ChatMessage, OpenAI, OpenAIRequest};

/// Optional sampling parameters for one completion call
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationOptions {
    /// Sampling temperature; provider default when None
    pub temperature: Option<f32>,

    /// Maximum number of output tokens; uncapped when None
    pub max_tokens: Option<u32>,
}

/// Interface the pipeline stages use to obtain completions.
///
/// Production code uses [`CompletionClient`]; tests substitute mock engines.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Issue one completion request and return the model's text output,
    /// trimmed, or an empty string when the model yields no content
    async fn generate(
        &self,
        messages: Vec<ChatMessage>,
        options: GenerationOptions,
    ) -> Result<String, PipelineError>;
}

/// Completion client backed by the OpenAI provider
#[derive(Debug)]
pub struct CompletionClient {
    /// Underlying provider
    provider: OpenAI,
    /// Model used for every request
    model: String,
}

impl CompletionClient {
    /// Create a client from provider settings.
    ///
    /// Fails with [`PipelineError::Config`] when no API key is configured
    /// and none is present in the environment.
    pub fn new(config: &ProviderConfig) -> Result<Self, PipelineError> {
        let api_key = config.resolve_api_key();
        if api_key.is_empty() {
            return Err(PipelineError::Config(
                "OPENAI_API_KEY missing: cannot call completion service".to_string(),
            ));
        }

        Ok(Self {
            provider: OpenAI::new(api_key, config.endpoint.clone(), config.timeout_secs),
            model: config.model.clone(),
        })
    }

    /// Create a client from default settings and the environment credential
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::new(&ProviderConfig::default())
    }

    /// Verify the completion service is reachable with the configured
    /// credential by issuing a minimal request
    pub async fn test_connection(&self) -> Result<(), PipelineError> {
        self.provider.test_connection().await?;
        Ok(())
    }
}

#[async_trait]
impl Completion for CompletionClient {
    async fn generate(
        &self,
        messages: Vec<ChatMessage>,
        options: GenerationOptions,
    ) -> Result<String, PipelineError> {
        let request = OpenAIRequest::new(&self.model)
            .messages(messages)
            .temperature(options.temperature)
            .max_tokens(options.max_tokens);

        let response = self.provider.complete(request).await?;
        Ok(OpenAI::extract_text(&response))
    }
}

// Process-wide shared client, built on first use.
static SHARED_CLIENT: Lazy<RwLock<Option<Arc<CompletionClient>>>> =
    Lazy::new(|| RwLock::new(None));

/// The process-wide shared completion client, constructing it on first use
/// from default settings and the environment credential.
pub fn shared() -> Result<Arc<CompletionClient>, PipelineError> {
    if let Some(client) = SHARED_CLIENT.read().as_ref() {
        return Ok(Arc::clone(client));
    }

    let mut guard = SHARED_CLIENT.write();
    // Another caller may have initialized between the read and write locks.
    if let Some(client) = guard.as_ref() {
        return Ok(Arc::clone(client));
    }

    let client = Arc::new(CompletionClient::from_env()?);
    *guard = Some(Arc::clone(&client));
    Ok(client)
}

/// Drop the process-wide shared client so the next [`shared`] call
/// rebuilds it. Intended for tests.
pub fn reset_shared() {
    *SHARED_CLIENT.write() = None;
}
