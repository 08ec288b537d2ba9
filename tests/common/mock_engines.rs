/*!
 * Mock completion engines for testing
 *
 * This module provides mock implementations of the Completion trait to
 * avoid external API calls in tests. Each engine returns predetermined
 * responses and records the requests it receives.
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ectran::client::{Completion, GenerationOptions};
use ectran::errors::{PipelineError, ProviderError};
use ectran::providers::openai::ChatMessage;

/// Behavior mode for the mock engine
pub enum MockBehavior {
    /// Always return the same fixed response text
    Fixed(String),

    /// Return the last user message's content verbatim.
    /// For translation batches this acts as an identity translation.
    Echo,

    /// Pop scripted responses in call order
    Script(Mutex<VecDeque<String>>),

    /// Always fail with a simulated provider error
    Failing,

    /// Always return an empty response
    Empty,
}

/// Mock completion engine for testing pipeline behavior
pub struct MockEngine {
    /// Behavior mode
    behavior: MockBehavior,

    /// Number of generate calls made
    request_count: Arc<AtomicUsize>,

    /// Every message list received, in call order
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockEngine {
    /// Create a new mock engine with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Engine that always returns the given response text
    pub fn fixed(response: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(response.into()))
    }

    /// Engine that echoes the last user message back
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Engine that pops the given responses in call order
    pub fn script(responses: Vec<String>) -> Self {
        Self::new(MockBehavior::Script(Mutex::new(responses.into())))
    }

    /// Engine that always fails with a provider error
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Engine that always returns an empty response
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of generate calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of every message list received so far
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Completion for MockEngine {
    async fn generate(
        &self,
        messages: Vec<ChatMessage>,
        _options: GenerationOptions,
    ) -> Result<String, PipelineError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(messages.clone());

        match &self.behavior {
            MockBehavior::Fixed(response) => Ok(response.clone()),

            MockBehavior::Echo => Ok(messages
                .iter()
                .rev()
                .find(|message| message.role == "user")
                .map(|message| message.content.clone())
                .unwrap_or_default()),

            MockBehavior::Script(responses) => {
                responses.lock().unwrap().pop_front().ok_or_else(|| {
                    PipelineError::Provider(ProviderError::RequestFailed(
                        "Mock script exhausted".to_string(),
                    ))
                })
            }

            MockBehavior::Failing => Err(PipelineError::Provider(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            })),

            MockBehavior::Empty => Ok(String::new()),
        }
    }
}
