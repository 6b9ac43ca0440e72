//! Provider trait shared by the profiler and the gear identifier.

use super::types::Message;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Options for a completion request.
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    /// Sampling temperature (0.0 = deterministic).
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: Some(800),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Errors that can occur when talking to a model provider.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("request timeout")]
    Timeout,

    #[error("provider is not configured: {0}")]
    NotConfigured(String),
}

/// A chat-completion backend.
///
/// Implementations return the assistant's text content; interpreting it is
/// left to the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, LlmError>;
}
