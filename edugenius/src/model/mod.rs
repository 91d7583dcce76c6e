//! Hosted-model client abstraction.
//!
//! The flow executor depends on a callable that takes a rendered prompt plus
//! the expected output structure and returns a structured JSON payload; this
//! module defines the trait and its implementations.
//!
//! # Main types
//!
//! - [`ModelClient`]: the seam; one `generate` call per flow invocation.
//! - [`GeminiClient`]: real client for the Generative Language API.
//! - [`MockModel`]: fixed payload / failing / empty, for tests.
//!
//! **Interaction**: called exactly once per [`Flow::execute`](crate::flow::Flow::execute)
//! invocation; every [`ModelError`] routes the executor to the flow's fallback
//! generator and is never surfaced to the caller.

mod gemini;
mod mock;

pub use gemini::GeminiClient;
pub use mock::MockModel;

use async_trait::async_trait;
use serde_json::Value;

/// One request to the hosted model: the rendered prompt text plus the JSON
/// structure description the payload must conform to.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub prompt: String,
    pub response_schema: Value,
}

/// Structured payload returned by the model, already parsed from the wire
/// format into JSON. Output-schema validation happens in the executor.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub payload: Value,
}

/// Error from a model call. Never propagated past the flow executor.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Connection, DNS, or request-level failure.
    #[error("model transport error: {0}")]
    Transport(String),
    /// The API answered with a non-success status.
    #[error("model API error {status}: {message}")]
    Api { status: u16, message: String },
    /// The model answered but produced no candidate text.
    #[error("model returned an empty result")]
    Empty,
    /// The candidate text was not valid JSON.
    #[error("model payload was not valid JSON: {0}")]
    InvalidPayload(String),
    /// Client construction failed (e.g. missing API key).
    #[error("model client configuration error: {0}")]
    Config(String),
}

/// Hosted-model client: rendered prompt in, structured payload out.
///
/// Implementations must be safe for unsynchronized concurrent use; the same
/// client instance is shared by arbitrarily many concurrent flow invocations.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError>;
}
