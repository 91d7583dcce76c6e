//! Mock model client for tests: fixed payload, guaranteed failure, or empty
//! result, plus a call counter for asserting single-call behavior.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use super::{ModelClient, ModelError, ModelRequest, ModelResponse};

enum Behavior {
    Payload(Value),
    Fail,
    Empty,
}

/// Test double for [`ModelClient`].
pub struct MockModel {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockModel {
    /// Always answers with the given payload.
    pub fn with_payload(payload: Value) -> Self {
        Self {
            behavior: Behavior::Payload(payload),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails with a transport error.
    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always answers with an empty result.
    pub fn empty() -> Self {
        Self {
            behavior: Behavior::Empty,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls seen so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelClient for MockModel {
    async fn generate(&self, _request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Payload(payload) => Ok(ModelResponse {
                payload: payload.clone(),
            }),
            Behavior::Fail => Err(ModelError::Transport("mock model always fails".to_string())),
            Behavior::Empty => Err(ModelError::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn with_payload_returns_fixed_value_and_counts_calls() {
        let mock = MockModel::with_payload(json!({"answer": "4"}));
        let request = ModelRequest {
            prompt: "2+2?".to_string(),
            response_schema: json!({"type": "object"}),
        };
        let first = mock.generate(&request).await.unwrap();
        let second = mock.generate(&request).await.unwrap();
        assert_eq!(first.payload, json!({"answer": "4"}));
        assert_eq!(second.payload, first.payload);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn failing_returns_transport_error() {
        let mock = MockModel::failing();
        let request = ModelRequest {
            prompt: String::new(),
            response_schema: json!({}),
        };
        let err = mock.generate(&request).await.unwrap_err();
        assert!(matches!(err, ModelError::Transport(_)));
    }

    #[tokio::test]
    async fn empty_returns_empty_error() {
        let mock = MockModel::empty();
        let request = ModelRequest {
            prompt: String::new(),
            response_schema: json!({}),
        };
        assert!(matches!(
            mock.generate(&request).await.unwrap_err(),
            ModelError::Empty
        ));
    }
}
