//! Gemini client: `generateContent` with constrained JSON output.
//!
//! The request carries `responseMimeType: application/json` plus the flow's
//! output structure as `responseSchema`, so the model is expected to answer
//! with a single JSON document matching the schema. The first candidate's text
//! is parsed here; schema validation of the parsed payload stays in the
//! executor.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ModelClient, ModelError, ModelRequest, ModelResponse};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

fn gemini_base_url() -> String {
    std::env::var("GEMINI_API_URL").unwrap_or_else(|_| GEMINI_BASE_URL.to_string())
}

/// Client for the Generative Language API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Reads `GEMINI_API_KEY` (required) and `EDUGENIUS_MODEL` (defaults to
    /// `gemini-2.0-flash`) from the environment.
    pub fn from_env() -> Result<Self, ModelError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ModelError::Config("GEMINI_API_KEY is not set".to_string()))?;
        let model =
            std::env::var("EDUGENIUS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body(request: &ModelRequest) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": request.prompt}],
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
            },
        })
    }
}

/// Pulls the first candidate's text out of a `generateContent` response.
fn candidate_text(response: &Value) -> Option<&str> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = format!("{}/{}:generateContent", gemini_base_url(), self.model);
        let body = Self::build_body(request);
        let res = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let message = res.text().await.unwrap_or_default();
            return Err(ModelError::Api { status, message });
        }

        let wire: Value = res
            .json()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;
        let text = candidate_text(&wire).ok_or(ModelError::Empty)?;
        if text.trim().is_empty() {
            return Err(ModelError::Empty);
        }
        let payload: Value = serde_json::from_str(text)
            .map_err(|e| ModelError::InvalidPayload(e.to_string()))?;
        Ok(ModelResponse { payload })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn body_carries_prompt_and_response_schema() {
        let request = ModelRequest {
            prompt: "Generate a quiz".to_string(),
            response_schema: json!({"type": "object", "properties": {}}),
        };
        let body = GeminiClient::build_body(&request);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Generate a quiz");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["type"],
            "object"
        );
    }

    #[test]
    fn candidate_text_walks_the_wire_shape() {
        let wire = json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"answer\":\"4\"}"}]}
            }]
        });
        assert_eq!(candidate_text(&wire), Some("{\"answer\":\"4\"}"));
        assert_eq!(candidate_text(&json!({"candidates": []})), None);
        assert_eq!(candidate_text(&json!({})), None);
    }
}
