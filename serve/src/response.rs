//! Error-to-JSON mapping for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use edugenius::FlowError;

/// An error response with a JSON body.
pub(crate) struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    pub(crate) fn flow_not_found(name: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: json!({"error": format!("unknown flow `{name}`")}),
        }
    }

    pub(crate) fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: json!({"error": message}),
        }
    }

    pub(crate) fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({"error": message}),
        }
    }

    /// 400 carrying every offending field path, so clients can map the
    /// violations onto form fields.
    pub(crate) fn invalid_input(err: &FlowError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({
                "error": err.to_string(),
                "violations": err.violation().violations(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
