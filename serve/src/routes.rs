//! Request handlers: flow dispatch, catalog listing, notifications, health.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use edugenius::{FlowError, NewNotification, NotificationKind};

use super::app::AppState;
use super::response::ApiError;

pub(crate) async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub(crate) async fn list_flows(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({"flows": state.registry.names()}))
}

/// `POST /api/flows/{name}`: validates, executes, and reports degradation.
///
/// A fallback-produced answer is still a 200 (the contract guarantees a
/// schema-valid output), but it is marked `"degraded": true` and recorded on
/// the notification feed.
pub(crate) async fn execute_flow(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let Some(flow) = state.registry.get(&name) else {
        return Err(ApiError::flow_not_found(&name));
    };
    match flow.execute_value(&state.ctx, input).await {
        Ok(outcome) => {
            if outcome.degraded {
                state.notifier.publish(NewNotification::new(
                    "Degraded response",
                    format!("Flow `{name}` answered from its fallback generator."),
                    NotificationKind::Warning,
                ));
            }
            Ok(Json(json!({
                "output": outcome.output,
                "degraded": outcome.degraded,
            })))
        }
        Err(err @ FlowError::InvalidInput { .. }) => Err(ApiError::invalid_input(&err)),
    }
}

pub(crate) async fn list_notifications(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "notifications": state.notifier.recent(),
        "unread": state.notifier.unread_count(),
    }))
}

pub(crate) async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id: Uuid = id
        .parse()
        .map_err(|_| ApiError::bad_request("notification id is not a valid UUID"))?;
    if state.notifier.mark_read(id) {
        Ok(Json(json!({"read": true})))
    } else {
        Err(ApiError::not_found("no such notification"))
    }
}
