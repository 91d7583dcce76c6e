//! Axum app: shared state and router.

use std::sync::Arc;

use async_trait::async_trait;
use axum::routing::{get, post};
use axum::Router;
use tracing::warn;

use edugenius::{
    FlowContext, FlowRegistry, FlowSetupError, GeminiClient, ModelClient, ModelError,
    ModelRequest, ModelResponse, NotificationCenter, SystemClock,
};

use super::routes;

/// Shared state for the flow server.
///
/// Injected into the router and cloned per request so handlers can reach the
/// registry, run context, and notifier without globals.
pub struct AppState {
    pub registry: FlowRegistry,
    pub ctx: FlowContext,
    pub notifier: NotificationCenter,
}

impl AppState {
    pub fn new(registry: FlowRegistry, ctx: FlowContext, notifier: NotificationCenter) -> Self {
        Self {
            registry,
            ctx,
            notifier,
        }
    }

    /// Builds state from the environment: registry with `PROMPTS_DIR`
    /// overrides, Gemini client (or an offline stand-in when no API key is
    /// configured, in which case every flow answers from its fallback), and
    /// the configured per-call timeout.
    pub fn from_env() -> Result<Self, FlowSetupError> {
        let overrides = edugenius::load_prompt_overrides_or_default(None);
        let registry = FlowRegistry::with_overrides(&overrides)?;

        let model_env = config::model_env();
        let model: Arc<dyn ModelClient> = match &model_env.api_key {
            Some(key) => Arc::new(GeminiClient::new(key.clone(), model_env.model.clone())),
            None => {
                warn!("GEMINI_API_KEY is not set; all flows will answer from their fallbacks");
                Arc::new(OfflineModel)
            }
        };
        let ctx = FlowContext::new(model).with_timeout(model_env.flow_timeout);
        let notifier = NotificationCenter::new(Arc::new(SystemClock));
        Ok(Self::new(registry, ctx, notifier))
    }
}

/// Stand-in model used when no API key is configured; every call fails so the
/// executor degrades to the deterministic fallbacks.
struct OfflineModel;

#[async_trait]
impl ModelClient for OfflineModel {
    async fn generate(&self, _request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        Err(ModelError::Config("GEMINI_API_KEY is not set".to_string()))
    }
}

/// Builds the router over the shared state.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/flows", get(routes::list_flows))
        .route("/api/flows/:name", post(routes::execute_flow))
        .route("/api/notifications", get(routes::list_notifications))
        .route(
            "/api/notifications/:id/read",
            post(routes::mark_notification_read),
        )
        .with_state(state)
}
