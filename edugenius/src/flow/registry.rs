//! Name-indexed, type-erased flow catalog.
//!
//! The HTTP layer dispatches `name → execute(json) → json` without knowing the
//! per-flow types; [`ErasedFlow`] is the object-safe seam and [`FlowRegistry`]
//! builds the full catalog, applying any prompt-text overrides.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{Flow, FlowContext};
use crate::error::FlowError;
use crate::prompt::load::PromptOverrides;
use crate::prompt::TemplateParseError;
use crate::schema::{SchemaViolation, Violation};

/// Outcome of a type-erased invocation: the output as JSON plus whether the
/// fallback produced it.
#[derive(Debug, Clone)]
pub struct ErasedOutcome {
    pub output: Value,
    pub degraded: bool,
}

/// Object-safe view of a [`Flow`] for dynamic dispatch.
#[async_trait]
pub trait ErasedFlow: Send + Sync {
    fn name(&self) -> &'static str;

    /// Validates and binds the JSON input, then runs the flow.
    async fn execute_value(
        &self,
        ctx: &FlowContext,
        input: Value,
    ) -> Result<ErasedOutcome, FlowError>;
}

#[async_trait]
impl<I, O> ErasedFlow for Flow<I, O>
where
    I: DeserializeOwned + Serialize + Send + Sync,
    O: Serialize + DeserializeOwned + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    async fn execute_value(
        &self,
        ctx: &FlowContext,
        input: Value,
    ) -> Result<ErasedOutcome, FlowError> {
        let sanitized = self
            .input_schema
            .validate(&input)
            .map_err(|violation| FlowError::InvalidInput {
                flow: self.name,
                violation,
            })?;
        // Sanitized values bind unless the typed struct and the schema have
        // drifted apart, which is a defect in the flow definition itself.
        let typed: I = serde_json::from_value(sanitized).map_err(|e| FlowError::InvalidInput {
            flow: self.name,
            violation: SchemaViolation::new(
                self.input_schema.name(),
                vec![Violation {
                    path: "$".to_string(),
                    constraint: format!("value does not bind to the input record: {e}"),
                }],
            ),
        })?;
        let outcome = self.execute(ctx, typed).await?;
        let degraded = outcome.is_fallback();
        let output = serde_json::to_value(outcome.into_output()).unwrap_or(Value::Null);
        Ok(ErasedOutcome { output, degraded })
    }
}

/// Error building the catalog (startup-time only).
#[derive(Debug, thiserror::Error)]
pub enum FlowSetupError {
    #[error("flow `{flow}` has an invalid prompt template: {source}")]
    Template {
        flow: &'static str,
        #[source]
        source: TemplateParseError,
    },
}

/// The full flow catalog, built once at startup and shared read-only.
pub struct FlowRegistry {
    flows: Vec<Arc<dyn ErasedFlow>>,
}

impl std::fmt::Debug for FlowRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowRegistry")
            .field("flows", &self.names())
            .finish()
    }
}

impl FlowRegistry {
    /// Catalog with the compiled-in prompt templates.
    pub fn new() -> Result<Self, FlowSetupError> {
        Self::with_overrides(&PromptOverrides::default())
    }

    /// Catalog with per-flow prompt-text overrides applied; flows without an
    /// override keep their compiled-in template.
    pub fn with_overrides(overrides: &PromptOverrides) -> Result<Self, FlowSetupError> {
        let mut flows: Vec<Arc<dyn ErasedFlow>> = Vec::new();
        macro_rules! register {
            ($module:ident) => {{
                let flow = match overrides.get(crate::flows::$module::NAME) {
                    Some(prompt) => crate::flows::$module::flow_with_prompt(prompt),
                    None => crate::flows::$module::flow(),
                }
                .map_err(|source| FlowSetupError::Template {
                    flow: crate::flows::$module::NAME,
                    source,
                })?;
                flows.push(Arc::new(flow));
            }};
        }

        register!(performance_optimization);
        register!(lesson_plan);
        register!(essay_evaluation);
        register!(career_advice);
        register!(learning_path);
        register!(quiz);
        register!(test_builder);
        register!(grade_answers);
        register!(q_and_a);
        register!(ai_tutor);
        register!(chapter_summary);
        register!(key_takeaways);
        register!(text_answer);
        register!(related_resources);
        register!(visitor_questions);
        register!(certificate_message);

        Ok(Self { flows })
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ErasedFlow>> {
        self.flows.iter().find(|flow| flow.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.flows.iter().map(|flow| flow.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}
