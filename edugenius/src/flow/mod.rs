//! Flow executor: one schema-validated request/response operation.
//!
//! A [`Flow`] bundles the input/output schemas, the prompt template, and the
//! deterministic fallback generator for one operation. Each invocation runs
//! `Validating → Binding → ModelCall → OutputValidating`, and any model-side
//! failure (transport error, timeout, empty result, output-schema violation)
//! transitions to the fallback instead, so the caller always receives a
//! schema-valid output. Only input validation is surfaced as an error.
//!
//! Invocations are independent and stateless: a `Flow` holds no mutable state,
//! so arbitrarily many invocations may run concurrently against the same
//! instance.
//!
//! # Main types
//!
//! - [`Flow`]: the operation; see [`Flow::execute`].
//! - [`FlowContext`]: run dependencies (model client, clock, timeout),
//!   constructed at startup and injected explicitly.
//! - [`FlowOutcome`]: tagged `Model`/`Fallback` result so callers can observe
//!   degradation; [`FlowOutcome::into_output`] erases the tag.
//! - [`FlowRegistry`]: name-indexed, type-erased catalog for JSON dispatch.

mod registry;

pub use registry::{ErasedFlow, ErasedOutcome, FlowRegistry, FlowSetupError};

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::FlowError;
use crate::model::{ModelClient, ModelRequest};
use crate::prompt::{Template, TemplateParseError};
use crate::schema::Schema;

/// Default bound on one model call. The original design left the timeout to
/// the underlying network library; here it is explicit and configurable.
pub const DEFAULT_FLOW_TIMEOUT: Duration = Duration::from_secs(30);

/// Run dependencies shared by all flows: the model client, the clock, and the
/// per-call timeout. Construct once at startup; a timed-out call routes to the
/// fallback like any other model failure.
#[derive(Clone)]
pub struct FlowContext {
    pub model: Arc<dyn ModelClient>,
    pub clock: Arc<dyn Clock>,
    pub timeout: Duration,
}

impl FlowContext {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            model,
            clock: Arc::new(SystemClock),
            timeout: DEFAULT_FLOW_TIMEOUT,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Result of one invocation: the model's answer, or the deterministic
/// substitute produced when the model was unavailable.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome<O> {
    Model(O),
    Fallback(O),
}

impl<O> FlowOutcome<O> {
    /// The output regardless of origin. Restores the original behavior of
    /// masking fallback substitution from the caller.
    pub fn into_output(self) -> O {
        match self {
            FlowOutcome::Model(output) | FlowOutcome::Fallback(output) => output,
        }
    }

    pub fn output(&self) -> &O {
        match self {
            FlowOutcome::Model(output) | FlowOutcome::Fallback(output) => output,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FlowOutcome::Fallback(_))
    }
}

type FallbackFn<I, O> = Box<dyn Fn(&I, &dyn Clock) -> O + Send + Sync>;

/// One schema-validated operation bound to a prompt template and a fallback
/// generator. `I` and `O` are the typed input/output records; the schemas
/// validate the same shapes at the external-model boundary.
pub struct Flow<I, O> {
    name: &'static str,
    input_schema: Schema,
    output_schema: Schema,
    template: Template,
    fallback: FallbackFn<I, O>,
}

impl<I, O> Flow<I, O>
where
    I: Serialize + Send + Sync,
    O: DeserializeOwned + Send + Sync,
{
    /// Builds a flow, parsing the template source once. The fallback must be
    /// total: it takes any schema-valid input and returns an output, with no
    /// error channel, so it cannot be exhausted at runtime.
    pub fn new(
        name: &'static str,
        input_schema: Schema,
        output_schema: Schema,
        template_source: &str,
        fallback: impl Fn(&I, &dyn Clock) -> O + Send + Sync + 'static,
    ) -> Result<Self, TemplateParseError> {
        Ok(Self {
            name,
            input_schema,
            output_schema,
            template: Template::parse(template_source)?,
            fallback: Box::new(fallback),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn input_schema(&self) -> &Schema {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    /// Runs one invocation end to end.
    ///
    /// Exactly one outbound model call is made, with no retries; every
    /// downstream failure is absorbed by the fallback and logged server-side,
    /// so the returned future only rejects on input validation.
    pub async fn execute(
        &self,
        ctx: &FlowContext,
        input: I,
    ) -> Result<FlowOutcome<O>, FlowError> {
        let raw = serde_json::to_value(&input).unwrap_or(Value::Null);
        let sanitized = self
            .input_schema
            .validate(&raw)
            .map_err(|violation| FlowError::InvalidInput {
                flow: self.name,
                violation,
            })?;

        let prompt = self.template.render(&sanitized);
        debug!(flow = self.name, prompt_len = prompt.len(), "prompt bound");

        let request = ModelRequest {
            prompt,
            response_schema: self.output_schema.response_schema(),
        };
        Ok(match self.call_model(ctx, &request).await {
            Some(output) => FlowOutcome::Model(output),
            None => FlowOutcome::Fallback((self.fallback)(&input, ctx.clock.as_ref())),
        })
    }

    /// The `ModelCall → OutputValidating` stages; `None` means "use fallback".
    async fn call_model(&self, ctx: &FlowContext, request: &ModelRequest) -> Option<O> {
        let response = match tokio::time::timeout(ctx.timeout, ctx.model.generate(request)).await
        {
            Err(_) => {
                warn!(
                    flow = self.name,
                    timeout_secs = ctx.timeout.as_secs(),
                    "model call timed out; using fallback"
                );
                return None;
            }
            Ok(Err(err)) => {
                warn!(flow = self.name, error = %err, "model call failed; using fallback");
                return None;
            }
            Ok(Ok(response)) => response,
        };

        let valid = match self.output_schema.validate(&response.payload) {
            Ok(valid) => valid,
            Err(violation) => {
                warn!(
                    flow = self.name,
                    violation = %violation,
                    "model payload failed output validation; using fallback"
                );
                return None;
            }
        };
        match serde_json::from_value::<O>(valid) {
            Ok(output) => Some(output),
            Err(err) => {
                warn!(flow = self.name, error = %err, "model payload did not bind; using fallback");
                None
            }
        }
    }
}
