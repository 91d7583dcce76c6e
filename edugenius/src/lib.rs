//! # EduGenius AI-flow engine
//!
//! Schema-validated prompt flows with deterministic fallbacks. Every tool on
//! the EduGenius platform is one **flow**: a typed input record validated
//! against a declarative schema, bound into a prompt template, sent to a
//! hosted generative model with the expected output structure attached, and
//! validated again on the way back. When the model is unreachable or its
//! payload does not conform, a deterministic rule-based fallback produces the
//! answer instead, and the caller always receives a schema-valid output, and the
//! substitution is observable via [`FlowOutcome`].
//!
//! ## Design principles
//!
//! - **Typed records, runtime boundary validation**: each flow's input/output
//!   is a plain struct; the [`Schema`] validates only data crossing the
//!   external-model boundary.
//! - **Parse once, render per call**: prompt templates are parsed into a token
//!   list at startup ([`Template`]); rendering is a pure walk.
//! - **Explicit context**: run dependencies ([`FlowContext`]: model client,
//!   clock, timeout) and the [`NotificationCenter`] are constructed at startup
//!   and injected, never module-level singletons.
//! - **One call, no retries**: each invocation makes exactly one outbound
//!   model call under an explicit timeout; only input validation surfaces as
//!   an error.
//!
//! ## Main modules
//!
//! - [`schema`]: [`Schema`], [`Field`], [`SchemaViolation`]: declarative
//!   contracts and validation.
//! - [`prompt`]: [`Template`] parsing/rendering; [`prompt::load`] for
//!   per-flow YAML prompt overrides.
//! - [`model`]: [`ModelClient`] trait, [`GeminiClient`], [`MockModel`].
//! - [`flow`]: [`Flow`], [`FlowContext`], [`FlowOutcome`], [`FlowRegistry`].
//! - [`flows`]: the catalog of lesson plans, essay evaluation, career advice,
//!   learning paths, quizzes, tests, grading, Q&A, tutoring, summaries,
//!   takeaways, grounded answers, resources, visitor questions, certificate
//!   messages, performance optimization.
//! - [`qa`]: `Q:`/`A:` text parsing with raw-response wrapping.
//! - [`notify`]: in-process [`NotificationCenter`].
//! - [`clock`]: injectable [`Clock`] for the one sanctioned wall-clock read.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use edugenius::flows::lesson_plan;
//! use edugenius::{FlowContext, GeminiClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = Arc::new(GeminiClient::from_env()?);
//! let ctx = FlowContext::new(model);
//! let flow = lesson_plan::flow()?;
//!
//! let outcome = flow
//!     .execute(
//!         &ctx,
//!         lesson_plan::LessonPlanInput {
//!             topic: "Photosynthesis".to_string(),
//!             duration: "45 minutes".to_string(),
//!             objective: "Describe how plants convert light into energy".to_string(),
//!         },
//!     )
//!     .await?;
//! println!("degraded: {}", outcome.is_fallback());
//! println!("{}", outcome.into_output().lesson_title);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod error;
pub mod flow;
pub mod flows;
pub mod model;
pub mod notify;
pub mod prompt;
pub mod qa;
pub mod schema;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::FlowError;
pub use flow::{
    ErasedFlow, ErasedOutcome, Flow, FlowContext, FlowOutcome, FlowRegistry, FlowSetupError,
    DEFAULT_FLOW_TIMEOUT,
};
pub use model::{GeminiClient, MockModel, ModelClient, ModelError, ModelRequest, ModelResponse};
pub use notify::{NewNotification, Notification, NotificationCenter, NotificationKind};
pub use prompt::load::{
    load as load_prompt_overrides, load_or_default as load_prompt_overrides_or_default,
    LoadError as PromptsLoadError, PromptOverrides,
};
pub use prompt::{Template, TemplateParseError};
pub use qa::{pairs_or_raw, parse_qa_pairs, QaPair, RAW_RESPONSE_QUESTION};
pub use schema::{Field, FieldKind, Schema, SchemaViolation, Violation};

/// When running `cargo test -p edugenius`, initializes tracing from `RUST_LOG`
/// so unit tests in `src/**` can print logs with `--nocapture`.
#[cfg(test)]
mod test_logging {
    use ctor::ctor;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::Layer;

    #[ctor]
    fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter),
            )
            .try_init();
    }
}
