//! Flow-level error type.
//!
//! Only input validation surfaces to callers: every downstream failure
//! (transport, model, output validation) is absorbed by the flow's fallback
//! generator and logged server-side. See [`Flow::execute`](crate::flow::Flow::execute).

use crate::schema::SchemaViolation;

/// Error returned by [`Flow::execute`](crate::flow::Flow::execute).
///
/// **Interaction**: `InvalidInput` is raised during the `Validating` stage,
/// before any outbound call is made; it is fatal and never retried. Model and
/// output failures do not appear here; they route to the fallback generator.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The caller's input did not satisfy the flow's input schema.
    #[error("input for flow `{flow}` failed validation: {violation}")]
    InvalidInput {
        /// Name of the flow that rejected the input.
        flow: &'static str,
        /// Every offending field path with the violated constraint.
        violation: SchemaViolation,
    },
}

impl FlowError {
    /// The violation details, for callers that map field paths to form errors.
    pub fn violation(&self) -> &SchemaViolation {
        match self {
            FlowError::InvalidInput { violation, .. } => violation,
        }
    }
}
