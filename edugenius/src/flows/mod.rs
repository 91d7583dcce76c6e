//! The flow catalog: one module per AI-backed operation.
//!
//! Each module declares the typed input/output records, the input/output
//! schemas, the compiled-in prompt template, and the deterministic fallback
//! generator, and exposes `NAME`, `flow()` and `flow_with_prompt()` for the
//! registry. Templates are parsed when the flow is constructed; construction
//! happens once at startup via [`FlowRegistry`](crate::flow::FlowRegistry) or
//! directly by library callers.
//!
//! Fallbacks follow one shape: bucket continuous inputs into discrete
//! categories via fixed thresholds, and fill list-valued outputs with static
//! advice conditioned on simple input tests. Every fallback is total: any
//! schema-valid input yields a schema-valid output.

pub mod ai_tutor;
pub mod career_advice;
pub mod certificate_message;
pub mod chapter_summary;
pub mod essay_evaluation;
pub mod grade_answers;
pub mod key_takeaways;
pub mod learning_path;
pub mod lesson_plan;
pub mod performance_optimization;
pub mod q_and_a;
pub mod quiz;
pub mod related_resources;
pub mod test_builder;
pub mod text_answer;
pub mod visitor_questions;
