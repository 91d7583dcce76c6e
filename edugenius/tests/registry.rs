//! Flow registry: catalog completeness, type-erased dispatch, overrides.


use std::sync::Arc;

use serde_json::json;

use edugenius::{FlowContext, FlowError, FlowRegistry, FlowSetupError, MockModel};

#[test]
fn catalog_contains_every_flow_once() {
    let registry = FlowRegistry::new().unwrap();
    let mut names = registry.names();
    assert_eq!(names.len(), 16);
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 16, "duplicate flow names in the catalog");
    assert!(registry.get("performance_optimization").is_some());
    assert!(registry.get("lesson_plan").is_some());
    assert!(registry.get("certificate_message").is_some());
    assert!(registry.get("no_such_flow").is_none());
}

#[tokio::test]
async fn erased_dispatch_runs_a_flow_from_json() {
    let registry = FlowRegistry::new().unwrap();
    let ctx = FlowContext::new(Arc::new(MockModel::failing()));
    let flow = registry.get("ai_tutor").unwrap();

    let outcome = flow
        .execute_value(
            &ctx,
            json!({"topic": "Fractions", "question": "Why flip when dividing?"}),
        )
        .await
        .unwrap();
    assert!(outcome.degraded);
    assert!(outcome.output["answer"]
        .as_str()
        .unwrap()
        .contains("Fractions"));
}

#[tokio::test]
async fn erased_dispatch_surfaces_input_violations_with_paths() {
    let registry = FlowRegistry::new().unwrap();
    let ctx = FlowContext::new(Arc::new(MockModel::failing()));
    let flow = registry.get("certificate_message").unwrap();

    let err = flow
        .execute_value(&ctx, json!({"name": "Ayesha", "subject": "Maths", "score": -1}))
        .await
        .unwrap_err();
    let FlowError::InvalidInput { violation, .. } = err;
    assert!(violation
        .violations()
        .iter()
        .any(|v| v.path == "score" && v.constraint == "must be at least 0"));
}

#[tokio::test]
async fn erased_dispatch_applies_schema_defaults() {
    let registry = FlowRegistry::new().unwrap();
    let ctx = FlowContext::new(Arc::new(MockModel::failing()));
    let flow = registry.get("test_builder").unwrap();

    // numberOfQuestions omitted: the schema default (10) applies, and the
    // fallback caps its paper at 5.
    let outcome = flow
        .execute_value(
            &ctx,
            json!({
                "subject": "Physics",
                "topic": "Ohm's law",
                "difficultyLevel": "easy",
                "curriculumLevel": "Grade 12",
                "medium": "english",
                "questionType": "mcq",
            }),
        )
        .await
        .unwrap();
    assert_eq!(outcome.output["mcqs"].as_array().unwrap().len(), 5);
}

#[test]
fn overrides_replace_prompts_and_invalid_overrides_fail_setup() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("quiz.yaml"),
        "prompt: \"Five questions about {{text}} please.\"\n",
    )
    .unwrap();
    let overrides = edugenius::load_prompt_overrides(Some(temp.path())).unwrap();
    let registry = FlowRegistry::with_overrides(&overrides).unwrap();
    assert!(registry.get("quiz").is_some());

    std::fs::write(
        temp.path().join("quiz.yaml"),
        "prompt: \"Unbalanced {{#each items}} section\"\n",
    )
    .unwrap();
    let overrides = edugenius::load_prompt_overrides(Some(temp.path())).unwrap();
    let err = FlowRegistry::with_overrides(&overrides).unwrap_err();
    let FlowSetupError::Template { flow, .. } = err;
    assert_eq!(flow, "quiz");
}
