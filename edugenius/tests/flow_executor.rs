//! End-to-end executor behavior: model path, fallback path, input rejection.


use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use edugenius::flows::performance_optimization::{
    self, Grade, Opportunity, PerformanceInput, PerformanceMetrics, Platform, Priority,
};
use edugenius::flows::q_and_a::{self, QAndAInput};
use edugenius::{FlowContext, FlowError, FlowOutcome, MockModel, ModelClient, ModelError};

fn perf_input(score: f64) -> PerformanceInput {
    PerformanceInput {
        url: "https://x.com".to_string(),
        current_score: score,
        metrics: PerformanceMetrics {
            first_contentful_paint: 1800.0,
            largest_contentful_paint: 3200.0,
            cumulative_layout_shift: 0.12,
            first_input_delay: None,
            speed_index: 4100.0,
            time_to_interactive: 5200.0,
        },
        opportunities: vec![Opportunity {
            id: "unused-js".to_string(),
            title: "Remove unused JavaScript".to_string(),
            description: "Trim dead bundles".to_string(),
            savings: None,
        }],
        platform: Platform::Educational,
        target_audience: "students".to_string(),
        primary_goals: vec!["user engagement".to_string()],
    }
}

#[tokio::test]
async fn failing_model_resolves_with_fallback_not_error() {
    let mock = Arc::new(MockModel::failing());
    let ctx = FlowContext::new(mock.clone());
    let flow = performance_optimization::flow().unwrap();

    let outcome = flow.execute(&ctx, perf_input(40.0)).await.unwrap();
    assert!(outcome.is_fallback());
    let output = outcome.into_output();
    assert_eq!(output.overall_assessment.current_grade, Grade::F);
    assert_eq!(output.overall_assessment.priority_level, Priority::Critical);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn empty_model_result_is_treated_as_failure() {
    let ctx = FlowContext::new(Arc::new(MockModel::empty()));
    let flow = q_and_a::flow().unwrap();
    let outcome = flow
        .execute(
            &ctx,
            QAndAInput {
                topic: "Gravity".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(outcome.is_fallback());
}

#[tokio::test]
async fn schema_valid_model_payload_is_returned_untagged_as_model() {
    let payload = json!({"questionsAndAnswers": "Q: From the model?\nA: Yes."});
    let mock = Arc::new(MockModel::with_payload(payload));
    let ctx = FlowContext::new(mock.clone());
    let flow = q_and_a::flow().unwrap();

    let outcome = flow
        .execute(
            &ctx,
            QAndAInput {
                topic: "Gravity".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(!outcome.is_fallback());
    assert_eq!(
        outcome.output().questions_and_answers,
        "Q: From the model?\nA: Yes."
    );
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn invalid_model_payload_falls_back_instead_of_erroring() {
    // Right shape name, wrong type: questionsAndAnswers must be a string.
    let mock = Arc::new(MockModel::with_payload(json!({"questionsAndAnswers": 42})));
    let ctx = FlowContext::new(mock.clone());
    let flow = q_and_a::flow().unwrap();

    let outcome = flow
        .execute(
            &ctx,
            QAndAInput {
                topic: "Sets".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(outcome.is_fallback());
    assert!(outcome.output().questions_and_answers.contains("Sets"));
}

#[tokio::test]
async fn invalid_input_rejects_before_any_model_call() {
    let mock = Arc::new(MockModel::with_payload(json!({})));
    let ctx = FlowContext::new(mock.clone());
    let flow = performance_optimization::flow().unwrap();

    let err = flow
        .execute(&ctx, perf_input(150.0))
        .await
        .expect_err("out-of-range score must be fatal");
    let FlowError::InvalidInput { flow, violation } = err;
    assert_eq!(flow, "performance_optimization");
    assert!(violation
        .violations()
        .iter()
        .any(|v| v.path == "currentScore" && v.constraint == "must be at most 100"));
    assert_eq!(mock.call_count(), 0, "no outbound call after a rejection");
}

struct SlowModel;

#[async_trait::async_trait]
impl ModelClient for SlowModel {
    async fn generate(
        &self,
        _request: &edugenius::ModelRequest,
    ) -> Result<edugenius::ModelResponse, ModelError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(ModelError::Empty)
    }
}

#[tokio::test(start_paused = true)]
async fn timed_out_model_call_falls_back() {
    let ctx = FlowContext::new(Arc::new(SlowModel)).with_timeout(Duration::from_millis(100));
    let flow = q_and_a::flow().unwrap();
    let outcome = flow
        .execute(
            &ctx,
            QAndAInput {
                topic: "Optics".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(matches!(outcome, FlowOutcome::Fallback(_)));
}
