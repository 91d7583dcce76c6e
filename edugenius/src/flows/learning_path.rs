//! Personalized learning path: typed study steps plus a daily routine.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "learning_path";

const PROMPT: &str = "You are an expert academic advisor for Pakistani students. Your task is to create a personalized, adaptive learning path.

A student has the following goal: \"{{goal}}\"
They have identified these topics as their weaknesses: {{#each weakTopics}} - {{this}} {{/each}}

Based on this, create a step-by-step learning plan. The plan should start with foundational concepts and gradually build up. Make sure to include steps that specifically address their weak topics. For each step, provide a clear action (study_chapter, watch_video, take_test) and a rationale.

Also, create a simple, realistic daily study routine that helps them build a consistent learning habit (streak).

Output the entire plan in the specified JSON format.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathInput {
    pub goal: String,
    pub weak_topics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    StudyChapter,
    WatchVideo,
    TakeTest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStep {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathOutput {
    pub learning_steps: Vec<LearningStep>,
    pub daily_routine: String,
}

pub const STEP_KINDS: &[&str] = &["study_chapter", "watch_video", "take_test"];

fn input_schema() -> Schema {
    Schema::object(
        "learning_path_input",
        vec![
            Field::string("goal").describe("The student's primary learning goal"),
            Field::string_array("weakTopics")
                .describe("A list of topics the student finds difficult"),
        ],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "learning_path_output",
        vec![
            Field::object_array(
                "learningSteps",
                vec![
                    Field::enumeration("type", STEP_KINDS).describe("The type of learning activity"),
                    Field::string("topic").describe("The specific topic for this step"),
                    Field::string("resource")
                        .optional()
                        .describe("A suggested resource, like a chapter number or video course name"),
                    Field::string("rationale")
                        .describe("A brief explanation of why this step is important"),
                ],
            )
            .describe("A sequence of recommended learning steps"),
            Field::string("dailyRoutine").describe("A suggested daily study schedule to follow"),
        ],
    )
}

fn fallback(input: &LearningPathInput, _clock: &dyn Clock) -> LearningPathOutput {
    let mut learning_steps = Vec::new();
    for topic in input.weak_topics.iter().take(3) {
        learning_steps.push(LearningStep {
            kind: StepKind::StudyChapter,
            topic: topic.clone(),
            resource: Some(format!("Textbook chapter covering {topic}")),
            rationale: format!("You marked {topic} as a weakness; rebuilding it from the chapter up closes the gap fastest."),
        });
        learning_steps.push(LearningStep {
            kind: StepKind::TakeTest,
            topic: topic.clone(),
            resource: None,
            rationale: format!("A short self-test on {topic} confirms the gap is actually closed."),
        });
    }
    if learning_steps.is_empty() {
        learning_steps.push(LearningStep {
            kind: StepKind::StudyChapter,
            topic: input.goal.clone(),
            resource: None,
            rationale: "With no weak topics listed, start from the syllabus for your goal and work through it in order.".to_string(),
        });
    }
    learning_steps.push(LearningStep {
        kind: StepKind::WatchVideo,
        topic: input.goal.clone(),
        resource: Some("Any reputable recorded course for your syllabus".to_string()),
        rationale: "A different explanation of the same material helps the concepts settle.".to_string(),
    });

    LearningPathOutput {
        learning_steps,
        daily_routine: format!(
            "45 minutes each evening: 25 minutes of study toward \"{}\", a 5 minute break, then 15 minutes of recall practice. Keep the streak; consistency beats cramming.",
            input.goal
        ),
    }
}

pub fn flow() -> Result<Flow<LearningPathInput, LearningPathOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<LearningPathInput, LearningPathOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[test]
    fn fallback_covers_each_weak_topic_with_study_and_test() {
        let input = LearningPathInput {
            goal: "Pass Matric Physics Exam".to_string(),
            weak_topics: vec!["Optics".to_string(), "Waves".to_string()],
        };
        let out = fallback(&input, &SystemClock);
        let optics: Vec<&LearningStep> = out
            .learning_steps
            .iter()
            .filter(|s| s.topic == "Optics")
            .collect();
        assert_eq!(optics.len(), 2);
        assert_eq!(optics[0].kind, StepKind::StudyChapter);
        assert_eq!(optics[1].kind, StepKind::TakeTest);
    }

    #[test]
    fn fallback_is_total_without_weak_topics_and_schema_valid() {
        let input = LearningPathInput {
            goal: "Learn algebra".to_string(),
            weak_topics: vec![],
        };
        let out = fallback(&input, &SystemClock);
        assert!(!out.learning_steps.is_empty());
        let value = serde_json::to_value(&out).unwrap();
        assert!(output_schema().validate(&value).is_ok());
    }

    #[test]
    fn step_kind_serializes_to_snake_case_literals() {
        let json = serde_json::to_value(StepKind::StudyChapter).unwrap();
        assert_eq!(json, serde_json::json!("study_chapter"));
    }
}
