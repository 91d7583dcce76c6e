//! Lesson plan generation for teachers.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "lesson_plan";

const PROMPT: &str = "You are an expert instructional designer. Create a detailed lesson plan for a teacher based on the following parameters:

Topic: {{topic}}
Lesson Duration: {{duration}}
Learning Objective: {{objective}}

The lesson plan should be broken down into logical modules, each with a title, estimated duration, and a list of engaging activities suitable for a classroom.
Also, provide a creative suggestion for a final assessment to check for student understanding.

Output the entire lesson plan in the specified JSON format.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonPlanInput {
    pub topic: String,
    pub duration: String,
    pub objective: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonModule {
    pub title: String,
    pub duration: String,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlanOutput {
    pub lesson_title: String,
    pub modules: Vec<LessonModule>,
    pub assessment: String,
}

fn input_schema() -> Schema {
    Schema::object(
        "lesson_plan_input",
        vec![
            Field::string("topic").describe("The main topic for the lesson plan"),
            Field::string("duration").describe("The total duration of the lesson (e.g., 45 minutes)"),
            Field::string("objective").describe("The learning objective for this lesson"),
        ],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "lesson_plan_output",
        vec![
            Field::string("lessonTitle").describe("The overall title of the lesson"),
            Field::object_array(
                "modules",
                vec![
                    Field::string("title").describe("The title of the lesson module"),
                    Field::string("duration").describe("The estimated time for this module"),
                    Field::string_array("activities").describe("A list of activities for this module"),
                ],
            )
            .describe("An array of lesson modules"),
            Field::string("assessment").describe("A suggestion for how to assess student learning"),
        ],
    )
}

fn fallback(input: &LessonPlanInput, _clock: &dyn Clock) -> LessonPlanOutput {
    let topic = &input.topic;
    LessonPlanOutput {
        lesson_title: format!("Introduction to {topic}"),
        modules: vec![
            LessonModule {
                title: format!("Warm-up: what do we know about {topic}?"),
                duration: "10 minutes".to_string(),
                activities: vec![
                    "Quick-fire question round to surface prior knowledge".to_string(),
                    format!("Write one thing you want to learn about {topic} on the board"),
                ],
            },
            LessonModule {
                title: format!("Core concepts of {topic}"),
                duration: "20 minutes".to_string(),
                activities: vec![
                    "Teacher-led walkthrough of the key ideas with worked examples".to_string(),
                    "Pair discussion: explain each concept to your neighbour".to_string(),
                ],
            },
            LessonModule {
                title: "Practice and recap".to_string(),
                duration: "15 minutes".to_string(),
                activities: vec![
                    "Small-group practice problems of increasing difficulty".to_string(),
                    "One-sentence summary from each group".to_string(),
                ],
            },
        ],
        assessment: format!(
            "Exit ticket: each student explains \"{}\" in their own words and solves one practice question on {topic}.",
            input.objective
        ),
    }
}

pub fn flow() -> Result<Flow<LessonPlanInput, LessonPlanOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<LessonPlanInput, LessonPlanOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[test]
    fn fallback_output_satisfies_output_schema() {
        let input = LessonPlanInput {
            topic: "Photosynthesis".to_string(),
            duration: "45 minutes".to_string(),
            objective: "Describe how plants convert light into energy".to_string(),
        };
        let out = fallback(&input, &SystemClock);
        assert!(!out.modules.is_empty());
        assert!(out.modules.iter().all(|m| !m.activities.is_empty()));
        let value = serde_json::to_value(&out).unwrap();
        assert!(output_schema().validate(&value).is_ok());
    }

    #[test]
    fn input_schema_requires_all_fields() {
        let err = input_schema()
            .validate(&serde_json::json!({"topic": "Sets"}))
            .unwrap_err();
        let paths: Vec<&str> = err.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["duration", "objective"]);
    }
}
