//! Practice-test generation: MCQ, short-answer, or long-answer papers.
//!
//! Only the array matching the requested question type is populated, matching
//! the original contract where `mcqs`, `shortQuestions`, and `longQuestions`
//! are mutually optional.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "test_builder";

const PROMPT: &str = "You are an expert test generator. Generate a practice test with {{numberOfQuestions}} questions of '{{questionType}}' type, tailored to the student's needs based on the following parameters:

Curriculum Level: {{curriculumLevel}}
{{#if board}}Board: {{board}}{{/if}}
Subject: {{subject}}
Topic: {{topic}}
Difficulty Level: {{difficultyLevel}}
Medium: {{medium}}
Question Type: {{questionType}}

The test questions should be challenging and designed to assess the student's understanding of the material. Each question should have a clear and concise answer.

- If the question type is 'mcq', generate multiple-choice questions. Each question must have 4 options and one correct answer. The output should be in the 'mcqs' array.
- If the question type is 'short', generate short answer questions. The output should be in the 'shortQuestions' array.
- If the question type is 'long', generate long answer questions. The output should be in the 'longQuestions' array.

Output the questions and answers in the specified JSON format.
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    English,
    Urdu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Mcq,
    Short,
    Long,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestBuilderInput {
    pub subject: String,
    pub topic: String,
    pub difficulty_level: Difficulty,
    #[serde(default = "default_question_count")]
    pub number_of_questions: u32,
    pub curriculum_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    pub medium: Medium,
    pub question_type: QuestionType,
}

fn default_question_count() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mcq {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestBuilderOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcqs: Option<Vec<Mcq>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_questions: Option<Vec<StandardQuestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_questions: Option<Vec<StandardQuestion>>,
}

fn input_schema() -> Schema {
    Schema::object(
        "test_builder_input",
        vec![
            Field::string("subject").describe("The subject of the test"),
            Field::string("topic").describe("The topic of the test"),
            Field::enumeration("difficultyLevel", &["easy", "medium", "hard"])
                .describe("The difficulty level of the test"),
            Field::integer("numberOfQuestions")
                .min(1.0)
                .default_value(json!(10))
                .describe("The number of questions to generate for the test"),
            Field::string("curriculumLevel")
                .describe("The curriculum level for the test (e.g., Grade 12, Graduation)"),
            Field::string("board")
                .optional()
                .describe("The educational board (e.g., Sindh, Punjab, Federal)"),
            Field::enumeration("medium", &["english", "urdu"])
                .describe("The language medium for the test"),
            Field::enumeration("questionType", &["mcq", "short", "long"])
                .describe("The type of questions (e.g., MCQ, Short, Long)"),
        ],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "test_builder_output",
        vec![
            Field::object_array(
                "mcqs",
                vec![
                    Field::string("question").describe("The multiple-choice question"),
                    Field::string_array("options")
                        .describe("An array of 4-5 options for the question"),
                    Field::string("answer").describe("The correct option"),
                ],
            )
            .optional()
            .describe("An array of multiple-choice questions"),
            Field::object_array(
                "shortQuestions",
                vec![
                    Field::string("question").describe("The test question"),
                    Field::string("answer").describe("The detailed answer to the test question"),
                ],
            )
            .optional()
            .describe("An array of short answer questions"),
            Field::object_array(
                "longQuestions",
                vec![
                    Field::string("question").describe("The test question"),
                    Field::string("answer").describe("The detailed answer to the test question"),
                ],
            )
            .optional()
            .describe("An array of long answer questions"),
        ],
    )
}

/// The fallback caps its paper at five questions per request.
const FALLBACK_QUESTION_CAP: u32 = 5;

fn fallback(input: &TestBuilderInput, _clock: &dyn Clock) -> TestBuilderOutput {
    let count = input.number_of_questions.clamp(1, FALLBACK_QUESTION_CAP);
    let topic = &input.topic;
    let subject = &input.subject;

    match input.question_type {
        QuestionType::Mcq => {
            let mcqs = (1..=count)
                .map(|i| {
                    let options = vec![
                        format!("The statement about {topic} in your textbook definition"),
                        format!("A common misconception about {topic}"),
                        format!("A fact from a different chapter of {subject}"),
                        "None of the above".to_string(),
                    ];
                    Mcq {
                        question: format!(
                            "({i}) Which statement about {topic} is correct at {} level?",
                            input.curriculum_level
                        ),
                        answer: options[0].clone(),
                        options,
                    }
                })
                .collect();
            TestBuilderOutput {
                mcqs: Some(mcqs),
                short_questions: None,
                long_questions: None,
            }
        }
        QuestionType::Short => TestBuilderOutput {
            mcqs: None,
            short_questions: Some(standard_questions(input, count, "in 3-4 sentences")),
            long_questions: None,
        },
        QuestionType::Long => TestBuilderOutput {
            mcqs: None,
            short_questions: None,
            long_questions: Some(standard_questions(input, count, "in detail, with examples")),
        },
    }
}

fn standard_questions(
    input: &TestBuilderInput,
    count: u32,
    style: &str,
) -> Vec<StandardQuestion> {
    let stems = [
        "Define and explain",
        "Compare and contrast the main ideas of",
        "Describe a real-world application of",
        "Summarize the key principles of",
        "Explain the importance of",
    ];
    (0..count as usize)
        .map(|i| StandardQuestion {
            question: format!(
                "({}) {} {} {style}.",
                i + 1,
                stems[i % stems.len()],
                input.topic
            ),
            answer: format!(
                "Consult the {} chapter on {}: a complete answer states the definition, gives one example, and links it back to the question.",
                input.subject, input.topic
            ),
        })
        .collect()
}

pub fn flow() -> Result<Flow<TestBuilderInput, TestBuilderOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<TestBuilderInput, TestBuilderOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    fn sample(question_type: QuestionType) -> TestBuilderInput {
        TestBuilderInput {
            subject: "Physics".to_string(),
            topic: "Ohm's law".to_string(),
            difficulty_level: Difficulty::Medium,
            number_of_questions: 10,
            curriculum_level: "Grade 12".to_string(),
            board: Some("Sindh".to_string()),
            medium: Medium::English,
            question_type,
        }
    }

    #[test]
    fn fallback_fills_only_the_requested_arm() {
        let mcq = fallback(&sample(QuestionType::Mcq), &SystemClock);
        assert!(mcq.mcqs.is_some());
        assert!(mcq.short_questions.is_none() && mcq.long_questions.is_none());

        let short = fallback(&sample(QuestionType::Short), &SystemClock);
        assert!(short.short_questions.is_some());
        assert!(short.mcqs.is_none() && short.long_questions.is_none());
    }

    #[test]
    fn fallback_caps_question_count() {
        let out = fallback(&sample(QuestionType::Mcq), &SystemClock);
        assert_eq!(out.mcqs.unwrap().len(), 5);
    }

    #[test]
    fn fallback_mcq_answers_come_from_options() {
        let out = fallback(&sample(QuestionType::Mcq), &SystemClock);
        for q in out.mcqs.unwrap() {
            assert!(q.options.contains(&q.answer));
        }
    }

    #[test]
    fn input_schema_applies_question_count_default() {
        let value = serde_json::json!({
            "subject": "Physics",
            "topic": "Ohm's law",
            "difficultyLevel": "easy",
            "curriculumLevel": "Grade 12",
            "medium": "english",
            "questionType": "short",
        });
        let sanitized = input_schema().validate(&value).unwrap();
        assert_eq!(sanitized["numberOfQuestions"], serde_json::json!(10));
    }

    #[test]
    fn fallback_output_satisfies_output_schema() {
        let out = fallback(&sample(QuestionType::Long), &SystemClock);
        let value = serde_json::to_value(&out).unwrap();
        assert!(output_schema().validate(&value).is_ok());
    }
}
