//! Q&A generation for self-testing.
//!
//! The output is free text in `Q:` / `A:` form; callers pair it with
//! [`crate::qa::parse_qa_pairs`] (and [`crate::qa::pairs_or_raw`] for the
//! raw-response wrapping behavior). The fallback emits marker-formatted text
//! so the parser always succeeds on it.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "q_and_a";

const PROMPT: &str = "You are an AI learning assistant. Your task is to generate a list of potential questions and answers related to the given topic, so that students can use them for self-testing and preparation.

Topic: {{{topic}}}

Questions and Answers:";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QAndAInput {
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QAndAOutput {
    pub questions_and_answers: String,
}

fn input_schema() -> Schema {
    Schema::object(
        "q_and_a_input",
        vec![Field::string("topic")
            .describe("The topic for which to generate questions and answers")],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "q_and_a_output",
        vec![Field::string("questionsAndAnswers")
            .describe("A list of questions and answers related to the topic")],
    )
}

fn fallback(input: &QAndAInput, _clock: &dyn Clock) -> QAndAOutput {
    let topic = &input.topic;
    QAndAOutput {
        questions_and_answers: format!(
            "Q: What is {topic}?\nA: Start from your textbook's definition of {topic} and restate it in your own words.\n\nQ: Why is {topic} important?\nA: List two situations where {topic} is applied and what would go wrong without it.\n\nQ: How would you explain {topic} to a classmate?\nA: Use one everyday analogy and one worked example."
        ),
    }
}

pub fn flow() -> Result<Flow<QAndAInput, QAndAOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(prompt: &str) -> Result<Flow<QAndAInput, QAndAOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}
