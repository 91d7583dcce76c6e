//! Multiple-choice quiz generation from a source text.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "quiz";

const PROMPT: &str = "You are an expert quiz generator. Generate a quiz with 5 multiple-choice questions based on the following text:

{{text}}

Each question should have 4 options and one correct answer. The output should be in the specified JSON format.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOutput {
    pub quiz: Vec<QuizQuestion>,
}

fn input_schema() -> Schema {
    Schema::object(
        "quiz_input",
        vec![Field::string("text").describe("The text to generate a quiz from")],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "quiz_output",
        vec![Field::object_array(
            "quiz",
            vec![
                Field::string("question").describe("The quiz question"),
                Field::string_array("options").describe("An array of 4-5 options for the question"),
                Field::string("answer").describe("The correct option"),
            ],
        )
        .describe("A list of quiz questions")],
    )
}

/// First sentence of the text, truncated, for use inside question stems.
fn excerpt(text: &str) -> String {
    let first = text
        .split_inclusive(['.', '!', '?'])
        .next()
        .unwrap_or(text)
        .trim();
    let mut snippet: String = first.chars().take(80).collect();
    if first.chars().count() > 80 {
        snippet.push('…');
    }
    snippet
}

fn fallback(input: &QuizInput, _clock: &dyn Clock) -> QuizOutput {
    let snippet = excerpt(&input.text);
    let recall_options = vec![
        "It explains a concept or process".to_string(),
        "It tells a fictional story".to_string(),
        "It advertises a product".to_string(),
        "It is a legal document".to_string(),
    ];
    let strategy_options = vec![
        "Re-read it and summarize each paragraph in one line".to_string(),
        "Memorize it word for word".to_string(),
        "Skip it and hope for the best".to_string(),
        "Only read the last sentence".to_string(),
    ];
    let check_options = vec![
        "Explain the main idea to someone else in your own words".to_string(),
        "Count the number of words".to_string(),
        "Copy the text into your notes unchanged".to_string(),
        "Read it silently one more time".to_string(),
    ];
    QuizOutput {
        quiz: vec![
            QuizQuestion {
                question: format!(
                    "Based on the passage beginning \"{snippet}\", what kind of text is it most likely to be?"
                ),
                answer: recall_options[0].clone(),
                options: recall_options,
            },
            QuizQuestion {
                question: "Which study strategy works best for a passage like this one?".to_string(),
                answer: strategy_options[0].clone(),
                options: strategy_options,
            },
            QuizQuestion {
                question: "How can you check that you understood the passage?".to_string(),
                answer: check_options[0].clone(),
                options: check_options,
            },
        ],
    }
}

pub fn flow() -> Result<Flow<QuizInput, QuizOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(prompt: &str) -> Result<Flow<QuizInput, QuizOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}
