//! Grounded question answering over a provided text.
//!
//! The fallback is extractive: it returns the passage sentence sharing the
//! most words with the question (first sentence wins ties), which is
//! deterministic and never invents content.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "text_answer";

const PROMPT: &str = "You are an expert at answering questions about a given text. Answer the following question based on the provided text:

Question: {{question}}

Text:
{{text}}

The output should be in the specified JSON format.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnswerInput {
    pub text: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnswerOutput {
    pub answer: String,
}

fn input_schema() -> Schema {
    Schema::object(
        "text_answer_input",
        vec![
            Field::string("text").describe("The text to answer a question about"),
            Field::string("question").describe("The question to answer"),
        ],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "text_answer_output",
        vec![Field::string("answer").describe("The answer to the question")],
    )
}

fn words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
        .map(str::to_lowercase)
        .collect()
}

fn fallback(input: &TextAnswerInput, _clock: &dyn Clock) -> TextAnswerOutput {
    let question_words = words(&input.question);
    let mut best: Option<(&str, usize)> = None;
    for sentence in input.text.split_inclusive(['.', '!', '?']) {
        let overlap = words(sentence)
            .iter()
            .filter(|w| question_words.contains(w))
            .count();
        if overlap > 0 && best.map_or(true, |(_, score)| overlap > score) {
            best = Some((sentence.trim(), overlap));
        }
    }
    TextAnswerOutput {
        answer: match best {
            Some((sentence, _)) => format!(
                "The text's most relevant passage is: \"{sentence}\""
            ),
            None => "The provided text does not directly answer this question.".to_string(),
        },
    }
}

pub fn flow() -> Result<Flow<TextAnswerInput, TextAnswerOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<TextAnswerInput, TextAnswerOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}
