//! Key takeaway extraction.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "key_takeaways";

const PROMPT: &str = "You are an expert at extracting key takeaways from a text. Extract the 5 most important key takeaways from the following text:

{{text}}

The output should be in the specified JSON format.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyTakeawaysInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Takeaway {
    pub takeaway: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyTakeawaysOutput {
    pub takeaways: Vec<Takeaway>,
}

fn input_schema() -> Schema {
    Schema::object(
        "key_takeaways_input",
        vec![Field::string("text").describe("The text to extract key takeaways from")],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "key_takeaways_output",
        vec![Field::object_array(
            "takeaways",
            vec![Field::string("takeaway").describe("A key takeaway from the text")],
        )
        .describe("A list of key takeaways")],
    )
}

/// Sentences shorter than this are unlikely to carry a full idea.
const MIN_SENTENCE_CHARS: usize = 30;

fn fallback(input: &KeyTakeawaysInput, _clock: &dyn Clock) -> KeyTakeawaysOutput {
    let takeaways: Vec<Takeaway> = input
        .text
        .split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .take(5)
        .map(|s| Takeaway {
            takeaway: s.to_string(),
        })
        .collect();

    if takeaways.is_empty() {
        return KeyTakeawaysOutput {
            takeaways: vec![Takeaway {
                takeaway:
                    "The text was too short for automatic extraction; re-read it and note the one sentence you would quote to a friend."
                        .to_string(),
            }],
        };
    }
    KeyTakeawaysOutput { takeaways }
}

pub fn flow() -> Result<Flow<KeyTakeawaysInput, KeyTakeawaysOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<KeyTakeawaysInput, KeyTakeawaysOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}
