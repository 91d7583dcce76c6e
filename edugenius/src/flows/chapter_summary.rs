//! Chapter summarization.
//!
//! The fallback is extractive: it keeps the opening sentences up to a fixed
//! length so the student still gets a usable digest.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "chapter_summary";

const PROMPT: &str = "You are an expert summarizer, able to extract the key points from a chapter of a textbook.

Please provide a concise summary of the following chapter text:

{{chapterText}}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummaryInput {
    pub chapter_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSummaryOutput {
    pub summary: String,
    pub progress: String,
}

fn input_schema() -> Schema {
    Schema::object(
        "chapter_summary_input",
        vec![Field::string("chapterText")
            .describe("The text content of the chapter to summarize")],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "chapter_summary_output",
        vec![
            Field::string("summary").describe("A summary of the key points in the chapter"),
            Field::string("progress").describe("Progress summary"),
        ],
    )
}

const FALLBACK_SUMMARY_BUDGET: usize = 400;

fn fallback(input: &ChapterSummaryInput, _clock: &dyn Clock) -> ChapterSummaryOutput {
    let text = input.chapter_text.trim();
    let mut summary = String::new();
    for sentence in text.split_inclusive(['.', '!', '?']) {
        if !summary.is_empty()
            && summary.chars().count() + sentence.chars().count() > FALLBACK_SUMMARY_BUDGET
        {
            break;
        }
        summary.push_str(sentence);
        if summary.chars().count() > FALLBACK_SUMMARY_BUDGET {
            break;
        }
    }
    let summary = summary.trim().to_string();
    ChapterSummaryOutput {
        summary: if summary.is_empty() {
            "The chapter text was empty, so there is nothing to summarize.".to_string()
        } else {
            format!("Opening of the chapter (automatic excerpt): {summary}")
        },
        progress: "Generated a summary of the chapter.".to_string(),
    }
}

pub fn flow() -> Result<Flow<ChapterSummaryInput, ChapterSummaryOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<ChapterSummaryInput, ChapterSummaryOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}
