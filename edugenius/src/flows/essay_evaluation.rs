//! Essay evaluation: score, rubric feedback, improvement tips, sample essay.
//!
//! The fallback scores by length banding and conditions its feedback on cheap
//! text statistics (sentence length, paragraph count), so a student always
//! gets a complete evaluation even when the model is down.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "essay_evaluation";

const PROMPT: &str = "You are an expert English teacher and essay evaluator. A student has submitted an essay for review.

Your task is to perform a comprehensive evaluation of the following essay:
---
{{essayText}}
---

First, infer the topic of the essay.

Then, evaluate the essay based on the following criteria:
1.  **Grammar & Spelling:** Check for correctness.
2.  **Structure & Organization:** Assess the flow, paragraphing, and coherence.
3.  **Creativity & Originality:** Judge the uniqueness of ideas and expression.
4.  **Logic & Clarity:** Evaluate the strength of arguments and clarity of thought.

Provide a score out of 100.

Give specific, constructive feedback for each criterion. Also, provide a summary of overall comments and a list of actionable improvement tips.

Finally, write a short, A-grade sample essay on the same topic that the student can use as a reference.

Output the entire evaluation in the specified JSON format.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayInput {
    pub essay_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub grammar: String,
    pub structure: String,
    pub creativity: String,
    pub logic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayOutput {
    pub score: f64,
    pub feedback: Feedback,
    pub overall_comments: String,
    pub improvement_tips: Vec<String>,
    pub sample_essay: String,
}

fn input_schema() -> Schema {
    Schema::object(
        "essay_evaluation_input",
        vec![Field::string("essayText").describe("The full text of the student's essay")],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "essay_evaluation_output",
        vec![
            Field::number("score")
                .min(0.0)
                .max(100.0)
                .describe("The overall score for the essay out of 100"),
            Field::object(
                "feedback",
                vec![
                    Field::string("grammar").describe("Feedback on the essay's grammar and spelling"),
                    Field::string("structure")
                        .describe("Feedback on the essay's structure and organization"),
                    Field::string("creativity")
                        .describe("Feedback on the essay's creativity and originality"),
                    Field::string("logic")
                        .describe("Feedback on the essay's logic, arguments, and clarity"),
                ],
            ),
            Field::string("overallComments")
                .describe("A summary of the essay's strengths and weaknesses"),
            Field::string_array("improvementTips")
                .describe("Actionable tips for the student to improve their writing"),
            Field::string("sampleEssay")
                .describe("An A-grade sample essay on the same topic for comparison"),
        ],
    )
}

fn fallback(input: &EssayInput, _clock: &dyn Clock) -> EssayOutput {
    let text = input.essay_text.trim();
    let words = text.split_whitespace().count();
    let sentences = text.matches(['.', '!', '?']).count().max(1);
    let paragraphs = text.split("\n\n").filter(|p| !p.trim().is_empty()).count();
    let avg_sentence_len = words / sentences;

    let score = if words < 50 {
        40.0
    } else if words < 150 {
        55.0
    } else if words < 300 {
        65.0
    } else {
        75.0
    };

    let structure = if paragraphs >= 3 {
        "The essay is divided into paragraphs, which helps the flow; make sure each one carries a single idea."
    } else {
        "The essay reads as one block; split it into an introduction, body paragraphs, and a conclusion."
    };
    let logic = if avg_sentence_len > 25 {
        "Several sentences run long; shorter sentences will make your arguments easier to follow."
    } else {
        "Sentence length is manageable; focus on connecting each point back to your main argument."
    };

    EssayOutput {
        score,
        feedback: Feedback {
            grammar: "A detailed grammar check was not available; proofread once aloud to catch slips in tense and agreement.".to_string(),
            structure: structure.to_string(),
            creativity: "Add one concrete example or personal observation per main point to make the essay distinctly yours.".to_string(),
            logic: logic.to_string(),
        },
        overall_comments: format!(
            "The essay is about {words} words across {paragraphs} paragraph(s). It shows effort; the quickest wins are clearer paragraphing and stronger topic sentences."
        ),
        improvement_tips: vec![
            "Open each paragraph with a topic sentence stating its single idea.".to_string(),
            "Support every claim with an example or piece of evidence.".to_string(),
            "End with a conclusion that answers \"so what?\" rather than repeating the introduction.".to_string(),
        ],
        sample_essay: "A strong essay opens by taking a clear position in one sentence. Each body paragraph then advances a single supporting idea: a topic sentence, one concrete example, and a line linking the example back to the position. The conclusion does not repeat the introduction; it states what follows from the argument. Aim for that shape with your own topic and evidence.".to_string(),
    }
}

pub fn flow() -> Result<Flow<EssayInput, EssayOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(prompt: &str) -> Result<Flow<EssayInput, EssayOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[test]
    fn fallback_scores_by_length_banding() {
        let short = fallback(
            &EssayInput {
                essay_text: "Too short.".to_string(),
            },
            &SystemClock,
        );
        assert_eq!(short.score, 40.0);

        let medium_text = "word ".repeat(200);
        let medium = fallback(
            &EssayInput {
                essay_text: format!("{medium_text}."),
            },
            &SystemClock,
        );
        assert_eq!(medium.score, 65.0);
    }

    #[test]
    fn fallback_output_satisfies_output_schema() {
        let out = fallback(
            &EssayInput {
                essay_text: "An essay.\n\nWith two paragraphs.".to_string(),
            },
            &SystemClock,
        );
        assert!(!out.improvement_tips.is_empty());
        let value = serde_json::to_value(&out).unwrap();
        assert!(output_schema().validate(&value).is_ok());
    }

    #[test]
    fn fallback_is_total_on_empty_essay() {
        let out = fallback(
            &EssayInput {
                essay_text: String::new(),
            },
            &SystemClock,
        );
        assert_eq!(out.score, 40.0);
    }
}
