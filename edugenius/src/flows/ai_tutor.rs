//! AI tutor: step-by-step answers to student questions.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "ai_tutor";

const PROMPT: &str = "You are a friendly and knowledgeable AI Tutor for students in Pakistan. Your goal is to explain concepts clearly and simply.

A student has a question about the topic: \"{{topic}}\".

Student's Question: \"{{question}}\"

Please provide a clear, step-by-step answer to the student's question. If possible, use a simple analogy or example to help them understand. Keep the tone encouraging and supportive. Answer in the same language as the question if possible (English or Urdu).";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiTutorInput {
    pub topic: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiTutorOutput {
    pub answer: String,
}

fn input_schema() -> Schema {
    Schema::object(
        "ai_tutor_input",
        vec![
            Field::string("topic").describe("The topic of the question"),
            Field::string("question").describe("The student's question"),
        ],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "ai_tutor_output",
        vec![Field::string("answer").describe("The AI tutor's answer to the question")],
    )
}

fn fallback(input: &AiTutorInput, _clock: &dyn Clock) -> AiTutorOutput {
    AiTutorOutput {
        answer: format!(
            "The tutor is not reachable right now, but here is how to make progress on your own. Your question was: \"{}\". First, find the section on {} in your textbook and read the definition slowly, twice. Second, write the question in your own words; that usually reveals which part is unclear. Third, work one solved example from the book before attempting your question again. If it is still unclear, ask again in a little while.",
            input.question, input.topic
        ),
    }
}

pub fn flow() -> Result<Flow<AiTutorInput, AiTutorOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<AiTutorInput, AiTutorOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[test]
    fn fallback_echoes_topic_and_question() {
        let out = fallback(
            &AiTutorInput {
                topic: "Fractions".to_string(),
                question: "Why do we flip when dividing?".to_string(),
            },
            &SystemClock,
        );
        assert!(out.answer.contains("Fractions"));
        assert!(out.answer.contains("Why do we flip when dividing?"));
        let value = serde_json::to_value(&out).unwrap();
        assert!(output_schema().validate(&value).is_ok());
    }
}
