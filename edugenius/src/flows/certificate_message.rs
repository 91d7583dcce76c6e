//! Personalized certificate award messages.
//!
//! The fallback is the congratulation template from the certificate page; its
//! award-date line is the one place a fallback reads the clock, which is why
//! [`Clock`] is injected rather than read ambiently.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "certificate_message";

const PROMPT: &str = "Generate a short, encouraging, and personalized certificate message for a student named {{name}} who scored {{score}}% in {{subject}}.
The message should be 1-2 sentences long, professional, and encouraging.
Focus on their achievement and potential for future success.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateMessageInput {
    pub name: String,
    pub subject: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateMessageOutput {
    pub message: String,
}

fn input_schema() -> Schema {
    Schema::object(
        "certificate_message_input",
        vec![
            Field::string("name").describe("The student's name"),
            Field::string("subject").describe("The subject the certificate is for"),
            Field::number("score")
                .min(0.0)
                .max(100.0)
                .describe("The score achieved, as a percentage"),
        ],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "certificate_message_output",
        vec![Field::string("message").describe("The certificate message")],
    )
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{score}")
    }
}

fn fallback(input: &CertificateMessageInput, clock: &dyn Clock) -> CertificateMessageOutput {
    let date = clock.now().format("%B %-d, %Y");
    CertificateMessageOutput {
        message: format!(
            "Congratulations {} on completing the {} quiz with a score of {}%! Awarded on {}.",
            input.name,
            input.subject,
            format_score(input.score),
            date
        ),
    }
}

pub fn flow() -> Result<Flow<CertificateMessageInput, CertificateMessageOutput>, TemplateParseError>
{
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<CertificateMessageInput, CertificateMessageOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}
