//! Marketing-site assistant: answers visitor questions about the platform.
//!
//! The feature context is baked into the template; the model is instructed to
//! decline anything off-topic, and the fallback answers with the same
//! steering line plus a feature overview.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "visitor_questions";

const APP_FEATURES_CONTEXT: &str = "EduGenius - Your AI-Powered Learning Co-Pilot for students in Pakistan.

Core Features:
1. Personalized AI Learning Paths: Analyzes goals, identifies weaknesses, and creates a custom study roadmap with daily routines.
2. AI Audio Generator: Converts text notes into downloadable, high-quality audio voice-overs.
3. Career Counseling & Skill Mapping: Suggests career paths based on interests and provides a step-by-step roadmap.
4. AI Essay Evaluator: Gives instant feedback on essays (grammar, structure, creativity, logic), a score, and an A-grade sample.
5. Chapter Summarizer & Q&A Generator: Summarizes long chapters and creates questions & answers from any topic.
6. AI Test Generator & Proctoring: Creates custom tests (MCQs, Short/Long Questions) with practice and secure exam modes, including optional AI proctoring to detect cheating.
7. Download Center: Allows users to download generated notes, summaries, and tests as TXT or PDF files.
8. Free Tech Courses: A curated library of free YouTube courses on web development, AI, and programming.
9. Community Hub & AI Tutor: An AI chatbot for instant doubt solving and a community discussion area.
10. Advanced Features: Voice assistant, custom API key support, smart search, and bookmarking.
11. Admin & Teacher Panels: Dashboards for system admins and teachers to manage users and classes.";

const STEERING_LINE: &str = "I can only answer questions about the EduGenius application. Would you like to know about its features, like the AI Test Generator or Career Counseling?";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorQuestionInput {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorQuestionOutput {
    pub answer: String,
}

fn input_schema() -> Schema {
    Schema::object(
        "visitor_questions_input",
        vec![Field::string("question").describe("The visitor's question about the app")],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "visitor_questions_output",
        vec![Field::string("answer").describe("The AI's answer to the visitor's question")],
    )
}

fn default_prompt() -> String {
    format!(
        "You are a friendly and helpful chatbot for a web app called \"EduGenius\". Your only purpose is to answer questions about what EduGenius is and what it can do.

Use the following context to answer the user's question. Be concise and helpful.

Context about EduGenius:
---
{APP_FEATURES_CONTEXT}
---

IMPORTANT: Do NOT answer any questions that are not related to EduGenius. If the user asks about anything else (e.g., \"what is the capital of France?\", \"write me a poem\", \"who are you?\"), you must politely decline and steer the conversation back to the app. For example, say: \"{STEERING_LINE}\"

Visitor's Question: \"{{{{question}}}}\"

Answer the question based *only* on the provided context."
    )
}

fn fallback(_input: &VisitorQuestionInput, _clock: &dyn Clock) -> VisitorQuestionOutput {
    VisitorQuestionOutput {
        answer: format!(
            "The assistant is briefly unavailable, but here is what EduGenius offers: personalized learning paths, an essay evaluator, career counseling, a test generator with proctoring, chapter summaries with Q&A, and an AI tutor. {STEERING_LINE}"
        ),
    }
}

pub fn flow() -> Result<Flow<VisitorQuestionInput, VisitorQuestionOutput>, TemplateParseError> {
    flow_with_prompt(&default_prompt())
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<VisitorQuestionInput, VisitorQuestionOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[test]
    fn default_prompt_embeds_context_and_question_placeholder() {
        let prompt = default_prompt();
        assert!(prompt.contains("Core Features:"));
        assert!(prompt.contains("{{question}}"));

        let template = crate::prompt::Template::parse(&prompt).unwrap();
        let rendered = template.render(&serde_json::json!({"question": "Is it free?"}));
        assert!(rendered.contains("Visitor's Question: \"Is it free?\""));
    }

    #[test]
    fn fallback_always_steers_back_to_the_app() {
        let out = fallback(
            &VisitorQuestionInput {
                question: "What is the capital of France?".to_string(),
            },
            &SystemClock,
        );
        assert!(out.answer.contains(STEERING_LINE));
        let value = serde_json::to_value(&out).unwrap();
        assert!(output_schema().validate(&value).is_ok());
    }
}
