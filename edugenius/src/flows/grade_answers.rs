//! Answer grading with a cheating analysis summary.
//!
//! The fallback grades by normalized string equality and computes the
//! percentage score with a zero-question guard, so it stays total on any
//! schema-valid input.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "grade_answers";

const PROMPT: &str = "You are an AI teacher. Your task is to grade the student's answers and also analyze for potential cheating.

First, for each question, determine if the student's answer is correct. For non-MCQ questions, the answer might be phrased differently but still be correct. Provide brief, constructive feedback for each answer, especially if it's incorrect.

Second, analyze the set of answers for any signs of academic dishonesty. Look for answers that seem copy-pasted, use vocabulary inconsistent with the student's level, or are suspiciously perfect. Take into account any warnings about tab-switching. Provide a brief cheating analysis summary.

Finally, calculate the total score as a percentage based on the number of correct answers.

Here are the questions and answers:
{{#each answers}}
- Question: {{this.question}}
- Correct Answer: {{this.correctAnswer}}
- Student's Answer: {{this.studentAnswer}}
---
{{/each}}

Provide the grading results in the specified JSON format.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
    pub question: String,
    pub correct_answer: String,
    pub student_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeAnswersInput {
    pub answers: Vec<QuestionAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAnswer {
    pub question: String,
    pub is_correct: bool,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAnswersOutput {
    pub score: f64,
    pub results: Vec<GradedAnswer>,
    pub cheating_analysis: String,
}

fn input_schema() -> Schema {
    Schema::object(
        "grade_answers_input",
        vec![Field::object_array(
            "answers",
            vec![
                Field::string("question"),
                Field::string("correctAnswer"),
                Field::string("studentAnswer"),
            ],
        )],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "grade_answers_output",
        vec![
            Field::number("score")
                .min(0.0)
                .max(100.0)
                .describe("The final score as a percentage"),
            Field::object_array(
                "results",
                vec![
                    Field::string("question"),
                    Field::boolean("isCorrect"),
                    Field::string("feedback"),
                ],
            )
            .describe("An array of graded answers with feedback"),
            Field::string("cheatingAnalysis")
                .describe("An analysis of the student's answers for any signs of cheating"),
        ],
    )
}

fn normalize(answer: &str) -> String {
    answer
        .trim()
        .to_lowercase()
        .trim_end_matches('.')
        .to_string()
}

fn fallback(input: &GradeAnswersInput, _clock: &dyn Clock) -> GradeAnswersOutput {
    let mut correct = 0usize;
    let mut verbatim_long = 0usize;
    let results: Vec<GradedAnswer> = input
        .answers
        .iter()
        .map(|qa| {
            let is_correct = normalize(&qa.student_answer) == normalize(&qa.correct_answer);
            if is_correct {
                correct += 1;
                if qa.student_answer.trim() == qa.correct_answer.trim()
                    && qa.correct_answer.trim().len() > 80
                {
                    verbatim_long += 1;
                }
            }
            GradedAnswer {
                question: qa.question.clone(),
                is_correct,
                feedback: if is_correct {
                    "Correct.".to_string()
                } else {
                    format!("Not quite. The expected answer was: {}", qa.correct_answer)
                },
            }
        })
        .collect();

    let total = input.answers.len();
    let score = if total == 0 {
        0.0
    } else {
        (correct as f64 / total as f64 * 100.0).round()
    };

    let cheating_analysis = if verbatim_long > 0 {
        format!(
            "{verbatim_long} long answer(s) match the expected text word for word, which can indicate copying; a manual review is recommended. No other automated checks were run."
        )
    } else {
        "Automated grading compared answers textually only; no signs of copying were detected, but no deeper analysis was available.".to_string()
    };

    GradeAnswersOutput {
        score,
        results,
        cheating_analysis,
    }
}

pub fn flow() -> Result<Flow<GradeAnswersInput, GradeAnswersOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<GradeAnswersInput, GradeAnswersOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}
