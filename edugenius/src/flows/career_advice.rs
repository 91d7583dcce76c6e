//! Career counseling: suggested fields plus a roadmap for the top path.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "career_advice";

const PROMPT: &str = "You are an expert career counselor for Pakistani students. Your task is to provide personalized career advice and a clear, actionable roadmap.

A student has the following profile:
- Current Education: {{currentEducation}}
- Interests: {{#each interests}} - {{this}} {{/each}}
- Strengths: {{#each strengths}} - {{this}} {{/each}}

First, suggest 3-5 potential career fields that align with their profile. For each suggestion, provide a short reason.

Second, for the single BEST career path from your suggestions, create a detailed, step-by-step roadmap. The roadmap should start from their current education level and guide them on what to study next, what skills to acquire, and what kind of projects to build. Be specific and provide resource suggestions if possible. For example, if you suggest \"Data Scientist\", the roadmap should be like \"How to become a Data Scientist after {{currentEducation}}\".

Output the entire response in the specified JSON format.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerAdviceInput {
    pub interests: Vec<String>,
    pub strengths: Vec<String>,
    pub current_education: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerSuggestion {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCareerRoadmap {
    pub career: String,
    pub roadmap: Vec<RoadmapStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerAdviceOutput {
    pub suggested_careers: Vec<CareerSuggestion>,
    pub top_career_roadmap: TopCareerRoadmap,
}

fn input_schema() -> Schema {
    Schema::object(
        "career_advice_input",
        vec![
            Field::string_array("interests")
                .describe("A list of subjects or topics the student is interested in"),
            Field::string_array("strengths")
                .describe("A list of subjects or skills the student is good at"),
            Field::string("currentEducation")
                .describe("The student's current level of education"),
        ],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "career_advice_output",
        vec![
            Field::object_array(
                "suggestedCareers",
                vec![
                    Field::string("field").describe("The suggested career field"),
                    Field::string("reason")
                        .describe("A brief explanation of why this field is a good fit"),
                ],
            )
            .describe("A list of 3-5 career suggestions"),
            Field::object(
                "topCareerRoadmap",
                vec![
                    Field::string("career").describe("The top recommended career path"),
                    Field::object_array(
                        "roadmap",
                        vec![
                            Field::integer("step"),
                            Field::string("title").describe("The title of this step in the roadmap"),
                            Field::string("description")
                                .describe("A detailed description of what to do in this step"),
                            Field::string_array("resources")
                                .optional()
                                .describe("A list of recommended resources"),
                        ],
                    )
                    .describe("A detailed step-by-step plan to achieve this career"),
                ],
            )
            .describe("A detailed roadmap for the most suitable career path"),
        ],
    )
}

fn fallback(input: &CareerAdviceInput, _clock: &dyn Clock) -> CareerAdviceOutput {
    let lead_interest = input
        .interests
        .first()
        .cloned()
        .unwrap_or_else(|| "your strongest subject".to_string());
    let lead_strength = input
        .strengths
        .first()
        .cloned()
        .unwrap_or_else(|| "consistent study habits".to_string());

    let mut suggested_careers: Vec<CareerSuggestion> = input
        .interests
        .iter()
        .take(3)
        .map(|interest| CareerSuggestion {
            field: format!("Specialist in {interest}"),
            reason: format!(
                "Builds directly on your stated interest in {interest} and your strength in {lead_strength}."
            ),
        })
        .collect();
    if suggested_careers.is_empty() {
        suggested_careers.push(CareerSuggestion {
            field: "Generalist with a teaching focus".to_string(),
            reason: format!(
                "With {lead_strength}, teaching keeps your options open while you discover a specialty."
            ),
        });
    }

    let career = suggested_careers[0].field.clone();
    CareerAdviceOutput {
        top_career_roadmap: TopCareerRoadmap {
            career: career.clone(),
            roadmap: vec![
                RoadmapStep {
                    step: 1,
                    title: format!("Finish {} with strong grades", input.current_education),
                    description: format!(
                        "Your current stage ({}) is the foundation; prioritise the subjects closest to {lead_interest}.",
                        input.current_education
                    ),
                    resources: None,
                },
                RoadmapStep {
                    step: 2,
                    title: format!("Take one structured course on {lead_interest}"),
                    description:
                        "Pick a single beginner course and complete it end to end before sampling others."
                            .to_string(),
                    resources: Some(vec![
                        "Khan Academy".to_string(),
                        "Coursera free audit tracks".to_string(),
                    ]),
                },
                RoadmapStep {
                    step: 3,
                    title: "Build two small projects".to_string(),
                    description: format!(
                        "Apply what you learned to projects you can show: anything concrete in {lead_interest} beats certificates alone."
                    ),
                    resources: None,
                },
                RoadmapStep {
                    step: 4,
                    title: "Find a mentor or community".to_string(),
                    description: format!(
                        "Join a local or online community around {career} and ask someone a year ahead of you to review your plan."
                    ),
                    resources: None,
                },
            ],
        },
        suggested_careers,
    }
}

pub fn flow() -> Result<Flow<CareerAdviceInput, CareerAdviceOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<CareerAdviceInput, CareerAdviceOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[test]
    fn fallback_suggests_per_interest_and_roadmap_steps_are_numbered() {
        let input = CareerAdviceInput {
            interests: vec!["mathematics".to_string(), "computers".to_string()],
            strengths: vec!["problem solving".to_string()],
            current_education: "Matric Science".to_string(),
        };
        let out = fallback(&input, &SystemClock);
        assert_eq!(out.suggested_careers.len(), 2);
        let steps: Vec<u32> = out.top_career_roadmap.roadmap.iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![1, 2, 3, 4]);
    }

    #[test]
    fn fallback_is_total_on_empty_interest_lists() {
        let input = CareerAdviceInput {
            interests: vec![],
            strengths: vec![],
            current_education: "A-Levels".to_string(),
        };
        let out = fallback(&input, &SystemClock);
        assert!(!out.suggested_careers.is_empty());
        let value = serde_json::to_value(&out).unwrap();
        assert!(output_schema().validate(&value).is_ok());
    }
}
