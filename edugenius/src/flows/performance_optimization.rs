//! Website performance optimization recommendations.
//!
//! Takes PageSpeed metrics and identified opportunities, returns an overall
//! assessment (letter grade, target grade, priority), Core Web Vitals
//! strategies, and a phased implementation plan. The fallback grades by fixed
//! score thresholds and conditions its first LCP recommendation on the
//! measured paint time.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "performance_optimization";

const PROMPT: &str = "You are an expert web performance optimization consultant specializing in {{platform}} platforms.

Website Analysis:
- URL: {{url}}
- Current Performance Score: {{currentScore}}/100
- Platform Type: {{platform}}
- Target Audience: {{targetAudience}}
- Primary Goals: {{primaryGoals}}

Current Performance Metrics:
- First Contentful Paint: {{metrics.firstContentfulPaint}}ms
- Largest Contentful Paint: {{metrics.largestContentfulPaint}}ms
- Cumulative Layout Shift: {{metrics.cumulativeLayoutShift}}
- First Input Delay: {{metrics.firstInputDelay}}ms
- Speed Index: {{metrics.speedIndex}}ms
- Time to Interactive: {{metrics.timeToInteractive}}ms

Identified Opportunities:
{{#each opportunities}}
- {{title}}: {{description}}{{#if savings}} (Potential savings: {{savings}}){{/if}}
{{/each}}

Please provide a comprehensive performance optimization strategy that includes:

1. **Overall Assessment**: Current grade, realistic target grade, priority level, and impact estimate
2. **Core Web Vitals Optimization**: Specific strategies for LCP, FID, and CLS improvements
3. **Implementation Plan**: Quick wins, short-term, and long-term strategies with expected results

Focus on:
- Actionable, specific recommendations
- Implementation difficulty and impact assessment
- Expected business/user experience outcomes
- Realistic timelines and expectations

For educational platforms specifically, consider:
- Student engagement and attention spans
- Mobile-first optimization for student devices
- Accessibility requirements
- Content delivery optimization for multimedia learning materials
- Real-time features like video streaming and interactive tools";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Educational,
    Ecommerce,
    Blog,
    Corporate,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub first_contentful_paint: f64,
    pub largest_contentful_paint: f64,
    pub cumulative_layout_shift: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_input_delay: Option<f64>,
    pub speed_index: f64,
    pub time_to_interactive: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInput {
    pub url: String,
    pub current_score: f64,
    pub metrics: PerformanceMetrics,
    pub opportunities: Vec<Opportunity>,
    pub platform: Platform,
    pub target_audience: String,
    pub primary_goals: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallAssessment {
    pub current_grade: Grade,
    pub target_grade: Grade,
    pub priority_level: Priority,
    pub impact_estimate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreWebVitalsOptimization {
    pub lcp_recommendations: Vec<String>,
    pub fid_recommendations: Vec<String>,
    pub cls_recommendations: Vec<String>,
    pub implementation_order: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedResults {
    pub score_improvement: String,
    pub user_experience_gains: Vec<String>,
    pub business_metrics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationPlan {
    pub quick_wins: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub expected_results: ExpectedResults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceOutput {
    pub overall_assessment: OverallAssessment,
    pub core_web_vitals_optimization: CoreWebVitalsOptimization,
    pub implementation_plan: ImplementationPlan,
}

pub const GRADES: &[&str] = &["A", "B", "C", "D", "F"];
pub const PRIORITIES: &[&str] = &["critical", "high", "medium", "low"];

fn input_schema() -> Schema {
    Schema::object(
        "performance_optimization_input",
        vec![
            Field::string("url").describe("The website URL to analyze for performance optimization"),
            Field::number("currentScore")
                .min(0.0)
                .max(100.0)
                .describe("Current PageSpeed Insights performance score"),
            Field::object(
                "metrics",
                vec![
                    Field::number("firstContentfulPaint")
                        .describe("First Contentful Paint time in milliseconds"),
                    Field::number("largestContentfulPaint")
                        .describe("Largest Contentful Paint time in milliseconds"),
                    Field::number("cumulativeLayoutShift")
                        .describe("Cumulative Layout Shift score"),
                    Field::number("firstInputDelay")
                        .optional()
                        .describe("First Input Delay time in milliseconds"),
                    Field::number("speedIndex").describe("Speed Index score"),
                    Field::number("timeToInteractive")
                        .describe("Time to Interactive in milliseconds"),
                ],
            )
            .describe("Current performance metrics from PageSpeed Insights"),
            Field::object_array(
                "opportunities",
                vec![
                    Field::string("id").describe("Opportunity identifier"),
                    Field::string("title").describe("Opportunity title"),
                    Field::string("description").describe("Opportunity description"),
                    Field::string("savings")
                        .optional()
                        .describe("Potential savings from this optimization"),
                ],
            )
            .describe("Performance improvement opportunities identified"),
            Field::enumeration("platform", &["educational", "ecommerce", "blog", "corporate", "other"])
                .describe("Type of website platform"),
            Field::string("targetAudience").describe("Primary target audience"),
            Field::string_array("primaryGoals").describe("Primary website goals"),
        ],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "performance_optimization_output",
        vec![
            Field::object(
                "overallAssessment",
                vec![
                    Field::enumeration("currentGrade", GRADES).describe("Current performance grade"),
                    Field::enumeration("targetGrade", GRADES).describe("Achievable target grade"),
                    Field::enumeration("priorityLevel", PRIORITIES)
                        .describe("Overall optimization priority"),
                    Field::string("impactEstimate")
                        .describe("Estimated impact on user experience and business goals"),
                ],
            )
            .describe("Overall performance assessment"),
            Field::object(
                "coreWebVitalsOptimization",
                vec![
                    Field::string_array("lcpRecommendations")
                        .describe("Specific recommendations for improving Largest Contentful Paint"),
                    Field::string_array("fidRecommendations")
                        .describe("Specific recommendations for improving First Input Delay"),
                    Field::string_array("clsRecommendations")
                        .describe("Specific recommendations for improving Cumulative Layout Shift"),
                    Field::string_array("implementationOrder")
                        .describe("Recommended order of implementation for maximum impact"),
                ],
            )
            .describe("Core Web Vitals specific optimization strategies"),
            Field::object(
                "implementationPlan",
                vec![
                    Field::string_array("quickWins")
                        .describe("Easy optimizations that can be implemented immediately"),
                    Field::string_array("shortTerm")
                        .describe("Optimizations to implement within 1-2 weeks"),
                    Field::string_array("longTerm")
                        .describe("Major optimizations for long-term performance gains"),
                    Field::object(
                        "expectedResults",
                        vec![
                            Field::string("scoreImprovement")
                                .describe("Expected PageSpeed score improvement"),
                            Field::string_array("userExperienceGains")
                                .describe("Expected user experience improvements"),
                            Field::string_array("businessMetrics")
                                .describe("Expected business/educational metric improvements"),
                        ],
                    )
                    .describe("Expected results from implementing the optimization plan"),
                ],
            )
            .describe("Comprehensive implementation roadmap"),
        ],
    )
}

/// Letter grade for a PageSpeed score: 90+ A, 80+ B, 70+ C, 50+ D, else F.
pub fn grade_for_score(score: f64) -> Grade {
    if score >= 90.0 {
        Grade::A
    } else if score >= 80.0 {
        Grade::B
    } else if score >= 70.0 {
        Grade::C
    } else if score >= 50.0 {
        Grade::D
    } else {
        Grade::F
    }
}

fn fallback(input: &PerformanceInput, _clock: &dyn Clock) -> PerformanceOutput {
    let score = input.current_score;
    let remaining = (100.0 - score).max(0.0);

    let lcp_lead = if input.metrics.largest_contentful_paint > 2500.0 {
        "Optimize server response time and implement CDN"
    } else {
        "Fine-tune existing LCP optimizations"
    };

    PerformanceOutput {
        overall_assessment: OverallAssessment {
            current_grade: grade_for_score(score),
            target_grade: if score < 50.0 {
                Grade::C
            } else if score < 70.0 {
                Grade::B
            } else {
                Grade::A
            },
            priority_level: if score < 50.0 {
                Priority::Critical
            } else if score < 70.0 {
                Priority::High
            } else {
                Priority::Medium
            },
            impact_estimate:
                "Significant improvement in user experience and performance metrics expected"
                    .to_string(),
        },
        core_web_vitals_optimization: CoreWebVitalsOptimization {
            lcp_recommendations: vec![
                lcp_lead.to_string(),
                "Implement image optimization and lazy loading".to_string(),
                "Minimize render-blocking resources".to_string(),
                "Use resource hints (preload, prefetch) for critical resources".to_string(),
            ],
            fid_recommendations: vec![
                "Minimize main thread work by code splitting".to_string(),
                "Remove or defer non-essential JavaScript".to_string(),
                "Implement efficient event handlers".to_string(),
                "Use web workers for heavy computations".to_string(),
            ],
            cls_recommendations: vec![
                "Set explicit dimensions for images and embeds".to_string(),
                "Reserve space for dynamically loaded content".to_string(),
                "Avoid inserting content above existing content".to_string(),
                "Use CSS transform animations instead of layout changes".to_string(),
            ],
            implementation_order: vec![
                "Address server response time issues".to_string(),
                "Implement image optimizations".to_string(),
                "Optimize JavaScript loading and execution".to_string(),
                "Fix layout stability issues".to_string(),
            ],
        },
        implementation_plan: ImplementationPlan {
            quick_wins: vec![
                "Enable text compression (gzip/brotli)".to_string(),
                "Optimize images with modern formats".to_string(),
                "Remove unused CSS and JavaScript".to_string(),
                "Implement browser caching headers".to_string(),
            ],
            short_term: vec![
                "Implement code splitting and lazy loading".to_string(),
                "Optimize third-party script loading".to_string(),
                "Set up CDN for static assets".to_string(),
                "Improve server response times".to_string(),
            ],
            long_term: vec![
                "Implement advanced caching strategies".to_string(),
                "Consider server-side rendering optimizations".to_string(),
                "Implement performance monitoring dashboard".to_string(),
                "Regular performance audits and optimization cycles".to_string(),
            ],
            expected_results: ExpectedResults {
                score_improvement: format!(
                    "Expected improvement: {}-{} points",
                    remaining.min(25.0).round() as i64,
                    remaining.min(40.0).round() as i64
                ),
                user_experience_gains: vec![
                    "Faster page load times".to_string(),
                    "Improved interactivity".to_string(),
                    "Better visual stability".to_string(),
                    "Enhanced mobile experience".to_string(),
                ],
                business_metrics: vec![
                    "Increased user engagement".to_string(),
                    "Higher conversion rates".to_string(),
                    "Improved SEO rankings".to_string(),
                    "Better user satisfaction scores".to_string(),
                ],
            },
        },
    }
}

pub fn flow() -> Result<Flow<PerformanceInput, PerformanceOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<PerformanceInput, PerformanceOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    fn sample_input(score: f64) -> PerformanceInput {
        PerformanceInput {
            url: "https://x.com".to_string(),
            current_score: score,
            metrics: PerformanceMetrics {
                first_contentful_paint: 1800.0,
                largest_contentful_paint: 3200.0,
                cumulative_layout_shift: 0.12,
                first_input_delay: Some(90.0),
                speed_index: 4100.0,
                time_to_interactive: 5200.0,
            },
            opportunities: vec![Opportunity {
                id: "uses-webp".to_string(),
                title: "Serve images in next-gen formats".to_string(),
                description: "Use WebP or AVIF".to_string(),
                savings: Some("1.2 s".to_string()),
            }],
            platform: Platform::Educational,
            target_audience: "students".to_string(),
            primary_goals: vec!["user engagement".to_string()],
        }
    }

    #[test]
    fn grade_banding_boundaries() {
        assert_eq!(grade_for_score(90.0), Grade::A);
        assert_eq!(grade_for_score(89.0), Grade::B);
        assert_eq!(grade_for_score(70.0), Grade::C);
        assert_eq!(grade_for_score(69.0), Grade::D);
        assert_eq!(grade_for_score(50.0), Grade::D);
        assert_eq!(grade_for_score(49.0), Grade::F);
    }

    #[test]
    fn fallback_for_failing_score_is_critical() {
        let out = fallback(&sample_input(40.0), &SystemClock);
        assert_eq!(out.overall_assessment.current_grade, Grade::F);
        assert_eq!(out.overall_assessment.priority_level, Priority::Critical);
        assert_eq!(out.overall_assessment.target_grade, Grade::C);
        assert_eq!(
            out.implementation_plan.expected_results.score_improvement,
            "Expected improvement: 25-40 points"
        );
    }

    #[test]
    fn fallback_lcp_lead_conditioned_on_paint_time() {
        let mut input = sample_input(75.0);
        let slow = fallback(&input, &SystemClock);
        assert!(slow.core_web_vitals_optimization.lcp_recommendations[0].contains("CDN"));

        input.metrics.largest_contentful_paint = 1900.0;
        let fast = fallback(&input, &SystemClock);
        assert!(fast.core_web_vitals_optimization.lcp_recommendations[0].contains("Fine-tune"));
    }

    #[test]
    fn fallback_output_satisfies_output_schema() {
        let out = fallback(&sample_input(62.0), &SystemClock);
        let value = serde_json::to_value(&out).unwrap();
        assert!(output_schema().validate(&value).is_ok());
    }

    #[test]
    fn input_schema_rejects_out_of_range_score() {
        let mut input = serde_json::to_value(sample_input(50.0)).unwrap();
        input["currentScore"] = serde_json::json!(101);
        let err = input_schema().validate(&input).unwrap_err();
        assert_eq!(err.violations()[0].path, "currentScore");
    }

    #[test]
    fn prompt_template_parses_and_binds_opportunities() {
        let flow = flow().unwrap();
        let input = serde_json::to_value(sample_input(55.0)).unwrap();
        let sanitized = flow.input_schema().validate(&input).unwrap();
        // The each-section emits one line per opportunity with the savings
        // conditional resolved against the element.
        let rendered = crate::prompt::Template::parse(super::PROMPT)
            .unwrap()
            .render(&sanitized);
        assert!(rendered.contains("- Serve images in next-gen formats: Use WebP or AVIF (Potential savings: 1.2 s)"));
        assert!(rendered.contains("Current Performance Score: 55/100"));
    }
}
