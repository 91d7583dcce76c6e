//! Related learning resource suggestions.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::flow::Flow;
use crate::prompt::TemplateParseError;
use crate::schema::{Field, Schema};

pub const NAME: &str = "related_resources";

const PROMPT: &str = "You are an expert at suggesting related resources. Suggest 3-5 related resources (articles, books, or videos) for the following topic:

{{topic}}

The output should be in the specified JSON format.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedResourcesInput {
    pub topic: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Book,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedResourcesOutput {
    pub resources: Vec<Resource>,
}

fn input_schema() -> Schema {
    Schema::object(
        "related_resources_input",
        vec![Field::string("topic").describe("The topic to suggest related resources for")],
    )
}

fn output_schema() -> Schema {
    Schema::object(
        "related_resources_output",
        vec![Field::object_array(
            "resources",
            vec![
                Field::string("title").describe("The title of the resource"),
                Field::string("url").describe("The URL of the resource"),
                Field::enumeration("type", &["article", "book", "video"])
                    .describe("The type of the resource"),
            ],
        )
        .describe("A list of related resources")],
    )
}

fn fallback(input: &RelatedResourcesInput, _clock: &dyn Clock) -> RelatedResourcesOutput {
    let topic = input.topic.trim();
    let slug = topic.replace(' ', "_");
    let query = topic.replace(' ', "+");
    RelatedResourcesOutput {
        resources: vec![
            Resource {
                title: format!("{topic} (Wikipedia)"),
                url: format!("https://en.wikipedia.org/wiki/{slug}"),
                kind: ResourceKind::Article,
            },
            Resource {
                title: format!("Khan Academy lessons on {topic}"),
                url: format!("https://www.khanacademy.org/search?page_search_query={query}"),
                kind: ResourceKind::Video,
            },
            Resource {
                title: format!("Open Library books about {topic}"),
                url: format!("https://openlibrary.org/search?q={query}"),
                kind: ResourceKind::Book,
            },
        ],
    }
}

pub fn flow() -> Result<Flow<RelatedResourcesInput, RelatedResourcesOutput>, TemplateParseError> {
    flow_with_prompt(PROMPT)
}

pub fn flow_with_prompt(
    prompt: &str,
) -> Result<Flow<RelatedResourcesInput, RelatedResourcesOutput>, TemplateParseError> {
    Flow::new(NAME, input_schema(), output_schema(), prompt, fallback)
}
