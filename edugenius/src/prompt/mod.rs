//! Prompt templates: parse once into a token list, render per call.
//!
//! Templates use the placeholder grammar of the original prompt texts:
//! `{{field}}` / `{{a.b}}` substitution, one level of `{{#each field}}` over an
//! array (with `{{this}}` and element-relative placeholders inside), and one
//! level of `{{#if field}}` conditional emission. `{{{field}}}` is accepted as
//! a synonym for `{{field}}`.
//!
//! Parsing happens at startup and can fail with [`TemplateParseError`];
//! rendering is a pure, total walk of the token list: a placeholder whose
//! field is absent renders as the empty string, never an error. No escaping or
//! prompt-injection sanitization is applied to substituted values.

pub mod load;

use serde_json::Value;

/// A parsed prompt template.
#[derive(Debug, Clone)]
pub struct Template {
    tokens: Vec<Token>,
}

#[derive(Debug, Clone)]
enum Token {
    Literal(String),
    Placeholder(Vec<String>),
    Each { path: Vec<String>, body: Vec<Token> },
    If { path: Vec<String>, body: Vec<Token> },
}

/// Error from [`Template::parse`] (startup-time only).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateParseError {
    #[error("unterminated placeholder starting at byte {0}")]
    Unterminated(usize),
    #[error("empty placeholder")]
    EmptyPlaceholder,
    #[error("section `#{0}` has no matching close tag")]
    UnclosedSection(String),
    #[error("unexpected close tag `/{0}`")]
    UnexpectedClose(String),
    #[error("nested #each sections are not supported")]
    NestedEach,
}

impl Template {
    /// Parses the template source into tokens. Intended to run once at
    /// startup; flows hold the parsed value for the process lifetime.
    pub fn parse(source: &str) -> Result<Self, TemplateParseError> {
        let mut cursor = Cursor {
            source,
            position: 0,
        };
        let tokens = parse_tokens(&mut cursor, None, false)?;
        Ok(Self { tokens })
    }

    /// Substitutes `input` fields into the template. Pure and total: absent
    /// fields become empty strings, `#each` over a non-array emits nothing.
    pub fn render(&self, input: &Value) -> String {
        let mut out = String::new();
        render_tokens(&self.tokens, input, None, &mut out);
        out
    }
}

struct Cursor<'a> {
    source: &'a str,
    position: usize,
}

enum Tag {
    Placeholder(Vec<String>),
    OpenEach(Vec<String>),
    OpenIf(Vec<String>),
    Close(String),
}

fn parse_tokens(
    cursor: &mut Cursor<'_>,
    terminator: Option<&str>,
    inside_each: bool,
) -> Result<Vec<Token>, TemplateParseError> {
    let mut tokens = Vec::new();
    loop {
        let rest = &cursor.source[cursor.position..];
        let Some(offset) = rest.find("{{") else {
            if let Some(kind) = terminator {
                return Err(TemplateParseError::UnclosedSection(kind.to_string()));
            }
            if !rest.is_empty() {
                tokens.push(Token::Literal(rest.to_string()));
                cursor.position = cursor.source.len();
            }
            return Ok(tokens);
        };
        if offset > 0 {
            tokens.push(Token::Literal(rest[..offset].to_string()));
        }
        cursor.position += offset;

        match read_tag(cursor)? {
            Tag::Placeholder(path) => tokens.push(Token::Placeholder(path)),
            Tag::OpenEach(path) => {
                if inside_each {
                    return Err(TemplateParseError::NestedEach);
                }
                let body = parse_tokens(cursor, Some("each"), true)?;
                tokens.push(Token::Each { path, body });
            }
            Tag::OpenIf(path) => {
                let body = parse_tokens(cursor, Some("if"), inside_each)?;
                tokens.push(Token::If { path, body });
            }
            Tag::Close(kind) => {
                if terminator == Some(kind.as_str()) {
                    return Ok(tokens);
                }
                return Err(TemplateParseError::UnexpectedClose(kind));
            }
        }
    }
}

/// Reads one `{{...}}` (or `{{{...}}}`) tag at the cursor and advances past it.
fn read_tag(cursor: &mut Cursor<'_>) -> Result<Tag, TemplateParseError> {
    let start = cursor.position;
    let rest = &cursor.source[start..];
    let (open_len, close) = if rest.starts_with("{{{") {
        (3, "}}}")
    } else {
        (2, "}}")
    };
    let Some(end) = rest[open_len..].find(close) else {
        return Err(TemplateParseError::Unterminated(start));
    };
    let inner = rest[open_len..open_len + end].trim();
    cursor.position = start + open_len + end + close.len();

    if inner.is_empty() {
        return Err(TemplateParseError::EmptyPlaceholder);
    }
    if let Some(path) = inner.strip_prefix("#each") {
        return Ok(Tag::OpenEach(parse_path(path)?));
    }
    if let Some(path) = inner.strip_prefix("#if") {
        return Ok(Tag::OpenIf(parse_path(path)?));
    }
    if let Some(kind) = inner.strip_prefix('/') {
        return Ok(Tag::Close(kind.trim().to_string()));
    }
    Ok(Tag::Placeholder(parse_path(inner)?))
}

fn parse_path(raw: &str) -> Result<Vec<String>, TemplateParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TemplateParseError::EmptyPlaceholder);
    }
    Ok(raw.split('.').map(|s| s.trim().to_string()).collect())
}

fn render_tokens(tokens: &[Token], root: &Value, element: Option<&Value>, out: &mut String) {
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Placeholder(path) => {
                if let Some(value) = resolve(path, root, element) {
                    stringify(value, out);
                }
            }
            Token::Each { path, body } => {
                if let Some(Value::Array(items)) = resolve(path, root, element) {
                    for item in items {
                        render_tokens(body, root, Some(item), out);
                    }
                }
            }
            Token::If { path, body } => {
                if truthy(resolve(path, root, element)) {
                    render_tokens(body, root, element, out);
                }
            }
        }
    }
}

/// Resolves a dotted path. `this` refers to the current `#each` element;
/// other paths try the element first (when inside a section), then the root.
fn resolve<'a>(path: &[String], root: &'a Value, element: Option<&'a Value>) -> Option<&'a Value> {
    if path.first().map(String::as_str) == Some("this") {
        return walk(element?, &path[1..]);
    }
    if let Some(el) = element {
        if let Some(found) = walk(el, path) {
            return Some(found);
        }
    }
    walk(root, path)
}

fn walk<'a>(base: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let mut current = base;
    for segment in segments {
        current = current.get(segment)?;
    }
    Some(current)
}

fn stringify(value: &Value, out: &mut String) {
    match value {
        Value::Null | Value::Object(_) => {}
        Value::String(s) => out.push_str(s),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            // Whole floats print without the trailing ".0" so a 2500.0ms
            // metric reads as "2500" in the prompt.
            if let Some(i) = n.as_i64() {
                out.push_str(&i.to_string());
            } else if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    out.push_str(&(f as i64).to_string());
                } else {
                    out.push_str(&f.to_string());
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                stringify(item, out);
            }
        }
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Template, TemplateParseError};

    #[test]
    fn binds_a_simple_placeholder() {
        let template = Template::parse("Topic: {{topic}}").unwrap();
        assert_eq!(
            template.render(&json!({"topic": "Algebra"})),
            "Topic: Algebra"
        );
    }

    #[test]
    fn absent_field_renders_as_empty_string() {
        let template = Template::parse("Topic: {{topic}}").unwrap();
        assert_eq!(template.render(&json!({})), "Topic: ");
        assert_eq!(template.render(&json!({"topic": null})), "Topic: ");
    }

    #[test]
    fn triple_stache_is_a_plain_placeholder() {
        let template = Template::parse("Topic: {{{topic}}}").unwrap();
        assert_eq!(template.render(&json!({"topic": "Sets"})), "Topic: Sets");
    }

    #[test]
    fn nested_paths_resolve() {
        let template = Template::parse("FCP: {{metrics.firstContentfulPaint}}ms").unwrap();
        let input = json!({"metrics": {"firstContentfulPaint": 1800.0}});
        assert_eq!(template.render(&input), "FCP: 1800ms");
    }

    #[test]
    fn each_section_repeats_per_element() {
        let template = Template::parse("{{#each goals}}- {{this}}\n{{/each}}").unwrap();
        let input = json!({"goals": ["engagement", "learning outcomes"]});
        assert_eq!(
            template.render(&input),
            "- engagement\n- learning outcomes\n"
        );
    }

    #[test]
    fn each_over_objects_resolves_element_fields() {
        let template =
            Template::parse("{{#each opportunities}}- {{title}}: {{description}}{{#if savings}} (save {{savings}}){{/if}}\n{{/each}}")
                .unwrap();
        let input = json!({"opportunities": [
            {"title": "Compress images", "description": "use WebP", "savings": "1.2s"},
            {"title": "Defer JS", "description": "split bundles"},
        ]});
        assert_eq!(
            template.render(&input),
            "- Compress images: use WebP (save 1.2s)\n- Defer JS: split bundles\n"
        );
    }

    #[test]
    fn this_with_field_path_inside_each() {
        let template =
            Template::parse("{{#each answers}}Q: {{this.question}} A: {{this.studentAnswer}}\n{{/each}}").unwrap();
        let input = json!({"answers": [{"question": "2+2?", "studentAnswer": "4"}]});
        assert_eq!(template.render(&input), "Q: 2+2? A: 4\n");
    }

    #[test]
    fn each_over_missing_or_non_array_emits_nothing() {
        let template = Template::parse("[{{#each items}}x{{/each}}]").unwrap();
        assert_eq!(template.render(&json!({})), "[]");
        assert_eq!(template.render(&json!({"items": "oops"})), "[]");
    }

    #[test]
    fn if_section_checks_truthiness() {
        let template = Template::parse("{{#if board}}Board: {{board}}{{/if}}").unwrap();
        assert_eq!(
            template.render(&json!({"board": "Sindh"})),
            "Board: Sindh"
        );
        assert_eq!(template.render(&json!({"board": ""})), "");
        assert_eq!(template.render(&json!({})), "");
    }

    #[test]
    fn array_placeholder_joins_elements() {
        let template = Template::parse("Goals: {{primaryGoals}}").unwrap();
        let input = json!({"primaryGoals": ["engagement", "conversions"]});
        assert_eq!(template.render(&input), "Goals: engagement, conversions");
    }

    #[test]
    fn rendering_is_pure() {
        let template = Template::parse("{{a}} {{#each xs}}{{this}}{{/each}}").unwrap();
        let input = json!({"a": "v", "xs": [1, 2]});
        let first = template.render(&input);
        let second = template.render(&input);
        assert_eq!(first, second);
        assert_eq!(first, "v 12");
    }

    #[test]
    fn unbalanced_section_is_a_parse_error() {
        let err = Template::parse("{{#each xs}}no close").unwrap_err();
        assert_eq!(err, TemplateParseError::UnclosedSection("each".to_string()));

        let err = Template::parse("stray {{/if}}").unwrap_err();
        assert_eq!(err, TemplateParseError::UnexpectedClose("if".to_string()));
    }

    #[test]
    fn nested_each_is_rejected() {
        let err = Template::parse("{{#each a}}{{#each b}}{{/each}}{{/each}}").unwrap_err();
        assert_eq!(err, TemplateParseError::NestedEach);
    }

    #[test]
    fn unterminated_placeholder_is_a_parse_error() {
        let err = Template::parse("Topic: {{topic").unwrap_err();
        assert!(matches!(err, TemplateParseError::Unterminated(_)));
    }
}
