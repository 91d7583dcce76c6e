//! Parse free-text Q&A responses into question/answer pairs.
//!
//! The Q&A flow asks the model for a plain-text list; this parser recognizes
//! `Q:` / `Q1:` / `1. Q:` question lines (case-insensitive) with an optional
//! immediately-following `A:`-style answer line. Parsing is pure and total:
//! text with no recognizable markers yields an empty list, and
//! [`pairs_or_raw`] wraps such a response as a single raw pair so the caller
//! still has something to show.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One parsed question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Matches `Q:`, `Q1:`, `1. Q:` at the start of a line.
static QUESTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(q\d*:|(\d+\.)\s*q:)").expect("question marker regex"));

/// Matches `A:`, `A1:`, `1. A:` at the start of a line.
static ANSWER_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(a\d*:|(\d+\.)\s*a:)").expect("answer marker regex"));

/// Extracts question/answer pairs from a free-text response.
///
/// A question line's answer is the next non-empty line when it carries an
/// answer marker; otherwise the answer stays empty. Idempotent: the same text
/// always yields the same pairs.
pub fn parse_qa_pairs(text: &str) -> Vec<QaPair> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut pairs = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if let Some(marker) = QUESTION_MARKER.find(lines[i]) {
            let question = lines[i][marker.end()..].trim().to_string();
            let mut answer = String::new();
            if i + 1 < lines.len() {
                if let Some(answer_marker) = ANSWER_MARKER.find(lines[i + 1]) {
                    answer = lines[i + 1][answer_marker.end()..].trim().to_string();
                    i += 1;
                }
            }
            pairs.push(QaPair { question, answer });
        }
        i += 1;
    }
    pairs
}

/// Label used when an unparseable response is wrapped as a single pair.
pub const RAW_RESPONSE_QUESTION: &str = "Raw AI Response";

/// Parses the response, falling back to one raw pair when no markers are
/// found in non-empty text. Empty text yields an empty list.
pub fn pairs_or_raw(text: &str) -> Vec<QaPair> {
    let pairs = parse_qa_pairs(text);
    if pairs.is_empty() && !text.trim().is_empty() {
        return vec![QaPair {
            question: RAW_RESPONSE_QUESTION.to_string(),
            answer: text.to_string(),
        }];
    }
    pairs
}
