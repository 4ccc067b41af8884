//! Typed decoding of raw analysis-service replies.
//!
//! Sentiment decoding is lenient: unknown labels are kept as
//! [`Sentiment::Other`]. Topic lists and comparative payloads must decode
//! exactly or produce [`AnalysisError::Format`].

use newsgauge_core::{CoverageDifference, Sentiment};
use serde::Deserialize;

use crate::error::AnalysisError;

/// Strip a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Map a classifier reply onto a [`Sentiment`].
///
/// Surrounding whitespace, quotes and a trailing period are ignored.
#[must_use]
pub fn decode_sentiment(raw: &str) -> Sentiment {
    let label = raw
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .trim_end_matches('.')
        .trim();
    Sentiment::from(label)
}

/// Parse a topic list from a JSON array of strings or a list literal with
/// single- or double-quoted items.
///
/// # Errors
///
/// Returns [`AnalysisError::Format`] when the reply is not such a list.
pub fn decode_topics(raw: &str) -> Result<Vec<String>, AnalysisError> {
    let body = strip_code_fences(raw);
    let topics = match serde_json::from_str::<Vec<String>>(body) {
        Ok(topics) => topics,
        Err(json_err) => parse_list_literal(body)
            .map_err(|reason| AnalysisError::format("topics", format!("{reason} (json: {json_err})")))?,
    };
    Ok(topics
        .into_iter()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect())
}

#[derive(Debug, Deserialize)]
struct ComparativePayload {
    #[serde(rename = "Coverage Differences")]
    coverage_differences: Vec<CoverageDifference>,
}

/// Parse the comparative narrative's `"Coverage Differences"` list.
///
/// # Errors
///
/// Returns [`AnalysisError::Format`] when the reply is not JSON of that shape.
pub fn decode_comparative(raw: &str) -> Result<Vec<CoverageDifference>, AnalysisError> {
    let body = strip_code_fences(raw);
    serde_json::from_str::<ComparativePayload>(body)
        .map(|payload| payload.coverage_differences)
        .map_err(|e| AnalysisError::format("comparative", e.to_string()))
}

/// Parses `['a', "b", ...]` with backslash escapes inside quoted items.
fn parse_list_literal(input: &str) -> Result<Vec<String>, String> {
    let mut chars = input.trim().chars().peekable();
    if chars.next() != Some('[') {
        return Err("expected '['".to_owned());
    }

    let mut items = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.next() {
            Some(']') => break,
            Some(quote @ ('\'' | '"')) => {
                items.push(read_quoted(&mut chars, quote)?);
                skip_whitespace(&mut chars);
                match chars.next() {
                    Some(',') => {}
                    Some(']') => break,
                    Some(c) => return Err(format!("unexpected '{c}' after item")),
                    None => return Err("unterminated list".to_owned()),
                }
            }
            Some(c) => return Err(format!("unexpected '{c}', expected a quoted item")),
            None => return Err("unterminated list".to_owned()),
        }
    }

    skip_whitespace(&mut chars);
    if let Some(c) = chars.next() {
        return Err(format!("trailing '{c}' after list"));
    }
    Ok(items)
}

fn read_quoted(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    quote: char,
) -> Result<String, String> {
    let mut item = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => item.push('\n'),
                Some('t') => item.push('\t'),
                Some(escaped) => item.push(escaped),
                None => break,
            },
            c if c == quote => return Ok(item),
            c => item.push(c),
        }
    }
    Err("unterminated string".to_owned())
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}
