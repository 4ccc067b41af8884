//! HTML text extraction helpers for news article pages.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Paragraphs shorter than this are navigation, bylines or captions.
const MIN_PARAGRAPH_LEN: usize = 40;

static NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript|nav|footer|header|aside|form)\b[^>]*>.*?</(script|style|noscript|nav|footer|header|aside|form)>")
        .expect("valid noise block regex")
});
static OG_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta[^>]+property\s*=\s*["']og:title["'][^>]+content\s*=\s*["'](.*?)["'][^>]*>"#)
        .expect("valid og title regex")
});
static OG_TITLE_SWAPPED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta[^>]+content\s*=\s*["'](.*?)["'][^>]+property\s*=\s*["']og:title["'][^>]*>"#)
        .expect("valid og title fallback regex")
});
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("valid h1 regex"));
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p>").expect("valid paragraph regex"));
static JSON_LD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid json-ld script regex")
});
static TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));

/// Best available headline: `og:title`, then `<title>`, then the first `<h1>`.
pub(super) fn extract_title(html: &str) -> String {
    for re in [&*OG_TITLE_RE, &*OG_TITLE_SWAPPED_RE, &*TITLE_RE, &*H1_RE] {
        if let Some(cap) = re.captures(html) {
            let title = clean_text(cap.get(1).map_or("", |m| m.as_str()));
            if !title.is_empty() {
                return title;
            }
        }
    }
    String::new()
}

/// Article body as blank-line separated paragraphs.
///
/// Uses `<p>` elements outside of script/nav/footer blocks; falls back to
/// the longest JSON-LD `articleBody` when the markup has no usable
/// paragraphs. Returns an empty string when neither yields text.
pub(super) fn extract_body(html: &str) -> String {
    let stripped = NOISE_RE.replace_all(html, " ");
    let paragraphs: Vec<String> = PARAGRAPH_RE
        .captures_iter(&stripped)
        .filter_map(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
        .filter(|p| p.chars().count() >= MIN_PARAGRAPH_LEN)
        .collect();

    if !paragraphs.is_empty() {
        return paragraphs.join("\n\n");
    }

    extract_json_ld_body(html).unwrap_or_default()
}

fn extract_json_ld_body(html: &str) -> Option<String> {
    let mut best = String::new();
    for cap in JSON_LD_RE.captures_iter(html) {
        let raw = cap.get(1).map_or("", |m| m.as_str()).trim();
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            continue;
        };
        let mut bodies = Vec::new();
        collect_article_bodies(&value, &mut bodies);
        if let Some(longest) = bodies.into_iter().max_by_key(String::len) {
            if longest.len() > best.len() {
                best = longest;
            }
        }
    }
    (!best.is_empty()).then_some(best)
}

fn collect_article_bodies(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(body) = map.get("articleBody").and_then(Value::as_str) {
                let cleaned = clean_text(body);
                if !cleaned.is_empty() {
                    out.push(cleaned);
                }
            }
            for child in map.values() {
                collect_article_bodies(child, out);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_article_bodies(child, out);
            }
        }
        _ => {}
    }
}

/// Strip tags, decode common entities and collapse whitespace.
pub(super) fn clean_text(input: &str) -> String {
    let no_tags = TAGS_RE.replace_all(input, " ");
    decode_entities(&no_tags)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(input: &str) -> String {
    const ENTITIES: &[(&str, &str)] = &[
        ("&nbsp;", " "),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&#x27;", "'"),
        ("&apos;", "'"),
        ("&rsquo;", "\u{2019}"),
        ("&lsquo;", "\u{2018}"),
        ("&rdquo;", "\u{201d}"),
        ("&ldquo;", "\u{201c}"),
        ("&mdash;", "\u{2014}"),
        ("&ndash;", "\u{2013}"),
        ("&hellip;", "\u{2026}"),
        ("&lt;", "<"),
        ("&gt;", ">"),
    ];
    let mut out = input.to_string();
    for (entity, replacement) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, replacement);
        }
    }
    // Last, so "&amp;lt;" decodes to "&lt;" rather than "<".
    out.replace("&amp;", "&")
}
