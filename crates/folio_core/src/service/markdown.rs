//! Markdown body projections for cards and detail views.
//!
//! # Responsibility
//! - Derive plain-text previews for items authored without a summary.
//! - Extract `#`/`##` headings as a detail-page outline.
//! - Estimate reading time for articles without a label.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const WORDS_PER_MINUTE: usize = 200;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,2})[ \t]+(.+?)[ \t]*$").expect("valid heading regex"));

/// One heading of a markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// 1 for `#`, 2 for `##`.
    pub level: u8,
    pub text: String,
}

/// Plain-text preview: images dropped, links reduced to their text, markdown
/// symbols removed, whitespace collapsed, first `max_chars` chars kept.
///
/// Returns `None` when nothing readable remains.
pub fn derive_plain_preview(body: &str, max_chars: usize) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(body, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max_chars).collect())
}

/// Ordered `#`/`##` headings.
pub fn outline(body: &str) -> Vec<OutlineEntry> {
    HEADING_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
            let text = caps.get(2)?.as_str().trim().to_string();
            Some(OutlineEntry { level, text })
        })
        .collect()
}

/// `N min read`, at 200 words per minute, never below one minute.
pub fn estimate_read_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
