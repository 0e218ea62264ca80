//! In-memory content query engine.
//!
//! # Responsibility
//! - Answer id lookups with an explicit not-found outcome.
//! - Filter by kind, case-insensitive substring text and equality predicates.
//! - Sort by date (newest first) or title, and derive related items.
//!
//! # Invariants
//! - Every operation is pure; inputs are never reordered in place.
//! - Results preserve authored order unless a sort is requested.
//! - Text matching is plain substring containment after lowercasing. The
//!   engine never trims the query; blank-query policy belongs to callers.
//! - Only `lookup` can fail; every other operation returns a possibly-empty
//!   sequence.

use crate::model::content::{ContentId, ContentItem, ContentKind, ProjectStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default cap for related-item derivation.
pub const RELATED_ITEMS_LIMIT: usize = 3;

/// Lookup failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No item has this id.
    NotFound { id: ContentId },
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "content not found: {id}"),
        }
    }
}

impl Error for LookupError {}

/// Which item fields a text query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFields {
    pub title: bool,
    pub summary: bool,
    /// Tags for articles, technologies for projects.
    pub labels: bool,
    /// Articles only; projects have no author.
    pub author: bool,
}

impl SearchFields {
    /// Site-wide search: title, summary and any label.
    pub const SITE: Self = Self {
        title: true,
        summary: true,
        labels: true,
        author: false,
    };

    /// Blog listing search box: title, summary and author.
    pub const ARTICLE_LIST: Self = Self {
        title: true,
        summary: true,
        labels: false,
        author: true,
    };

    /// Project listing search box: title and summary.
    pub const PROJECT_LIST: Self = Self {
        title: true,
        summary: true,
        labels: false,
        author: false,
    };
}

impl Default for SearchFields {
    fn default() -> Self {
        Self::SITE
    }
}

/// Exact-match clause combined with AND semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Kind(ContentKind),
    /// Exact, case-sensitive tag or technology label.
    Label(String),
    /// Never matches articles.
    Status(ProjectStatus),
    /// Exact author; never matches projects.
    Author(String),
}

impl Predicate {
    pub fn matches(&self, item: &ContentItem) -> bool {
        match self {
            Self::Kind(kind) => item.kind() == *kind,
            Self::Label(label) => item.labels().iter().any(|value| value == label),
            Self::Status(status) => item
                .as_project()
                .is_some_and(|project| project.status == *status),
            Self::Author(author) => item
                .as_article()
                .is_some_and(|article| article.author == *author),
        }
    }
}

/// Text query plus zero or more equality predicates, all ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    /// Substring query; `None` disables the text clause.
    pub text: Option<String>,
    pub fields: SearchFields,
    pub predicates: Vec<Predicate>,
}

impl ContentFilter {
    /// Filter that accepts every item.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_fields(mut self, fields: SearchFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Returns whether all clauses hold for `item`.
    pub fn matches(&self, item: &ContentItem) -> bool {
        let text_ok = match self.text.as_deref() {
            Some(text) => matches_text(item, &text.to_lowercase(), self.fields),
            None => true,
        };
        text_ok && self.predicates.iter().all(|predicate| predicate.matches(item))
    }

    /// Applies the filter, preserving input order.
    pub fn apply<'a>(&self, items: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        let needle = self.text.as_deref().map(str::to_lowercase);
        items
            .iter()
            .filter(|item| {
                needle
                    .as_deref()
                    .map_or(true, |needle| matches_text(item, needle, self.fields))
            })
            .filter(|item| self.predicates.iter().all(|predicate| predicate.matches(item)))
            .collect()
    }
}

/// Result ordering for list views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest first; equal dates keep input order.
    #[default]
    Date,
    /// Ascending, case-insensitive first, lowercase before uppercase on ties.
    ///
    /// Lowercased code points are compared directly, so accented letters
    /// sort after `z` (`"Émile"` comes after `"Zed"`).
    Title,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "date" => Some(Self::Date),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}

/// Query engine bound to one immutable item collection.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    items: &'a [ContentItem],
}

impl<'a> QueryEngine<'a> {
    pub fn new(items: &'a [ContentItem]) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &'a [ContentItem] {
        self.items
    }

    pub fn lookup(&self, id: &str) -> Result<&'a ContentItem, LookupError> {
        lookup(self.items, id)
    }

    pub fn by_kind(&self, kind: ContentKind) -> Vec<&'a ContentItem> {
        filter_by_kind(self.items, kind)
    }

    pub fn search(&self, query: &str) -> Vec<&'a ContentItem> {
        search(self.items, query)
    }

    pub fn filter(&self, filter: &ContentFilter) -> Vec<&'a ContentItem> {
        filter.apply(self.items)
    }

    pub fn related(&self, item: &ContentItem, limit: usize) -> Vec<&'a ContentItem> {
        related_items(item, self.items, limit)
    }

    pub fn labels(&self, kind: ContentKind) -> Vec<String> {
        distinct_labels(self.items, kind)
    }
}

/// Exact-id lookup.
pub fn lookup<'a>(items: &'a [ContentItem], id: &str) -> Result<&'a ContentItem, LookupError> {
    items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| LookupError::NotFound { id: id.to_string() })
}

/// Items of one kind in input order.
pub fn filter_by_kind(items: &[ContentItem], kind: ContentKind) -> Vec<&ContentItem> {
    items.iter().filter(|item| item.kind() == kind).collect()
}

/// Site-wide substring search over title, summary and labels.
///
/// The empty query matches every item.
pub fn search<'a>(items: &'a [ContentItem], query: &str) -> Vec<&'a ContentItem> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches_text(item, &needle, SearchFields::SITE))
        .collect()
}

/// Returns a sorted copy; the sort is stable.
pub fn sort_items<'a>(items: &[&'a ContentItem], key: SortKey) -> Vec<&'a ContentItem> {
    let mut sorted = items.to_vec();
    match key {
        SortKey::Date => sorted.sort_by(|a, b| b.date().cmp(&a.date())),
        SortKey::Title => sorted.sort_by(|a, b| compare_titles(a.title(), b.title())),
    }
    sorted
}

/// Title collation: case-insensitive order first, then lowercase before
/// uppercase at the first differing character.
///
/// No locale tables are consulted; non-ASCII letters order by code point.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| compare_case(a, b))
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (left, right) in a.chars().zip(b.chars()) {
        if left == right {
            continue;
        }
        return match (left.is_lowercase(), right.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => left.cmp(&right),
        };
    }
    a.chars().count().cmp(&b.chars().count())
}

/// Same-kind items sharing at least one label with `item`, excluding `item`,
/// in input order, truncated to `limit`.
pub fn related_items<'a>(
    item: &ContentItem,
    items: &'a [ContentItem],
    limit: usize,
) -> Vec<&'a ContentItem> {
    let kind = item.kind();
    let labels = item.labels();
    items
        .iter()
        .filter(|candidate| candidate.kind() == kind && candidate.id() != item.id())
        .filter(|candidate| candidate.labels().iter().any(|label| labels.contains(label)))
        .take(limit)
        .collect()
}

/// Distinct labels of one kind in ascending code-point order.
pub fn distinct_labels(items: &[ContentItem], kind: ContentKind) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.kind() == kind)
        .flat_map(|item| item.labels().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn matches_text(item: &ContentItem, needle: &str, fields: SearchFields) -> bool {
    if fields.title && item.title().to_lowercase().contains(needle) {
        return true;
    }
    if fields.summary && item.summary().to_lowercase().contains(needle) {
        return true;
    }
    if fields.labels
        && item
            .labels()
            .iter()
            .any(|label| label.to_lowercase().contains(needle))
    {
        return true;
    }
    fields.author
        && item
            .as_article()
            .is_some_and(|article| article.author.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::{compare_titles, SortKey};
    use std::cmp::Ordering;

    #[test]
    fn title_collation_ignores_case_before_breaking_ties() {
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("Zebra", "apple"), Ordering::Greater);
        assert_eq!(compare_titles("react", "React"), Ordering::Less);
        assert_eq!(compare_titles("Same", "Same"), Ordering::Equal);
    }

    #[test]
    fn title_collation_orders_accented_letters_by_code_point() {
        assert_eq!(compare_titles("Émile", "Zed"), Ordering::Greater);
        assert_eq!(compare_titles("émile", "Émile"), Ordering::Less);
    }

    #[test]
    fn sort_key_parse_is_case_insensitive() {
        assert_eq!(SortKey::parse(" Title "), Some(SortKey::Title));
        assert_eq!(SortKey::parse("rank"), None);
    }
}
