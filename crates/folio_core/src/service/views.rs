//! Serializable view models returned by `ContentService`.
//!
//! View models borrow nothing from the catalog so callers can hold them
//! beyond the service's lifetime or serialize them directly.

use crate::model::content::{
    Article, ContentId, ContentItem, ContentKind, Project, ProjectStatus,
};
use crate::search::query::SortKey;
use crate::service::markdown::{derive_plain_preview, estimate_read_time, OutlineEntry};
use chrono::NaiveDate;
use serde::Serialize;

/// Labels shown on a card before collapsing into `+N more`.
pub const CARD_LABEL_LIMIT: usize = 3;
const CARD_PREVIEW_CHARS: usize = 160;

/// Summary card used by home, list, search and related sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentCard {
    pub id: ContentId,
    pub kind: ContentKind,
    pub kind_label: &'static str,
    pub title: String,
    /// Authored summary, or a preview derived from the body when blank.
    pub summary: String,
    pub date: NaiveDate,
    /// First three labels.
    pub labels: Vec<String>,
    /// Labels hidden behind `+N more`.
    pub more_labels: usize,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&ContentItem> for ContentCard {
    fn from(item: &ContentItem) -> Self {
        let labels = item.labels();
        let summary = if item.summary().trim().is_empty() {
            derive_plain_preview(item.body(), CARD_PREVIEW_CHARS).unwrap_or_default()
        } else {
            item.summary().to_string()
        };

        let mut card = Self {
            id: item.id().to_string(),
            kind: item.kind(),
            kind_label: item.kind().display_label(),
            title: item.title().to_string(),
            summary,
            date: item.date(),
            labels: labels.iter().take(CARD_LABEL_LIMIT).cloned().collect(),
            more_labels: labels.len().saturating_sub(CARD_LABEL_LIMIT),
            path: item.path(),
            status: None,
            author: None,
            read_time: None,
            demo_url: None,
            repo_url: None,
            image: item.image().map(str::to_string),
        };

        match item {
            ContentItem::Article(article) => {
                card.author = Some(article.author.clone());
                card.read_time = Some(read_time_label(article));
            }
            ContentItem::Project(project) => {
                card.status = Some(project.status);
                card.demo_url = project.demo_url.clone();
                card.repo_url = project.repo_url.clone();
            }
        }

        card
    }
}

/// Authored read-time label, or an estimate from the body when blank.
pub(crate) fn read_time_label(article: &Article) -> String {
    if article.read_time.trim().is_empty() {
        estimate_read_time(&article.body)
    } else {
        article.read_time.clone()
    }
}

/// Counters shown in the home hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SiteStats {
    pub article_count: usize,
    pub project_count: usize,
    /// Distinct technology labels across projects.
    pub technology_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeView {
    /// Newest items first.
    pub featured: Vec<ContentCard>,
    pub stats: SiteStats,
}

/// Blog listing controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListQuery {
    /// Matched against title, summary and author. Empty matches all.
    pub text: String,
    /// Exact tag filter; `None` means all tags.
    pub tag: Option<String>,
    pub sort: SortKey,
}

/// Project listing controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectListQuery {
    /// Matched against title and summary. Empty matches all.
    pub text: String,
    /// Exact technology filter; `None` means all technologies.
    pub technology: Option<String>,
    pub status: Option<ProjectStatus>,
    pub sort: SortKey,
}

/// Filtered listing of one content kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub kind: ContentKind,
    pub items: Vec<ContentCard>,
    /// Unfiltered count of this kind ("Showing N of total").
    pub total: usize,
    pub sort: SortKey,
    /// Every tag/technology of this kind, ascending, for the filter dropdown.
    pub available_labels: Vec<String>,
    /// Quick-pick labels; empty while any filter is active.
    pub popular_labels: Vec<String>,
    /// Removable filter chips (selected label, selected status).
    pub active_filters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDetailView {
    pub article: Article,
    /// Authored label, or an estimate when blank.
    pub read_time: String,
    pub outline: Vec<OutlineEntry>,
    pub related: Vec<ContentCard>,
    pub back_path: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDetailView {
    pub project: Project,
    pub status_label: &'static str,
    pub outline: Vec<OutlineEntry>,
    pub related: Vec<ContentCard>,
    pub back_path: &'static str,
}

/// Site-wide search results with per-kind tab counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    /// Query as typed, echoed back to the search box.
    pub query: String,
    pub items: Vec<ContentCard>,
    pub article_count: usize,
    pub project_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub name: &'static str,
    /// Percentage, 0..=100.
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutView {
    pub name: &'static str,
    pub bio: &'static str,
    pub skills: Vec<Skill>,
    pub technologies: Vec<&'static str>,
    pub contact_email: &'static str,
}
