//! Site path addressing.
//!
//! # Responsibility
//! - Parse `path?query` strings into typed routes.
//! - Resolve routes to view models through `ContentService`.
//!
//! # Invariants
//! - Parsing is total: unknown paths become `Route::NotFound`, never errors.
//! - Query values are percent/`+` decoded; unknown keys are ignored.
//! - Detail ids are percent-decoded path segments (`+` stays literal).
//! - Unrecognized `sort`/`status` values fall back to "no preference".

use crate::model::content::{ContentId, ProjectStatus};
use crate::repo::catalog::ContentRepository;
use crate::search::query::SortKey;
use crate::service::content_service::{ContentService, ContentServiceError};
use crate::service::views::{
    AboutView, ArticleDetailView, ArticleListQuery, HomeView, ListView, ProjectDetailView,
    ProjectListQuery, SearchView,
};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use percent_encoding::percent_decode_str;
use url::form_urlencoded;
use url::Url;

const ROUTE_BASE: &str = "http://folio.local";

/// One addressable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    BlogList(ArticleListQuery),
    BlogDetail(ContentId),
    ProjectList(ProjectListQuery),
    ProjectDetail(ContentId),
    Search { query: String },
    About,
    /// Unknown path, kept for the not-found message.
    NotFound(String),
}

impl Route {
    /// Parses `"/blog/some-id"`, `"/search?q=react"` and friends.
    ///
    /// A missing leading slash is tolerated; trailing slashes are ignored.
    pub fn parse(path_and_query: &str) -> Self {
        let trimmed = path_and_query.trim();
        let raw = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        let Ok(url) = Url::parse(&format!("{ROUTE_BASE}{raw}")) else {
            return Self::NotFound(raw);
        };

        let segments: Vec<&str> = url
            .path_segments()
            .map(|parts| parts.filter(|part| !part.is_empty()).collect())
            .unwrap_or_default();
        let param = |key: &str| {
            url.query_pairs()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.into_owned())
        };

        match segments.as_slice() {
            [] => Self::Home,
            ["blog"] => Self::BlogList(ArticleListQuery {
                text: param("q").unwrap_or_default(),
                tag: param("tag").filter(|tag| !tag.is_empty()),
                sort: param("sort")
                    .and_then(|value| SortKey::parse(&value))
                    .unwrap_or_default(),
            }),
            ["blog", id] => Self::BlogDetail(decode_segment(id)),
            ["projects"] => Self::ProjectList(ProjectListQuery {
                text: param("q").unwrap_or_default(),
                technology: param("tech").filter(|tech| !tech.is_empty()),
                status: param("status").and_then(|value| ProjectStatus::parse(&value)),
                sort: param("sort")
                    .and_then(|value| SortKey::parse(&value))
                    .unwrap_or_default(),
            }),
            ["projects", id] => Self::ProjectDetail(decode_segment(id)),
            ["search"] => Self::Search {
                query: param("q").unwrap_or_default(),
            },
            ["about"] => Self::About,
            _ => Self::NotFound(url.path().to_string()),
        }
    }

    /// Canonical `path?query` for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::BlogList(query) => {
                let mut pairs = Vec::new();
                push_pair(&mut pairs, "q", &query.text);
                if let Some(tag) = &query.tag {
                    push_pair(&mut pairs, "tag", tag);
                }
                if query.sort != SortKey::default() {
                    push_pair(&mut pairs, "sort", sort_name(query.sort));
                }
                with_query("/blog", &pairs)
            }
            Self::BlogDetail(id) => format!("/blog/{id}"),
            Self::ProjectList(query) => {
                let mut pairs = Vec::new();
                push_pair(&mut pairs, "q", &query.text);
                if let Some(technology) = &query.technology {
                    push_pair(&mut pairs, "tech", technology);
                }
                if let Some(status) = query.status {
                    push_pair(&mut pairs, "status", status.as_str());
                }
                if query.sort != SortKey::default() {
                    push_pair(&mut pairs, "sort", sort_name(query.sort));
                }
                with_query("/projects", &pairs)
            }
            Self::ProjectDetail(id) => format!("/projects/{id}"),
            Self::Search { query } => {
                let mut pairs = Vec::new();
                push_pair(&mut pairs, "q", query);
                with_query("/search", &pairs)
            }
            Self::About => "/about".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }
}

/// Percent-decodes one path segment; invalid UTF-8 is replaced, never rejected.
fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

fn push_pair<'a>(pairs: &mut Vec<(&'a str, &'a str)>, key: &'a str, value: &'a str) {
    if !value.is_empty() {
        pairs.push((key, value));
    }
}

fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{path}?{encoded}")
}

fn sort_name(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Date => "date",
        SortKey::Title => "title",
    }
}

/// Resolved page model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum View {
    Home(HomeView),
    BlogList(ListView),
    BlogDetail(ArticleDetailView),
    ProjectList(ListView),
    ProjectDetail(ProjectDetailView),
    Search(SearchView),
    About(AboutView),
}

/// Route resolution failure; both variants carry a navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    Content(ContentServiceError),
    UnknownPath(String),
}

impl ResolveError {
    /// Where the not-found page should link back to.
    pub fn back_path(&self) -> &'static str {
        match self {
            Self::Content(err) => err.back_path(),
            Self::UnknownPath(_) => "/",
        }
    }
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Content(err) => write!(f, "{err}"),
            Self::UnknownPath(path) => write!(f, "page not found: {path}"),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Content(err) => Some(err),
            Self::UnknownPath(_) => None,
        }
    }
}

impl From<ContentServiceError> for ResolveError {
    fn from(value: ContentServiceError) -> Self {
        Self::Content(value)
    }
}

/// Renders the view model for `route`.
pub fn resolve<R: ContentRepository>(
    service: &ContentService<R>,
    route: &Route,
) -> Result<View, ResolveError> {
    let view = match route {
        Route::Home => View::Home(service.home()),
        Route::BlogList(query) => View::BlogList(service.list_articles(query)),
        Route::BlogDetail(id) => View::BlogDetail(service.article_detail(id)?),
        Route::ProjectList(query) => View::ProjectList(service.list_projects(query)),
        Route::ProjectDetail(id) => View::ProjectDetail(service.project_detail(id)?),
        Route::Search { query } => View::Search(service.search(query)),
        Route::About => View::About(service.about()),
        Route::NotFound(path) => return Err(ResolveError::UnknownPath(path.clone())),
    };
    Ok(view)
}
