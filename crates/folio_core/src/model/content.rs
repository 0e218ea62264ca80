//! Article/project content model.
//!
//! # Responsibility
//! - Define `ContentItem`, the canonical record rendered by list, detail and
//!   search views.
//! - Provide shared accessors so query code never inspects variant fields
//!   directly.
//!
//! # Invariants
//! - `id` is non-blank and matches `[a-z0-9][a-z0-9-]*` (it is a routing key).
//! - `title` is non-blank.
//! - Labels (tags or technologies) are non-blank.
//! - Project links, when present, are absolute `http`/`https` URLs.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

static CONTENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("valid content id regex"));

/// Stable identifier for articles and projects.
///
/// Kept as a type alias; ids double as the last path segment of detail routes.
pub type ContentId = String;

/// Discriminator for the two content variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Blog post.
    Article,
    /// Portfolio work item.
    Project,
}

impl ContentKind {
    /// Stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Project => "project",
        }
    }

    /// Human-readable singular label used in card badges.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Article => "Blog Post",
            Self::Project => "Project",
        }
    }

    /// Listing route for this kind; also the "back" target for not-found views.
    pub fn listing_path(self) -> &'static str {
        match self {
            Self::Article => "/blog",
            Self::Project => "/projects",
        }
    }

    /// Parses user-facing kind names (`article|blog|post`, `project|projects`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "article" | "articles" | "blog" | "post" | "posts" => Some(Self::Article),
            "project" | "projects" => Some(Self::Project),
            _ => None,
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Shipped.
    Completed,
    /// Under active development.
    InProgress,
    /// Not started yet.
    Planned,
}

impl ProjectStatus {
    /// All statuses in filter-dropdown order.
    pub const ALL: [ProjectStatus; 3] = [Self::Completed, Self::InProgress, Self::Planned];

    /// Stable wire name (`completed|in-progress|planned`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
            Self::Planned => "planned",
        }
    }

    /// Badge label: wire name with the first letter capitalized.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In-progress",
            Self::Planned => "Planned",
        }
    }

    /// Parses a wire name; accepts `_` and spaces in place of `-`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "completed" => Some(Self::Completed),
            "in-progress" => Some(Self::InProgress),
            "planned" => Some(Self::Planned),
            _ => None,
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ContentId,
    pub title: String,
    /// Short excerpt shown on cards and searched by the query engine.
    pub summary: String,
    /// Markdown body.
    pub body: String,
    pub author: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Ordered category tags as authored (case preserved).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Display label such as `8 min read`.
    #[serde(default)]
    pub read_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Article {
    /// Creates an article with empty text fields and no tags.
    pub fn new(id: impl Into<ContentId>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            body: String::new(),
            author: String::new(),
            date,
            tags: Vec::new(),
            read_time: String::new(),
            image: None,
        }
    }
}

/// Portfolio work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ContentId,
    pub title: String,
    pub summary: String,
    /// Markdown body.
    pub body: String,
    /// Ordered technology labels as authored.
    #[serde(default)]
    pub technologies: Vec<String>,
    pub date: NaiveDate,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Project {
    /// Creates a project with empty text fields and no technologies.
    pub fn new(
        id: impl Into<ContentId>,
        title: impl Into<String>,
        date: NaiveDate,
        status: ProjectStatus,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            body: String::new(),
            technologies: Vec::new(),
            date,
            status,
            demo_url: None,
            repo_url: None,
            image: None,
        }
    }
}

/// One catalog entry, either an article or a project.
///
/// Serialized internally tagged as `"type": "article" | "project"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Article(Article),
    Project(Project),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Article(_) => ContentKind::Article,
            Self::Project(_) => ContentKind::Project,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Article(article) => &article.id,
            Self::Project(project) => &project.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Article(article) => &article.title,
            Self::Project(project) => &project.title,
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            Self::Article(article) => &article.summary,
            Self::Project(project) => &project.summary,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Article(article) => &article.body,
            Self::Project(project) => &project.body,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Article(article) => article.date,
            Self::Project(project) => project.date,
        }
    }

    /// Tags for articles, technologies for projects.
    pub fn labels(&self) -> &[String] {
        match self {
            Self::Article(article) => &article.tags,
            Self::Project(project) => &project.technologies,
        }
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Article(article) => article.image.as_deref(),
            Self::Project(project) => project.image.as_deref(),
        }
    }

    /// Detail route, e.g. `/blog/{id}` or `/projects/{id}`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.kind().listing_path(), self.id())
    }

    pub fn as_article(&self) -> Option<&Article> {
        match self {
            Self::Article(article) => Some(article),
            Self::Project(_) => None,
        }
    }

    pub fn as_project(&self) -> Option<&Project> {
        match self {
            Self::Project(project) => Some(project),
            Self::Article(_) => None,
        }
    }

    /// Checks per-item invariants.
    ///
    /// Cross-item rules (id uniqueness) belong to the catalog.
    pub fn validate(&self) -> Result<(), ContentValidationError> {
        let id = self.id();
        if id.trim().is_empty() {
            return Err(ContentValidationError::BlankId);
        }
        if !CONTENT_ID_RE.is_match(id) {
            return Err(ContentValidationError::InvalidId(id.to_string()));
        }
        if self.title().trim().is_empty() {
            return Err(ContentValidationError::BlankTitle { id: id.to_string() });
        }
        if self.labels().iter().any(|label| label.trim().is_empty()) {
            return Err(ContentValidationError::BlankLabel { id: id.to_string() });
        }

        if let Self::Project(project) = self {
            for link in [project.demo_url.as_deref(), project.repo_url.as_deref()]
                .into_iter()
                .flatten()
            {
                validate_link(id, link)?;
            }
        }

        Ok(())
    }
}

impl From<Article> for ContentItem {
    fn from(value: Article) -> Self {
        Self::Article(value)
    }
}

impl From<Project> for ContentItem {
    fn from(value: Project) -> Self {
        Self::Project(value)
    }
}

/// Per-item validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValidationError {
    BlankId,
    /// Id contains characters that are not safe in a path segment.
    InvalidId(String),
    BlankTitle {
        id: ContentId,
    },
    BlankLabel {
        id: ContentId,
    },
    /// Demo/repository link is not an absolute http(s) URL.
    InvalidLink {
        id: ContentId,
        link: String,
    },
}

impl Display for ContentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "content id cannot be blank"),
            Self::InvalidId(id) => write!(
                f,
                "content id `{id}` must match [a-z0-9][a-z0-9-]* to be used in paths"
            ),
            Self::BlankTitle { id } => write!(f, "content `{id}` has a blank title"),
            Self::BlankLabel { id } => write!(f, "content `{id}` has a blank tag/technology"),
            Self::InvalidLink { id, link } => {
                write!(f, "content `{id}` has an invalid link `{link}`")
            }
        }
    }
}

impl Error for ContentValidationError {}

fn validate_link(id: &str, link: &str) -> Result<(), ContentValidationError> {
    let invalid = || ContentValidationError::InvalidLink {
        id: id.to_string(),
        link: link.to_string(),
    };
    let parsed = Url::parse(link).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(invalid()),
    }
}
