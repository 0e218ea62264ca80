//! Site view use-case service.
//!
//! # Responsibility
//! - Provide home, list, detail, search and about projections.
//! - Apply caller-side query policy the engine leaves open (blank search,
//!   kind checks on detail routes).
//!
//! # Invariants
//! - A detail request for an id of the other kind is not-found, never a
//!   silently re-typed item.
//! - A blank (after trim) site search returns the whole catalog; other
//!   queries reach the engine untrimmed.
//! - Related sections never contain the item itself and respect
//!   `ViewSettings::related_limit`.

use crate::logging::sanitize_message;
use crate::model::content::{ContentId, ContentItem, ContentKind};
use crate::repo::catalog::ContentRepository;
use crate::search::query::{
    sort_items, ContentFilter, Predicate, QueryEngine, SearchFields, SortKey, RELATED_ITEMS_LIMIT,
};
use crate::service::markdown::outline;
use crate::service::views::{
    read_time_label, AboutView, ArticleDetailView, ArticleListQuery, ContentCard, HomeView,
    ListView, ProjectDetailView, ProjectListQuery, SearchView, SiteStats, Skill,
};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_LOGGED_INPUT_CHARS: usize = 64;

/// Service error for view use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentServiceError {
    /// No item of `kind` has this id.
    NotFound { kind: ContentKind, id: ContentId },
}

impl ContentServiceError {
    /// Listing route a not-found view should link back to.
    pub fn back_path(&self) -> &'static str {
        match self {
            Self::NotFound { kind, .. } => kind.listing_path(),
        }
    }
}

impl Display for ContentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
        }
    }
}

impl Error for ContentServiceError {}

/// View sizing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub featured_limit: usize,
    pub related_limit: usize,
    pub popular_label_limit: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            featured_limit: 6,
            related_limit: RELATED_ITEMS_LIMIT,
            popular_label_limit: 8,
        }
    }
}

/// View service over any content repository.
pub struct ContentService<R: ContentRepository> {
    repo: R,
    settings: ViewSettings,
}

impl<R: ContentRepository> ContentService<R> {
    /// Creates a service with default view settings.
    pub fn new(repo: R) -> Self {
        Self::with_settings(repo, ViewSettings::default())
    }

    pub fn with_settings(repo: R, settings: ViewSettings) -> Self {
        Self { repo, settings }
    }

    pub fn settings(&self) -> ViewSettings {
        self.settings
    }

    fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(self.repo.items())
    }

    /// Newest items plus site counters.
    pub fn home(&self) -> HomeView {
        let engine = self.engine();
        let everything: Vec<&ContentItem> = engine.items().iter().collect();
        let featured = sort_items(&everything, SortKey::Date)
            .into_iter()
            .take(self.settings.featured_limit)
            .map(ContentCard::from)
            .collect();

        HomeView {
            featured,
            stats: SiteStats {
                article_count: engine.by_kind(ContentKind::Article).len(),
                project_count: engine.by_kind(ContentKind::Project).len(),
                technology_count: engine.labels(ContentKind::Project).len(),
            },
        }
    }

    /// Blog listing with text, tag and sort controls.
    pub fn list_articles(&self, query: &ArticleListQuery) -> ListView {
        let mut filter = ContentFilter::new()
            .with_fields(SearchFields::ARTICLE_LIST)
            .with_predicate(Predicate::Kind(ContentKind::Article));
        let mut active_filters = Vec::new();
        if !query.text.is_empty() {
            filter = filter.with_text(query.text.as_str());
        }
        if let Some(tag) = &query.tag {
            filter = filter.with_predicate(Predicate::Label(tag.clone()));
            active_filters.push(tag.clone());
        }

        self.list(
            ContentKind::Article,
            &filter,
            query.sort,
            active_filters,
            query.text.is_empty(),
        )
    }

    /// Project listing with text, technology, status and sort controls.
    pub fn list_projects(&self, query: &ProjectListQuery) -> ListView {
        let mut filter = ContentFilter::new()
            .with_fields(SearchFields::PROJECT_LIST)
            .with_predicate(Predicate::Kind(ContentKind::Project));
        let mut active_filters = Vec::new();
        if !query.text.is_empty() {
            filter = filter.with_text(query.text.as_str());
        }
        if let Some(technology) = &query.technology {
            filter = filter.with_predicate(Predicate::Label(technology.clone()));
            active_filters.push(technology.clone());
        }
        if let Some(status) = query.status {
            filter = filter.with_predicate(Predicate::Status(status));
            active_filters.push(status.as_str().to_string());
        }

        self.list(
            ContentKind::Project,
            &filter,
            query.sort,
            active_filters,
            query.text.is_empty(),
        )
    }

    fn list(
        &self,
        kind: ContentKind,
        filter: &ContentFilter,
        sort: SortKey,
        active_filters: Vec<String>,
        text_is_empty: bool,
    ) -> ListView {
        let engine = self.engine();
        let matched = engine.filter(filter);
        let items = sort_items(&matched, sort)
            .into_iter()
            .map(ContentCard::from)
            .collect::<Vec<_>>();
        let available_labels = engine.labels(kind);
        let popular_labels = if text_is_empty && active_filters.is_empty() {
            available_labels
                .iter()
                .take(self.settings.popular_label_limit)
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            "event=content_list module=service kind={} shown={} sort={:?}",
            kind,
            items.len(),
            sort
        );

        ListView {
            kind,
            items,
            total: engine.by_kind(kind).len(),
            sort,
            available_labels,
            popular_labels,
            active_filters,
        }
    }

    /// Article page for `/blog/{id}`.
    pub fn article_detail(&self, id: &str) -> Result<ArticleDetailView, ContentServiceError> {
        let item = self.find(ContentKind::Article, id)?;
        let Some(article) = item.as_article() else {
            return Err(self.not_found(ContentKind::Article, id));
        };
        Ok(ArticleDetailView {
            article: article.clone(),
            read_time: read_time_label(article),
            outline: outline(&article.body),
            related: self.related_cards(item),
            back_path: ContentKind::Article.listing_path(),
        })
    }

    /// Project page for `/projects/{id}`.
    pub fn project_detail(&self, id: &str) -> Result<ProjectDetailView, ContentServiceError> {
        let item = self.find(ContentKind::Project, id)?;
        let Some(project) = item.as_project() else {
            return Err(self.not_found(ContentKind::Project, id));
        };

        Ok(ProjectDetailView {
            project: project.clone(),
            status_label: project.status.display_label(),
            outline: outline(&project.body),
            related: self.related_cards(item),
            back_path: ContentKind::Project.listing_path(),
        })
    }

    /// Site-wide search for `/search?q=`.
    ///
    /// A query that is blank after trimming returns every item. Any other
    /// query is matched exactly as typed, surrounding whitespace included.
    pub fn search(&self, query: &str) -> SearchView {
        let engine = self.engine();
        let matched = if query.trim().is_empty() {
            engine.items().iter().collect::<Vec<_>>()
        } else {
            engine.search(query)
        };

        let article_count = matched
            .iter()
            .filter(|item| item.kind() == ContentKind::Article)
            .count();
        let project_count = matched.len() - article_count;

        debug!(
            "event=content_search module=service query_chars={} hits={}",
            query.chars().count(),
            matched.len()
        );

        SearchView {
            query: query.to_string(),
            items: matched.into_iter().map(ContentCard::from).collect(),
            article_count,
            project_count,
        }
    }

    /// Static profile for `/about`.
    pub fn about(&self) -> AboutView {
        AboutView {
            name: "Alex",
            bio: "A passionate full-stack developer and technology enthusiast dedicated to \
                  building innovative solutions and sharing knowledge with the community.",
            skills: vec![
                Skill {
                    name: "Frontend Development",
                    level: 95,
                },
                Skill {
                    name: "UI/UX Design",
                    level: 88,
                },
                Skill {
                    name: "Performance Optimization",
                    level: 92,
                },
            ],
            technologies: vec![
                "React",
                "TypeScript",
                "Next.js",
                "Node.js",
                "Python",
                "Tailwind CSS",
                "PostgreSQL",
                "MongoDB",
                "AWS",
                "Docker",
            ],
            contact_email: "alex@cosmicstudio.dev",
        }
    }

    fn find(&self, kind: ContentKind, id: &str) -> Result<&ContentItem, ContentServiceError> {
        match self.engine().lookup(id) {
            Ok(item) if item.kind() == kind => Ok(item),
            _ => Err(self.not_found(kind, id)),
        }
    }

    fn not_found(&self, kind: ContentKind, id: &str) -> ContentServiceError {
        debug!(
            "event=content_lookup module=service status=not_found kind={} id={}",
            kind,
            sanitize_message(id, MAX_LOGGED_INPUT_CHARS)
        );
        ContentServiceError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    fn related_cards(&self, item: &ContentItem) -> Vec<ContentCard> {
        self.engine()
            .related(item, self.settings.related_limit)
            .into_iter()
            .map(ContentCard::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentService, ContentServiceError, ViewSettings};
    use crate::model::content::ContentKind;
    use crate::repo::catalog::ContentCatalog;

    #[test]
    fn not_found_links_back_to_listing() {
        let service = ContentService::new(ContentCatalog::empty());
        let err = service.project_detail("nope").unwrap_err();
        assert_eq!(
            err,
            ContentServiceError::NotFound {
                kind: ContentKind::Project,
                id: "nope".to_string()
            }
        );
        assert_eq!(err.back_path(), "/projects");
    }

    #[test]
    fn default_settings_match_site_layout() {
        let settings = ViewSettings::default();
        assert_eq!(settings.featured_limit, 6);
        assert_eq!(settings.related_limit, 3);
        assert_eq!(settings.popular_label_limit, 8);
    }
}
