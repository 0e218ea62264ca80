//! Core content logic for the Folio portfolio site.
//! This crate is the single source of truth for content invariants and query
//! semantics; presentation layers only consume its view models.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod route;
pub mod search;
pub mod service;

pub use config::{ConfigError, FolioConfig};
pub use logging::{
    default_log_level, init_from_config, init_logging, logging_status, sanitize_message,
    LoggingError,
};
pub use model::content::{
    Article, ContentId, ContentItem, ContentKind, ContentValidationError, Project, ProjectStatus,
};
pub use repo::catalog::{CatalogError, CatalogResult, ContentCatalog, ContentRepository};
pub use route::{resolve, ResolveError, Route, View};
pub use search::query::{
    compare_titles, distinct_labels, filter_by_kind, lookup, related_items, search, sort_items,
    ContentFilter, LookupError, Predicate, QueryEngine, SearchFields, SortKey,
    RELATED_ITEMS_LIMIT,
};
pub use service::content_service::{ContentService, ContentServiceError, ViewSettings};
pub use service::views::{ArticleListQuery, ContentCard, ListView, ProjectListQuery, SearchView};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
