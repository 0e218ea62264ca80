//! Immutable content catalog and repository contract.
//!
//! # Responsibility
//! - Validate items and the cross-item id uniqueness rule once, at load.
//! - Expose ordered, borrowed access to items for the query engine.
//! - Provide the built-in site content as an embedded JSON resource.
//!
//! # Invariants
//! - Item order is the authored order and is preserved by every read.
//! - Loading fails as a whole; a partially valid catalog is never returned.

use crate::model::content::{ContentId, ContentItem, ContentValidationError};
use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

const SEEDED_CONTENT_JSON: &str = include_str!("../data/portfolio.json");

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog assembly error.
#[derive(Debug)]
pub enum CatalogError {
    /// One item breaks a per-item rule.
    Validation(ContentValidationError),
    /// Two items share the same id.
    DuplicateId(ContentId),
    /// Content JSON is malformed or does not match the item schema.
    Parse(serde_json::Error),
    /// External content file cannot be read.
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate content id: {id}"),
            Self::Parse(err) => write!(f, "invalid content json: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read content file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) => None,
            Self::Parse(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ContentValidationError> for CatalogError {
    fn from(value: ContentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Read-only content access used by the query engine and services.
pub trait ContentRepository {
    /// All items in authored order.
    fn items(&self) -> &[ContentItem];

    /// Exact-id lookup. `None` means no item has this id.
    fn get_item(&self, id: &str) -> Option<&ContentItem> {
        self.items().iter().find(|item| item.id() == id)
    }
}

impl<R: ContentRepository + ?Sized> ContentRepository for &R {
    fn items(&self) -> &[ContentItem] {
        (**self).items()
    }

    fn get_item(&self, id: &str) -> Option<&ContentItem> {
        (**self).get_item(id)
    }
}

impl<R: ContentRepository + ?Sized> ContentRepository for Arc<R> {
    fn items(&self) -> &[ContentItem] {
        (**self).items()
    }

    fn get_item(&self, id: &str) -> Option<&ContentItem> {
        (**self).get_item(id)
    }
}

/// Validated, immutable collection of articles and projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCatalog {
    items: Vec<ContentItem>,
}

impl ContentCatalog {
    /// Builds a catalog after validating every item and id uniqueness.
    pub fn new(items: Vec<ContentItem>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id()) {
                return Err(CatalogError::DuplicateId(item.id().to_string()));
            }
        }

        Ok(Self { items })
    }

    /// Catalog without items. Every lookup is not-found.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a JSON array of internally tagged items.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let items: Vec<ContentItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Loads an external content file.
    ///
    /// # Side effects
    /// - Emits `catalog_load` logging events with duration and status.
    pub fn from_json_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        info!("event=catalog_load module=repo status=start source=file");

        let result = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|json| Self::from_json_str(&json));
        log_load_outcome("file", started_at, &result);
        result
    }

    /// Built-in site content (three articles, three projects).
    ///
    /// # Errors
    /// - Returns an error only if the embedded resource is corrupt.
    pub fn seeded() -> CatalogResult<Self> {
        let started_at = Instant::now();
        info!("event=catalog_load module=repo status=start source=embedded");
        let result = Self::from_json_str(SEEDED_CONTENT_JSON);
        log_load_outcome("embedded", started_at, &result);
        result
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id() == id)
    }
}

impl ContentRepository for ContentCatalog {
    fn items(&self) -> &[ContentItem] {
        &self.items
    }

    fn get_item(&self, id: &str) -> Option<&ContentItem> {
        self.get(id)
    }
}

fn log_load_outcome(source: &str, started_at: Instant, result: &CatalogResult<ContentCatalog>) {
    match result {
        Ok(catalog) => info!(
            "event=catalog_load module=repo status=ok source={} items={} duration_ms={}",
            source,
            catalog.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=catalog_load module=repo status=error source={} duration_ms={} error={}",
            source,
            started_at.elapsed().as_millis(),
            err
        ),
    }
}
