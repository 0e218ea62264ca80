//! Configuration loading and validation.
//!
//! # Responsibility
//! - Parse TOML configuration into typed sections.
//! - Fill omitted keys with defaults and reject unusable values.
//!
//! # Invariants
//! - View limits are at least 1.
//! - A configured content path, when set, is not blank.

use crate::service::content_service::ViewSettings;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Configuration loading error.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Validation(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Validation(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// External JSON content file; the built-in catalog is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsConfig {
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
    #[serde(default = "default_popular_label_limit")]
    pub popular_label_limit: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            featured_limit: default_featured_limit(),
            related_limit: default_related_limit(),
            popular_label_limit: default_popular_label_limit(),
        }
    }
}

impl From<&ViewsConfig> for ViewSettings {
    fn from(value: &ViewsConfig) -> Self {
        Self {
            featured_limit: value.featured_limit,
            related_limit: value.related_limit,
            popular_label_limit: value.popular_label_limit,
        }
    }
}

impl FolioConfig {
    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("views.featured_limit", self.views.featured_limit),
            ("views.related_limit", self.views.related_limit),
            ("views.popular_label_limit", self.views.popular_label_limit),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{name} must be at least 1")));
            }
        }

        if self
            .content
            .path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::Validation(
                "content.path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings::from(&self.views)
    }
}

fn default_log_level() -> String {
    crate::logging::default_log_level().to_string()
}

fn default_featured_limit() -> usize {
    6
}

fn default_related_limit() -> usize {
    crate::search::query::RELATED_ITEMS_LIMIT
}

fn default_popular_label_limit() -> usize {
    8
}
