use folio_core::{ConfigError, FolioConfig, ViewSettings};
use std::io::Write;
use std::path::PathBuf;

#[test]
fn empty_config_uses_defaults() {
    let config = FolioConfig::from_toml_str("").unwrap();
    assert_eq!(config, FolioConfig::default());
    assert_eq!(config.view_settings(), ViewSettings::default());
    assert_eq!(config.content.path, None);
    assert_eq!(config.logging.dir, None);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = FolioConfig::from_toml_str(
        r#"
        [logging]
        level = "warn"
        dir = "/var/log/folio"

        [views]
        related_limit = 2
        "#,
    )
    .unwrap();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.dir, Some(PathBuf::from("/var/log/folio")));
    let settings = config.view_settings();
    assert_eq!(settings.related_limit, 2);
    assert_eq!(settings.featured_limit, 6);
    assert_eq!(settings.popular_label_limit, 8);
}

#[test]
fn zero_limits_are_rejected() {
    let err = FolioConfig::from_toml_str("[views]\nfeatured_limit = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("views.featured_limit"));
}

#[test]
fn malformed_toml_reports_parse_error() {
    let err = FolioConfig::from_toml_str("[views\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[content]\npath = \"/srv/folio/content.json\"").unwrap();

    let config = FolioConfig::load(file.path()).unwrap();
    assert_eq!(
        config.content.path,
        Some(PathBuf::from("/srv/folio/content.json"))
    );
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = FolioConfig::load(dir.path().join("folio.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
