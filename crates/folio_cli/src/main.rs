//! Command-line entry point.
//!
//! # Responsibility
//! - Resolve site paths against the catalog and print view models as JSON.
//! - Keep output deterministic for scripting and local sanity checks.
//!
//! # Invariants
//! - Missing pages print a `not_found` envelope and exit with code 2.
//! - Logged routes are capped; long search text is never logged verbatim.

use clap::{Parser, Subcommand};
use folio_core::{
    init_from_config, resolve, sanitize_message, ContentCatalog, ContentService, FolioConfig,
    ResolveError, Route,
};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_OK: u8 = 0;
const EXIT_NOT_FOUND: u8 = 2;
const MAX_LOGGED_ROUTE_CHARS: usize = 64;

/// Query the Folio portfolio content.
#[derive(Debug, Parser)]
#[command(name = "folio", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// JSON content file; overrides `content.path`.
    #[arg(long, global = true)]
    content: Option<PathBuf>,
    /// Absolute directory for log files; overrides `logging.dir`.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error; overrides `logging.level`.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a site path, e.g. `/blog/css-grid-mastery` or `/search?q=react`.
    View { path: String },
    /// Site-wide search; words are joined with spaces.
    Search { text: Vec<String> },
    /// Print `pong`.
    Ping,
    /// Print the core version.
    Version,
}

#[derive(Debug, Serialize)]
struct NotFoundEnvelope {
    not_found: NotFoundBody,
}

#[derive(Debug, Serialize)]
struct NotFoundBody {
    message: String,
    back_path: &'static str,
}

impl From<&ResolveError> for NotFoundEnvelope {
    fn from(err: &ResolveError) -> Self {
        Self {
            not_found: NotFoundBody {
                message: err.to_string(),
                back_path: err.back_path(),
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<u8, Box<dyn Error>> {
    let route = match &cli.command {
        Command::Ping => {
            println!("{}", folio_core::ping());
            return Ok(EXIT_OK);
        }
        Command::Version => {
            println!("{}", folio_core::core_version());
            return Ok(EXIT_OK);
        }
        Command::View { path } => Route::parse(path),
        Command::Search { text } => Route::Search {
            query: text.join(" "),
        },
    };

    let config = load_config(cli)?;
    init_from_config(&config.logging)?;

    let catalog = match &config.content.path {
        Some(path) => ContentCatalog::from_json_path(path)?,
        None => ContentCatalog::seeded()?,
    };
    let service = ContentService::with_settings(catalog, config.view_settings());

    info!(
        "event=cli_view module=cli status=start route={}",
        route_for_log(&route)
    );
    match resolve(&service, &route) {
        Ok(view) => {
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(EXIT_OK)
        }
        Err(err) => {
            let envelope = NotFoundEnvelope::from(&err);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(EXIT_NOT_FOUND)
        }
    }
}

/// Reads the config file (or defaults) and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<FolioConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => FolioConfig::load(path)?,
        None => FolioConfig::default(),
    };
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = Some(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(content) = &cli.content {
        config.content.path = Some(content.clone());
    }
    config.validate()?;
    Ok(config)
}

fn route_for_log(route: &Route) -> String {
    sanitize_message(&route.path(), MAX_LOGGED_ROUTE_CHARS)
}

#[cfg(test)]
mod tests {
    use super::{
        load_config, route_for_log, run, Cli, NotFoundEnvelope, EXIT_NOT_FOUND, EXIT_OK,
        MAX_LOGGED_ROUTE_CHARS,
    };
    use clap::Parser;
    use folio_core::{resolve, ContentCatalog, ContentService, Route};
    use std::io::Write;
    use std::path::PathBuf;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("folio").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn missing_detail_exits_with_not_found_code() {
        assert_eq!(run(&cli(&["view", "/blog/missing"])).unwrap(), EXIT_NOT_FOUND);
        assert_eq!(run(&cli(&["view", "/contact"])).unwrap(), EXIT_NOT_FOUND);
        assert_eq!(
            run(&cli(&["view", "/blog/react-best-practices"])).unwrap(),
            EXIT_OK
        );
        assert_eq!(run(&cli(&["search", "react", "hooks"])).unwrap(), EXIT_OK);
    }

    #[test]
    fn not_found_envelope_carries_message_and_back_path() {
        let service = ContentService::new(ContentCatalog::seeded().unwrap());
        let err = resolve(&service, &Route::parse("/projects/missing")).unwrap_err();

        let json = serde_json::to_value(NotFoundEnvelope::from(&err)).unwrap();
        assert_eq!(json["not_found"]["back_path"], "/projects");
        assert_eq!(json["not_found"]["message"], "project not found: missing");
    }

    #[test]
    fn flags_override_config_values() {
        let config = load_config(&cli(&[
            "--content",
            "/srv/folio/content.json",
            "--log-level",
            "warn",
            "--log-dir",
            "/var/log/folio",
            "view",
            "/",
        ]))
        .unwrap();

        assert_eq!(
            config.content.path,
            Some(PathBuf::from("/srv/folio/content.json"))
        );
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.dir, Some(PathBuf::from("/var/log/folio")));
    }

    #[test]
    fn flags_win_over_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"error\"\n\n[views]\nrelated_limit = 1").unwrap();
        let path = file.path().to_str().unwrap();

        let config = load_config(&cli(&["--config", path, "--log-level", "debug", "ping"])).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.views.related_limit, 1);
    }

    #[test]
    fn content_flag_replaces_seeded_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"type":"article","id":"hello","title":"Hello","summary":"s","body":"b","author":"me","date":"2024-03-01"}}]"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        assert_eq!(
            run(&cli(&["--content", path, "view", "/blog/hello"])).unwrap(),
            EXIT_OK
        );
        assert_eq!(
            run(&cli(&["--content", path, "view", "/blog/react-best-practices"])).unwrap(),
            EXIT_NOT_FOUND
        );
    }

    #[test]
    fn missing_content_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let path = path.to_str().unwrap();
        assert!(run(&cli(&["--content", path, "view", "/"])).is_err());
    }

    #[test]
    fn logged_route_is_capped() {
        let route = Route::Search {
            query: "x".repeat(2048),
        };
        let logged = route_for_log(&route);
        assert!(logged.chars().count() <= MAX_LOGGED_ROUTE_CHARS + 3);
        assert!(logged.ends_with("..."));
        assert_eq!(route_for_log(&Route::About), "/about");
    }
}
