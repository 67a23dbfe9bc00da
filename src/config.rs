/// Application settings
///
/// Settings are resolved in three layers, later layers winning:
/// 1. built-in defaults
/// 2. the optional JSON file `<config dir>/brew-catalog/settings.json`
/// 3. command-line flags and their environment variables

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::error::ConfigError;

/// Catalog endpoint used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://api.jsonbin.io/v3/b/6630fd9be41b4d34e4ecd1f9";

/// Quiescence window for search keystrokes
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Command line interface
#[derive(Debug, Default, Parser)]
#[command(name = "brew-catalog", version, about = "Browse the product catalog")]
pub struct Cli {
    /// Catalog endpoint returning `{"record": [...]}`
    #[arg(long, env = "BREW_CATALOG_API_URL")]
    pub api_url: Option<String>,

    /// Milliseconds of typing quiescence before a search is applied
    #[arg(long, env = "BREW_CATALOG_DEBOUNCE_MS")]
    pub debounce_ms: Option<u64>,

    /// Log filter directive (e.g. "info", "brew_catalog=debug")
    #[arg(long = "log", env = "BREW_CATALOG_LOG")]
    pub log_filter: Option<String>,

    /// Read settings from this file instead of the default location
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Location fragment to open, e.g. "#/7?search=ale"
    pub fragment: Option<String>,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_url: String,
    pub search_debounce_ms: u64,
    pub log_filter: String,
    /// Only settable from the command line
    #[serde(skip)]
    pub initial_fragment: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            log_filter: "info".to_string(),
            initial_fragment: "#/".to_string(),
        }
    }
}

impl Settings {
    /// Default location of the settings file
    ///
    /// - Linux: ~/.config/brew-catalog/settings.json
    /// - macOS: ~/Library/Application Support/brew-catalog/settings.json
    /// - Windows: %APPDATA%\brew-catalog\settings.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("brew-catalog").join("settings.json"))
    }

    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the settings file at `path`. A missing file is not an error.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json, path).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Overlay command-line values
    pub fn with_cli(mut self, cli: Cli) -> Self {
        if let Some(api_url) = cli.api_url {
            self.api_url = api_url;
        }
        if let Some(debounce_ms) = cli.debounce_ms {
            self.search_debounce_ms = debounce_ms;
        }
        if let Some(log_filter) = cli.log_filter {
            self.log_filter = log_filter;
        }
        if let Some(fragment) = cli.fragment {
            self.initial_fragment = fragment;
        }
        self
    }

    /// Resolve all layers.
    ///
    /// A broken settings file does not stop the application; its error is
    /// returned alongside the settings so it can be logged once logging is up.
    pub fn load(cli: Cli) -> (Self, Option<ConfigError>) {
        let path = cli.settings.clone().or_else(Self::default_path);

        let (base, problem) = match path.as_deref().map(Self::from_file) {
            Some(Ok(Some(settings))) => (settings, None),
            Some(Ok(None)) | None => (Self::default(), None),
            Some(Err(err)) => (Self::default(), Some(err)),
        };

        (base.with_cli(cli), problem)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.search_debounce(), Duration::from_millis(300));
        assert_eq!(settings.initial_fragment, "#/");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{"search_debounce_ms": 150}"#, Path::new("settings.json"))
                .unwrap();

        assert_eq!(settings.search_debounce_ms, 150);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = Settings::from_json(r#"{"colour": "red"}"#, Path::new("settings.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = std::env::temp_dir().join("brew-catalog-missing-settings.json");
        assert!(Settings::from_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = Cli::parse_from([
            "brew-catalog",
            "--api-url",
            "http://localhost:9000/catalog",
            "--debounce-ms",
            "50",
            "#/7?search=ale",
        ]);
        let base = Settings {
            api_url: "http://file".into(),
            ..Settings::default()
        };

        let settings = base.with_cli(cli);

        assert_eq!(settings.api_url, "http://localhost:9000/catalog");
        assert_eq!(settings.search_debounce_ms, 50);
        assert_eq!(settings.initial_fragment, "#/7?search=ale");
    }

    #[test]
    fn test_load_reports_broken_file() {
        let path = std::env::temp_dir().join(format!(
            "brew-catalog-broken-settings-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{not json").unwrap();

        let cli = Cli {
            settings: Some(path.clone()),
            ..Cli::default()
        };
        let (settings, problem) = Settings::load(cli);
        fs::remove_file(&path).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(matches!(problem, Some(ConfigError::Parse { .. })));
    }
}
