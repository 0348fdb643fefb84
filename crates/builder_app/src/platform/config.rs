//! Startup configuration: an optional RON file, a `.env` file, and the
//! process environment, in increasing order of precedence.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use builder_engine::{
    parse_base_url, Credential, GenerationSettings, InvalidBaseUrl, Url, DEFAULT_BASE_URL,
};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "resource_builder.ron";
pub const API_KEY_ENV: &str = "API_KEY";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const BASE_URL_ENV: &str = "RESOURCE_BUILDER_BASE_URL";
pub const LOG_LEVEL_ENV: &str = "RESOURCE_BUILDER_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error(transparent)]
    InvalidBaseUrl(#[from] InvalidBaseUrl),
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

/// Settings accepted in `resource_builder.ron`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    base_url: Option<String>,
    log_destination: Option<LogDestination>,
    log_level: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credential: Option<Credential>,
    pub base_url: Url,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    /// Loads `.env`, then the config file (if present) from `dir`, then the
    /// process environment.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        // A missing .env file is the common case.
        let _ = dotenvy::dotenv();

        let path = dir.join(CONFIG_FILENAME);
        let contents = read_config_file(&path)?;
        Self::from_sources(&path, contents.as_deref(), |key| std::env::var(key).ok())
    }

    pub(crate) fn from_sources(
        path: &Path,
        file_contents: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file: FileConfig = match file_contents {
            Some(text) => ron::from_str(text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            None => FileConfig::default(),
        };

        let credential = env(API_KEY_ENV)
            .and_then(|key| Credential::new(key))
            .or_else(|| env(GEMINI_API_KEY_ENV).and_then(|key| Credential::new(key)));

        let base_url = env(BASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&base_url)?;

        let log_level = match env(LOG_LEVEL_ENV).or(file.log_level) {
            Some(raw) => raw
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::InvalidLogLevel(raw))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            credential,
            base_url,
            log_destination: file.log_destination.unwrap_or_default(),
            log_level,
            request_timeout: file.request_timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            request_timeout: self.request_timeout,
            ..GenerationSettings::new(self.base_url.clone())
        }
    }
}

/// Reads the config file; a missing file is `Ok(None)`.
fn read_config_file(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn path() -> PathBuf {
        PathBuf::from(CONFIG_FILENAME)
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = AppConfig::from_sources(&path(), None, env_of(&[])).unwrap();

        assert!(config.credential.is_none());
        assert_eq!(config.base_url.as_str(), "https://generativelanguage.googleapis.com/");
        assert_eq!(config.log_destination, LogDestination::File);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn api_key_takes_precedence_over_gemini_key() {
        let config = AppConfig::from_sources(
            &path(),
            None,
            env_of(&[(API_KEY_ENV, "primary-key-1"), (GEMINI_API_KEY_ENV, "fallback-key-2")]),
        )
        .unwrap();
        assert_eq!(config.credential, Credential::new("primary-key-1"));
    }

    #[test]
    fn blank_api_key_falls_back_to_gemini_key() {
        let config = AppConfig::from_sources(
            &path(),
            None,
            env_of(&[(API_KEY_ENV, "  "), (GEMINI_API_KEY_ENV, "fallback-key-2")]),
        )
        .unwrap();
        assert_eq!(config.credential, Credential::new("fallback-key-2"));
    }

    #[test]
    fn file_settings_apply_and_env_overrides_base_url() {
        let file = r#"(
            base_url: Some("http://file.example"),
            log_destination: Some(Both),
            log_level: Some("debug"),
            request_timeout_secs: Some(90),
        )"#;

        let config = AppConfig::from_sources(&path(), Some(file), env_of(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://file.example/");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(90)));

        let config = AppConfig::from_sources(
            &path(),
            Some(file),
            env_of(&[(BASE_URL_ENV, "https://proxy.example")]),
        )
        .unwrap();
        assert_eq!(config.base_url.host_str(), Some("proxy.example"));
        assert_eq!(
            config.generation_settings().request_timeout,
            Some(Duration::from_secs(90))
        );
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = AppConfig::from_sources(&path(), Some("(base_url: 42"), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = AppConfig::from_sources(&path(), None, env_of(&[(BASE_URL_ENV, "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn malformed_base_urls_are_rejected_at_startup() {
        for bad in ["http://", "https://exa mple.com", "http://[::1"] {
            let err = AppConfig::from_sources(&path(), None, env_of(&[(BASE_URL_ENV, bad)]))
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidBaseUrl(ref inner) if inner.url == bad),
                "{bad} should be rejected, got {err:?}"
            );
        }

        let file = r#"(base_url: Some("https://"))"#;
        let err = AppConfig::from_sources(&path(), Some(file), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = AppConfig::from_sources(&path(), None, env_of(&[(LOG_LEVEL_ENV, "loud")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }

    #[test]
    fn config_file_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "(log_destination: Some(Terminal))").unwrap();

        let contents = read_config_file(&path).unwrap();
        let config = AppConfig::from_sources(&path, contents.as_deref(), env_of(&[])).unwrap();
        assert_eq!(config.log_destination, LogDestination::Terminal);
    }

    #[test]
    fn missing_config_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let contents = read_config_file(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(contents, None);
    }

    #[test]
    fn unreadable_config_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as text.
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::create_dir(&path).unwrap();

        let err = read_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
