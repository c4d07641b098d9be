//! Configuration loading.
//!
//! Settings live in `config.toml` under the platform config directory. A
//! `config.json` of the form `{"wordnik": {"api_key": "..."}}` is accepted as
//! well, and `WORDNIK_API_KEY` overrides whatever key the file holds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::dictionary::RetryPolicy;

pub const API_KEY_ENV_VAR: &str = "WORDNIK_API_KEY";
pub const DEFAULT_WORD_LENGTH: usize = 5;
pub const DEFAULT_MAX_GUESSES: usize = 10;
const APP_DIR: &str = "bagels-with-words";
const LEGACY_CONFIG_FILE: &str = "config.json";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error(
        "No Wordnik API key configured. Set WORDNIK_API_KEY, add `api_key` under [wordnik] \
         in {path}, or play offline with --wordlist"
    )]
    MissingApiKey { path: PathBuf },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// API key wrapper that never shows up in logs or debug output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(••••••••)")
    }
}

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wordnik: WordnikConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// Settings for the Wordnik dictionary client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordnikConfig {
    pub api_key: ApiKey,
    /// Base URL of the v4 API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Attempts per lookup before giving up.
    pub max_retries: u32,
    /// Base backoff between attempts, doubled each retry.
    pub retry_backoff_ms: u64,
}

impl Default for WordnikConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            base_url: "https://api.wordnik.com/v4".to_string(),
            timeout_seconds: 10,
            max_retries: 3,
            retry_backoff_ms: 250,
        }
    }
}

impl WordnikConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_backoff_ms))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Default game settings, overridable from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub word_length: usize,
    pub max_guesses: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_length: DEFAULT_WORD_LENGTH,
            max_guesses: DEFAULT_MAX_GUESSES,
        }
    }
}

impl Config {
    /// Path of the default configuration file.
    ///
    /// `~/.config/bagels-with-words/config.toml` on Linux, the equivalent
    /// elsewhere via `dirs::config_dir()`, falling back to the current
    /// directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join(APP_DIR).join("config.toml")
    }

    /// Resolve which file to read: an explicit path wins, then the default
    /// path, then a `config.json` in the working directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        let default = Self::config_path();
        if !default.exists() {
            let legacy = PathBuf::from(LEGACY_CONFIG_FILE);
            if legacy.exists() {
                return legacy;
            }
        }
        default
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults. `.json` files are parsed as JSON,
    /// everything else as TOML. The API key from the environment, when set,
    /// replaces the file's.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Self::parse(path, &content)?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV_VAR)
            && !key.trim().is_empty()
        {
            config.wordnik.api_key = ApiKey::new(key.trim());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed: Result<Config, String> = if is_json {
            serde_json::from_str(content).map_err(|e| e.to_string())
        } else {
            toml::from_str(content).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| ConfigError::ParseError {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.word_length == 0 {
            return Err(ConfigError::ValidationError {
                message: "game.word_length must be at least 1".to_string(),
            });
        }
        if self.game.max_guesses == 0 {
            return Err(ConfigError::ValidationError {
                message: "game.max_guesses must be at least 1".to_string(),
            });
        }
        if self.wordnik.max_retries == 0 {
            return Err(ConfigError::ValidationError {
                message: "wordnik.max_retries must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The API key, or `MissingApiKey` pointing at the file to edit.
    pub fn require_api_key(&self, path: &Path) -> Result<&ApiKey, ConfigError> {
        if self.wordnik.api_key.is_empty() {
            Err(ConfigError::MissingApiKey {
                path: path.to_path_buf(),
            })
        } else {
            Ok(&self.wordnik.api_key)
        }
    }
}
