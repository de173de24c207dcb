//! Shared configuration for backoffice clients.
//!
//! TOML config file, environment overrides, translation into a ready
//! `ApiClient`, and a file-backed store for UI preferences.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use backoffice_core::{ApiClient, CoreError, PreferenceBackend, Preferences, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Initial UI preferences when no preference file exists yet.
    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Backend base URL (e.g. "http://localhost:8000").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}
fn default_timeout() -> u64 {
    30
}

impl ApiSettings {
    pub fn url(&self) -> Result<url::Url, ConfigError> {
        self.base_url.parse().map_err(|_| ConfigError::Validation {
            field: "api.base_url".into(),
            reason: format!("invalid URL: {}", self.base_url),
        })
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Build the HTTP facade described by these settings.
    pub fn client(&self) -> Result<ApiClient, ConfigError> {
        let url = self.url()?;
        ApiClient::new(url, &self.transport()).map_err(|e| ConfigError::Validation {
            field: "api".into(),
            reason: e.to_string(),
        })
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    ProjectDirs::from("com", "backoffice", "backoffice").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("backoffice");
            p
        },
        |dirs| dirs.config_dir().to_path_buf(),
    )
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Where [`FilePreferences`] keeps theme and language by default.
pub fn preferences_path() -> PathBuf {
    config_dir().join("preferences.toml")
}

// ── Config loading ──────────────────────────────────────────────────

/// Layered sources: defaults, then the TOML file, then environment.
///
/// `BACKOFFICE_API__BASE_URL` style variables map onto nested keys;
/// `BACKOFFICE_API_URL` is accepted as a shortcut for the base URL.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("BACKOFFICE_").split("__"))
        .merge(
            Env::raw()
                .only(&["BACKOFFICE_API_URL"])
                .map(|_| "api.base_url".into()),
        )
}

/// Load the full Config from `path` + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let config: Config = figment(path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Durable preferences ─────────────────────────────────────────────

/// TOML file holding the last chosen theme and language.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    fallback: Option<Preferences>,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fallback: None,
        }
    }

    /// Preferences to start from while the file does not exist yet.
    #[must_use]
    pub fn with_fallback(mut self, preferences: Preferences) -> Self {
        self.fallback = Some(preferences);
        self
    }

    fn read(&self) -> Result<Option<Preferences>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let prefs = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(prefs))
    }

    fn write(&self, preferences: &Preferences) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(preferences)?)?;
        Ok(())
    }
}

impl Default for FilePreferences {
    fn default() -> Self {
        Self::new(preferences_path())
    }
}

impl PreferenceBackend for FilePreferences {
    fn load(&self) -> Result<Option<Preferences>, CoreError> {
        let stored = self.read().map_err(|e| CoreError::Config {
            message: e.to_string(),
        })?;
        Ok(stored.or(self.fallback))
    }

    fn save(&self, preferences: &Preferences) -> Result<(), CoreError> {
        debug!(path = %self.path.display(), "saving preferences");
        self.write(preferences).map_err(|e| CoreError::Config {
            message: e.to_string(),
        })
    }
}
