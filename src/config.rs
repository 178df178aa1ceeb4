//! Runtime configuration
//!
//! Resolves the Gemini credential and output locations from the secrets file
//! and environment. The conversion engine never reads configuration; only the
//! explanation client and chart tools receive it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const SECRETS_PATH_VAR: &str = "UNITCONV_SECRETS_PATH";
pub const MODEL_VAR: &str = "UNITCONV_GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "UNITCONV_GEMINI_BASE_URL";
pub const TIMEOUT_VAR: &str = "UNITCONV_EXPLAIN_TIMEOUT_SECS";
pub const CHART_DIR_VAR: &str = "UNITCONV_CHART_DIR";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read secrets file {path}: {source}")]
    ReadSecrets {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid secrets file {path}: {source}")]
    ParseSecrets {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Contents of the secrets file
#[derive(Debug, Default, Deserialize)]
pub struct Secrets {
    #[serde(rename = "GEMINI_API_KEY")]
    pub gemini_api_key: Option<String>,
}

/// Settings for the Gemini explanation client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Application configuration
#[derive(Debug)]
pub struct Config {
    /// `None` when no API key was found or the explanation settings are invalid
    pub gemini: Option<GeminiConfig>,
    /// Why `gemini` is `None` despite settings being present
    pub gemini_error: Option<ConfigError>,
    pub chart_dir: PathBuf,
}

impl Config {
    /// Load configuration from the secrets file and process environment
    ///
    /// Never fails: a broken secrets file or explanation setting only
    /// disables explanations and is kept in `gemini_error`.
    pub fn load() -> Self {
        let env = |name: &str| std::env::var(name).ok();
        let secrets_path = env(SECRETS_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir().join("secrets.toml"));
        Self::from_sources(read_secrets(&secrets_path), env)
    }

    /// Build configuration from the secrets file result and an environment lookup
    ///
    /// The secrets file takes precedence over the environment for the API key.
    pub fn from_sources<F>(secrets: Result<Option<Secrets>, ConfigError>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let chart_dir = env(CHART_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir().join("charts"));

        let (gemini, gemini_error) = match secrets.and_then(|s| gemini_from_sources(s, &env)) {
            Ok(gemini) => (gemini, None),
            Err(e) => (None, Some(e)),
        };

        Self {
            gemini,
            gemini_error,
            chart_dir,
        }
    }

    pub fn explanations_enabled(&self) -> bool {
        self.gemini.is_some()
    }
}

fn gemini_from_sources<F>(secrets: Option<Secrets>, env: &F) -> Result<Option<GeminiConfig>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = secrets
        .and_then(|s| s.gemini_api_key)
        .or_else(|| env(API_KEY_VAR))
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let timeout_secs = match env(TIMEOUT_VAR) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue { var: TIMEOUT_VAR, value })?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    Ok(api_key.map(|api_key| GeminiConfig {
        api_key,
        model: env(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        base_url: env(BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string(),
        timeout: Duration::from_secs(timeout_secs),
    }))
}

/// Read the secrets file; a missing file is not an error
pub fn read_secrets(path: &Path) -> Result<Option<Secrets>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadSecrets {
        path: path.display().to_string(),
        source,
    })?;
    let secrets = toml::from_str(&contents).map_err(|source| ConfigError::ParseSecrets {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(secrets))
}

/// The `data/` directory at the project root
pub fn data_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path
}
