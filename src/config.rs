//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Every
//! section has defaults, so a partial file (or none at all, via
//! `load_or_default`) still yields a usable configuration.
//! Secrets (API keys) are referenced by env-var name in the config and
//! resolved at runtime into `SecretString`s.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::crew::CrewSpec;
use crate::storage::DEFAULT_WATCHLIST_FILE;
use crate::types::DeskError;

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub watchlist: WatchlistConfig,
    pub growth_api: GrowthApiConfig,
    /// Overrides the built-in analysis crew when present.
    pub crew: Option<CrewSpec>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WatchlistConfig {
    pub file: PathBuf,
    /// Command printed after saving; the watchlist path is appended.
    pub tournament_command: String,
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_WATCHLIST_FILE),
            tournament_command: "python tournament.py".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GrowthApiConfig {
    pub base_url: String,
    pub api_key_env: String,
    pub symbol: String,
    pub limit: u32,
    pub timeout_secs: u64,
}

impl Default for GrowthApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://financialmodelingprep.com/stable".to_string(),
            api_key_env: "FMP_API_KEY".to_string(),
            symbol: "AAPL".to_string(),
            limit: 1,
            timeout_secs: 15,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load configuration, using defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        if config.growth_api.limit == 0 {
            return Err(DeskError::Config("growth_api.limit must be at least 1".into()).into());
        }
        Ok(config)
    }

    /// The configured crew, or the built-in financial analysis crew.
    pub fn crew_or_default(&self) -> CrewSpec {
        self.crew
            .clone()
            .unwrap_or_else(crate::crew::defaults::financial_analysis_crew)
    }

    /// Resolve an environment variable name to its (secret) value.
    pub fn resolve_secret(env_name: &str) -> Result<SecretString, DeskError> {
        match std::env::var(env_name) {
            Ok(v) if !v.trim().is_empty() => Ok(SecretString::new(v)),
            _ => Err(DeskError::MissingSecret(env_name.to_string())),
        }
    }
}
