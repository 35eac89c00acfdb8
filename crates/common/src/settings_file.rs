use crate::constants::SECRET_ENV_VAR;
use access_token::{Clock, ConfigError, TokenEngine, TokenSettings, DEFAULT_TOKEN_LENGTH};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SettingsFileError {
    #[error("Failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid token settings: {0}")]
    Config(#[from] ConfigError),
}

/// JSON form of [`TokenSettings`]. Absent fields take the library defaults.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub secret: Option<String>,
    pub validate_data: bool,
    pub validate_time: bool,
    pub valid_for_ms: Option<u64>,
    pub time_zero: Option<DateTime<Utc>>,
    pub token_length: Option<usize>,
    pub ensure_at_least_valid_for: bool,
}

impl SettingsFile {
    pub fn load(path: &Path) -> Result<Self, SettingsFileError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded settings file {:?}", path);
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the secret with the one from the environment, if set
    pub fn apply_env(self) -> Self {
        self.with_secret_override(std::env::var(SECRET_ENV_VAR).ok())
    }

    /// Replace the secret when an override is given
    pub fn with_secret_override(mut self, secret: Option<String>) -> Self {
        if let Some(secret) = secret {
            self.secret = Some(secret);
        }
        self
    }

    pub fn into_settings(self) -> TokenSettings {
        TokenSettings {
            secret: self.secret.unwrap_or_default(),
            validate_data: self.validate_data,
            validate_time: self.validate_time,
            valid_for: self.valid_for_ms.map(Duration::from_millis),
            time_zero: self.time_zero,
            token_length: self.token_length.unwrap_or(DEFAULT_TOKEN_LENGTH),
            ensure_at_least_valid_for: self.ensure_at_least_valid_for,
        }
    }

    /// Build an engine reading "now" from the given clock
    pub fn build_engine<C: Clock>(self, clock: C) -> Result<TokenEngine<C>, SettingsFileError> {
        Ok(TokenEngine::with_clock(self.into_settings(), clock)?)
    }
}
