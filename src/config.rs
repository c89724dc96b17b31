//! Configuration management for the workout core
//!
//! Layers built-in defaults, an optional `workout.toml` and `WORKOUT__*`
//! environment variables, then validates the result.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::fetch::fetcher::DEFAULT_USER_AGENT;

pub const DEFAULT_CONFIG_FILE: &str = "workout";
pub const DEFAULT_STORAGE_DIR: &str = "./workout_data";
pub const DEFAULT_EXERCISES_URL: &str =
    "https://exercisedb-api.vercel.app/api/v1/muscles/upper%20back/exercises";

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Directory holding the credential store file
    /// Environment: WORKOUT__STORAGE_DIR
    pub storage_dir: String,

    /// Exercise collection endpoint
    /// Environment: WORKOUT__EXERCISES_URL
    pub exercises_url: String,

    /// User agent sent with fetches
    pub user_agent: String,
}

impl AppConfig {
    /// Load configuration from `workout.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from the given file stem (if present) with environment overrides
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("storage_dir", DEFAULT_STORAGE_DIR)?
            .set_default("exercises_url", DEFAULT_EXERCISES_URL)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("WORKOUT").separator("__"))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_dir cannot be empty".into()));
        }

        let url = &self.exercises_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "exercises_url must be an http(s) URL, got {}",
                url
            )));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent cannot be empty".into()));
        }

        Ok(())
    }

    /// Get storage directory as PathBuf
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_dir)
    }
}
