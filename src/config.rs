//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::store::{DATA_DIR_NAME, DATA_FILE_NAME};
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON store file
    pub data_path: PathBuf,
    /// Optional JSON file overriding the standard order of service
    pub template_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path().unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME)),
            template_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("LITURGY_DATA_PATH") {
            if path.trim().is_empty() {
                return Err(Error::config(
                    "LITURGY_DATA_PATH is set but empty",
                    "Unset it to use the default location or point it at a .json file",
                ));
            }
            config.data_path = expand(&path);
        }

        if let Ok(path) = env::var("LITURGY_TEMPLATE_PATH") {
            let path = expand(&path);
            if !path.is_file() {
                return Err(Error::config(
                    format!("Template file {} does not exist", path.display()),
                    "Fix LITURGY_TEMPLATE_PATH or unset it to use the standard order of service",
                ));
            }
            config.template_path = Some(path);
        }

        tracing::debug!("Using liturgy store at {}", config.data_path.display());
        Ok(config)
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.trim()).to_string())
}

/// Default store location under the platform data directory
fn default_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(DATA_DIR_NAME).join(DATA_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_json_file() {
        let config = Config::default();
        assert!(config.data_path.ends_with(DATA_FILE_NAME));
        assert!(config.template_path.is_none());
    }

    #[test]
    fn expand_trims_and_keeps_plain_paths() {
        assert_eq!(expand(" /tmp/liturgy.json "), PathBuf::from("/tmp/liturgy.json"));
    }
}
