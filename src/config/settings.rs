//! Global settings persisted on disk

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::ModelProfile;
use crate::error::{QueryError, Result};

/// Global configuration (stored in `<config_dir>/claude-query/config.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Verbose logging enabled
    #[serde(default)]
    pub verbose: bool,

    /// Model profiles
    #[serde(default)]
    pub model_profiles: Vec<ModelProfile>,

    /// Default model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model_name: Option<String>,
}

impl GlobalConfig {
    /// Load global configuration from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load() -> Result<Self> {
        let path = super::Config::global_config_path();
        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| QueryError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| QueryError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save configuration to disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self) -> Result<()> {
        let path = super::Config::global_config_path();
        self.save_to_path(&path)
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the API key for a profile: profile value first, then environment
    #[must_use]
    pub fn resolve_api_key(profile: &ModelProfile) -> Option<String> {
        if profile.api_key.is_empty() {
            std::env::var("ANTHROPIC_API_KEY").ok()
        } else {
            Some(profile.api_key.clone())
        }
    }
}
