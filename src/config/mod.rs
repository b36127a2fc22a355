//! Configuration management
//!
//! Profiles live in a global JSON config file; API keys resolve from the
//! profile or the `ANTHROPIC_API_KEY` environment variable.

pub mod models;
pub mod settings;

use std::path::PathBuf;

pub use self::{
    models::{supports_prompt_caching, ModelProfile},
    settings::GlobalConfig,
};
use crate::error::{QueryError, Result};

/// Loaded application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub global: GlobalConfig,
}

impl Config {
    /// Load configuration from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn load() -> Result<Self> {
        let global = GlobalConfig::load()?;
        Ok(Self { global })
    }

    /// Get the configuration directory path
    #[must_use]
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("claude-query")
    }

    /// Get the global config file path
    #[must_use]
    pub fn global_config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Get a model profile by model name
    #[must_use]
    pub fn get_model(&self, name: &str) -> Option<&ModelProfile> {
        self.global
            .model_profiles
            .iter()
            .find(|profile| profile.model_name == name)
    }

    /// Get the default model profile
    #[must_use]
    pub fn default_model(&self) -> Option<&ModelProfile> {
        self.global
            .default_model_name
            .as_ref()
            .and_then(|name| self.get_model(name))
            .or_else(|| self.global.model_profiles.first())
    }

    /// Resolve a profile by name, falling back to the default
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ModelNotFound`] if no matching profile exists
    pub fn resolve_model(&self, name: Option<&str>) -> Result<&ModelProfile> {
        match name {
            Some(name) => self
                .get_model(name)
                .ok_or_else(|| QueryError::ModelNotFound(name.to_string())),
            None => self
                .default_model()
                .ok_or_else(|| QueryError::InvalidConfig("no model profiles configured".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_profiles() -> Config {
        let mut global = GlobalConfig::default();
        global
            .model_profiles
            .push(ModelProfile::new("haiku", "claude-3-5-haiku-20241022", 4096));
        global
            .model_profiles
            .push(ModelProfile::new("sonnet", "claude-3-5-sonnet-20241022", 8192));
        global.default_model_name = Some("claude-3-5-sonnet-20241022".into());
        Config { global }
    }

    #[test]
    fn test_config_paths() {
        let global_path = Config::global_config_path();
        assert!(global_path.ends_with("claude-query/config.json"));
    }

    #[test]
    fn test_resolve_model_by_name() {
        let config = config_with_profiles();
        let profile = config.resolve_model(Some("claude-3-5-haiku-20241022")).unwrap();
        assert_eq!(profile.name, "haiku");
    }

    #[test]
    fn test_resolve_model_falls_back_to_default() {
        let config = config_with_profiles();
        let profile = config.resolve_model(None).unwrap();
        assert_eq!(profile.name, "sonnet");
    }

    #[test]
    fn test_resolve_unknown_model_is_an_error() {
        let config = config_with_profiles();
        let err = config.resolve_model(Some("claude-nonexistent")).unwrap_err();
        assert!(matches!(err, QueryError::ModelNotFound(_)));
    }
}
