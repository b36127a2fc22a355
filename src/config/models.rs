//! Model profiles and capability facts

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Default API endpoint for the Anthropic Messages API
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Models known to support the prompt-caching beta
///
/// Built once at first use, immutable afterwards. Models not listed here are
/// served through the plain send path; an unknown identifier is not an error.
static PROMPT_CACHING_MODELS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "claude-3-5-sonnet-20240620",
        "claude-3-5-sonnet-20241022",
        "claude-3-5-haiku-20241022",
        "claude-3-opus-20240229",
        "claude-3-haiku-20240307",
    ]
    .into_iter()
    .collect()
});

/// Check whether a model supports the prompt-caching beta
#[must_use]
pub fn supports_prompt_caching(model_name: &str) -> bool {
    PROMPT_CACHING_MODELS.contains(model_name)
}

/// Model profile configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    /// User-friendly name for the profile
    pub name: String,

    /// Actual model identifier (primary key)
    pub model_name: String,

    /// Custom API endpoint (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// API key for authentication; empty means "resolve from environment"
    #[serde(default)]
    pub api_key: String,

    /// Maximum output tokens
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ModelProfile {
    /// Create a new model profile with default transport settings
    #[must_use]
    pub fn new(name: impl Into<String>, model_name: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            name: name.into(),
            model_name: model_name.into(),
            base_url: None,
            api_key: String::new(),
            max_tokens,
            temperature: None,
        }
    }

    /// Get the effective base URL (custom or provider default)
    #[must_use]
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Whether this profile's model supports the prompt-caching beta
    #[must_use]
    pub fn supports_prompt_caching(&self) -> bool {
        supports_prompt_caching(&self.model_name)
    }
}
