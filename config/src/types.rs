// Configuration Types
// All configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model backend settings
    pub model: ModelConfig,
    /// Default project root for runs, if any
    pub project_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            project_root: None,
        }
    }
}

/// Model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Backend selector handed to the gateway ("ChatGPT" or "Gemini")
    pub provider: String,
    /// API key; normally supplied via environment instead
    pub api_key: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "ChatGPT".to_string(),
            api_key: None,
        }
    }
}

impl Config {
    /// Resolve the credential for the configured provider.
    ///
    /// File value wins over environment so a project config can pin a key.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = &self.model.api_key {
            return Some(key.clone());
        }
        let var = match self.model.provider.as_str() {
            "Gemini" => "GOOGLE_API_KEY",
            _ => "OPENAI_API_KEY",
        };
        std::env::var(var).ok()
    }
}
