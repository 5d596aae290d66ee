// Configuration Loader
// Layered configuration loading system

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::types::Config;

/// Configuration loader with layered support
pub struct ConfigLoader {
    /// Global config directory
    global_dir: PathBuf,
    /// Project config directory
    project_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        let global_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".filebot");

        Self {
            global_dir,
            project_dir: None,
        }
    }

    /// Set project directory
    pub fn with_project_dir(mut self, dir: PathBuf) -> Self {
        self.project_dir = Some(dir);
        self
    }

    /// Load configuration with CLI overrides.
    ///
    /// Layers in order: built-in defaults, global config
    /// (~/.filebot/config.toml), project config (.filebot/config.toml),
    /// environment, then CLI overrides.
    pub fn load_with_cli_overrides(&self, cli_overrides: Vec<(String, String)>) -> Result<Config> {
        let mut config = Config::default();

        if let Some(global) = self.read_config_file(&self.global_dir.join("config.toml"))? {
            config = global;
        }

        if let Some(project_dir) = &self.project_dir
            && let Some(project) =
                self.read_config_file(&project_dir.join(".filebot").join("config.toml"))?
        {
            config = merge(config, project);
        }

        if let Ok(provider) = std::env::var("FILEBOT_PROVIDER") {
            config.model.provider = provider;
        }

        for (key, value) in cli_overrides {
            apply_override(&mut config, &key, &value)?;
        }

        Ok(config)
    }

    /// Shorthand for a load without overrides.
    pub fn load(&self) -> Result<Config> {
        self.load_with_cli_overrides(Vec::new())
    }

    fn read_config_file(&self, path: &Path) -> Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("invalid config at {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config layer");
        Ok(Some(config))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Later layer wins field by field where it carries a value.
fn merge(base: Config, over: Config) -> Config {
    Config {
        model: crate::types::ModelConfig {
            provider: if over.model.provider.is_empty() {
                base.model.provider
            } else {
                over.model.provider
            },
            api_key: over.model.api_key.or(base.model.api_key),
        },
        project_root: over.project_root.or(base.project_root),
    }
}

fn apply_override(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "model.provider" => config.model.provider = value.to_string(),
        "model.api_key" => config.model.api_key = Some(value.to_string()),
        "project_root" => config.project_root = Some(PathBuf::from(value)),
        other => anyhow::bail!("unknown config key: {other}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_any_files() {
        let loader = ConfigLoader {
            global_dir: PathBuf::from("/nonexistent-filebot-test"),
            project_dir: None,
        };
        let config = loader.load().expect("load defaults");
        assert_eq!(config.model.provider, "ChatGPT");
        assert!(config.project_root.is_none());
    }

    #[test]
    fn project_layer_overrides_global() {
        let dir = tempfile::tempdir().expect("tempdir");
        let global_dir = dir.path().join("home").join(".filebot");
        std::fs::create_dir_all(&global_dir).expect("mkdir");
        std::fs::write(
            global_dir.join("config.toml"),
            "[model]\nprovider = \"ChatGPT\"\n",
        )
        .expect("write global");

        let project = dir.path().join("proj");
        std::fs::create_dir_all(project.join(".filebot")).expect("mkdir");
        std::fs::write(
            project.join(".filebot").join("config.toml"),
            "[model]\nprovider = \"Gemini\"\n",
        )
        .expect("write project");

        let loader = ConfigLoader {
            global_dir,
            project_dir: Some(project),
        };
        let config = loader.load().expect("load layered");
        assert_eq!(config.model.provider, "Gemini");
    }

    #[test]
    fn cli_override_wins() {
        let loader = ConfigLoader {
            global_dir: PathBuf::from("/nonexistent-filebot-test"),
            project_dir: None,
        };
        let config = loader
            .load_with_cli_overrides(vec![("model.provider".to_string(), "Gemini".to_string())])
            .expect("load with overrides");
        assert_eq!(config.model.provider, "Gemini");
    }

    #[test]
    fn unknown_override_key_rejected() {
        let loader = ConfigLoader::new();
        let err = loader
            .load_with_cli_overrides(vec![("bogus".to_string(), "1".to_string())])
            .expect_err("bogus key");
        assert!(err.to_string().contains("unknown config key"));
    }
}
