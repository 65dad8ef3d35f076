//! Configuration management for the avatar CLI
//!
//! Stores the Gemini API key and defaults in ~/.config/tutorai-avatar/config.toml.
//! Environment variables take precedence over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use tutorai_avatar::config::{ENV_API_KEY, ENV_BASE_URL, ENV_MODEL};
use tutorai_avatar::{PersonaKey, PipelineConfig};

const CONFIG_DIR: &str = "tutorai-avatar";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub default_persona: PersonaKey,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set API key
    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    /// Set model name
    pub fn set_model(&mut self, model: String) {
        self.model = Some(model);
    }

    /// Set default persona
    pub fn set_default_persona(&mut self, persona: PersonaKey) {
        self.default_persona = persona;
    }

    /// Value from the file for a pipeline environment variable
    fn file_value(&self, name: &str) -> Option<String> {
        match name {
            ENV_API_KEY => self.api_key.clone(),
            ENV_MODEL => self.model.clone(),
            ENV_BASE_URL => self.base_url.clone(),
            _ => None,
        }
    }

    /// Pipeline configuration: environment first, then this file
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        self.pipeline_config_with(|name| std::env::var(name).ok())
    }

    fn pipeline_config_with<F>(&self, env: F) -> Result<PipelineConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        PipelineConfig::from_vars(|name| {
            env(name)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| self.file_value(name))
        })
            .context("No Gemini API key. Set GEMINI_API_KEY or run 'tutorai-avatar login'.")
    }
}
