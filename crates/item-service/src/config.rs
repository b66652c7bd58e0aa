// File: src/config.rs
// Purpose: Configuration parsing from item-service.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub messages: MessagesConfig,

    #[serde(default)]
    pub seed: SeedConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Message bundle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Directory with extra `.properties` bundles layered over the built-in ones
    #[serde(default)]
    pub dir: Option<String>,

    /// Bundle base names looked up in `dir`
    #[serde(default = "default_basenames")]
    pub basenames: Vec<String>,

    #[serde(default = "default_locale")]
    pub default_locale: String,
}

/// Demo data inserted at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_basenames() -> Vec<String> {
    vec!["errors".to_string()]
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            basenames: default_basenames(),
            default_locale: default_locale(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./item-service.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("item-service.toml")
    }

    /// Apply `HOST`, `PORT`, `MESSAGES_DIR` and `DEFAULT_LOCALE` overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", port))?;
        }
        if let Some(dir) = var("MESSAGES_DIR") {
            self.messages.dir = Some(dir);
        }
        if let Some(locale) = var("DEFAULT_LOCALE") {
            self.messages.default_locale = locale;
        }
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
