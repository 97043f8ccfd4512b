//! TOML configuration.
//!
//! ```toml
//! [db]
//! path = "./data/shamba.sqlite"
//!
//! [server]
//! bind = "127.0.0.1:7340"
//!
//! [classifier]
//! utc_offset_hours = 3
//!
//! [connectors.filesystem]
//! root = "./docs"
//! include_globs = ["**/*.md", "**/*.txt"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::classifier::SystemClock;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub connectors: ConnectorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClassifierConfig {
    /// Hours east of UTC used to decide the current month for the season
    /// calendar signal.
    #[serde(default)]
    pub utc_offset_hours: i32,
}

impl ClassifierConfig {
    pub fn clock(&self) -> SystemClock {
        SystemClock::new(self.utc_offset_hours)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConnectorsConfig {
    pub filesystem: Option<FilesystemConnectorConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesystemConnectorConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string(), "**/*.txt".to_string()]
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if !(-12..=14).contains(&config.classifier.utc_offset_hours) {
        anyhow::bail!("classifier.utc_offset_hours must be in [-12, 14]");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config("[db]\npath = \"/tmp/shamba.sqlite\"\n").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:7340");
        assert_eq!(config.classifier.utc_offset_hours, 0);
        assert!(config.connectors.filesystem.is_none());
    }

    #[test]
    fn test_filesystem_connector_defaults() {
        let config = parse_config(
            r#"
            [db]
            path = "/tmp/shamba.sqlite"

            [connectors.filesystem]
            root = "/srv/docs"
            "#,
        )
        .unwrap();
        let fs = config.connectors.filesystem.unwrap();
        assert_eq!(fs.include_globs, vec!["**/*.md", "**/*.txt"]);
        assert!(fs.exclude_globs.is_empty());
        assert!(!fs.follow_symlinks);
    }

    #[test]
    fn test_rejects_out_of_range_offset() {
        let err = parse_config(
            "[db]\npath = \"x.sqlite\"\n[classifier]\nutc_offset_hours = 20\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("utc_offset_hours"));
    }

    #[test]
    fn test_missing_db_section_fails() {
        assert!(parse_config("[server]\nbind = \"0.0.0.0:1\"\n").is_err());
    }
}
