// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings are layered: built-in defaults, then the TOML config file, then
//! `GRAPHYARD_*` environment variables.

use crate::algo::DEFAULT_TSP_MEMBER_LIMIT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "GRAPHYARD";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Graph document used when `--graph` is not given
    pub graph_file: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Largest node subset accepted by the TSP solver
    pub tsp_member_limit: usize,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph_file: None,
            log_level: "info".to_string(),
            tsp_member_limit: DEFAULT_TSP_MEMBER_LIMIT,
            color: true,
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::get`] and [`Config::set`]
    pub const KEYS: [&'static str; 4] = ["graph_file", "log_level", "tsp_member_limit", "color"];

    /// Read a setting as text
    pub fn get(&self, key: &str) -> Result<String> {
        Ok(match key {
            "graph_file" => self
                .graph_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "log_level" => self.log_level.clone(),
            "tsp_member_limit" => self.tsp_member_limit.to_string(),
            "color" => self.color.to_string(),
            other => anyhow::bail!("Unknown config key: {}. Valid: {}", other, Self::KEYS.join(", ")),
        })
    }

    /// Update a setting from text
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "graph_file" => {
                self.graph_file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "log_level" => {
                let level = value.to_lowercase();
                if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
                    anyhow::bail!("Unknown log level: {}. Valid: trace, debug, info, warn, error", value);
                }
                self.log_level = level;
            }
            "tsp_member_limit" => {
                let limit: usize = value
                    .parse()
                    .with_context(|| format!("tsp_member_limit must be a number, got {value}"))?;
                if limit == 0 {
                    anyhow::bail!("tsp_member_limit must be at least 1");
                }
                self.tsp_member_limit = limit;
            }
            "color" => {
                self.color = value
                    .parse()
                    .with_context(|| format!("color must be true or false, got {value}"))?;
            }
            other => anyhow::bail!("Unknown config key: {}. Valid: {}", other, Self::KEYS.join(", ")),
        }
        Ok(())
    }

    /// Write the configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Default location of the config file
#[must_use]
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("org", "hyperpolymath", "graphyard")
        .map(|d| d.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".graphyard.toml"))
}

/// Load configuration from `path` (or the default location) and the environment
pub fn load(path: Option<&Path>) -> Result<Config> {
    build(path, true)
}

/// Load only the config file layer, without environment overrides
pub fn load_file(path: Option<&Path>) -> Result<Config> {
    build(path, false)
}

fn build(path: Option<&Path>, with_env: bool) -> Result<Config> {
    let path = path.map_or_else(default_path, Path::to_path_buf);

    let mut builder = ::config::Config::builder().add_source(
        ::config::File::from(path.as_path())
            .format(::config::FileFormat::Toml)
            .required(false),
    );
    if with_env {
        builder = builder.add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));
    }

    let settings = builder
        .build()
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    settings
        .try_deserialize()
        .with_context(|| format!("Invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = TempDir::new().unwrap();
        let config = load(Some(&dir.path().join("none.toml"))).unwrap();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.tsp_member_limit, DEFAULT_TSP_MEMBER_LIMIT);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("graph_file", "/tmp/g.json").unwrap();
        config.set("tsp_member_limit", "9").unwrap();
        config.set("color", "false").unwrap();
        config.save(&path).unwrap();

        let loaded = load(Some(&path)).unwrap();
        assert_eq!(loaded.graph_file, Some(PathBuf::from("/tmp/g.json")));
        assert_eq!(loaded.tsp_member_limit, 9);
        assert!(!loaded.color);
    }

    #[test]
    fn test_load_file_matches_saved_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set("log_level", "warn").unwrap();
        config.save(&path).unwrap();

        assert_eq!(load_file(Some(&path)).unwrap(), config);
        assert_eq!(load_file(Some(&dir.path().join("none.toml"))).unwrap(), Config::default());
    }

    #[test]
    fn test_get_set_validation() {
        let mut config = Config::default();

        assert!(config.set("log_level", "loud").is_err());
        assert!(config.set("tsp_member_limit", "many").is_err());
        assert!(config.set("tsp_member_limit", "0").is_err());
        assert_eq!(config.tsp_member_limit, DEFAULT_TSP_MEMBER_LIMIT);
        assert!(config.set("nope", "1").is_err());
        assert!(config.get("nope").is_err());

        config.set("log_level", "DEBUG").unwrap();
        assert_eq!(config.get("log_level").unwrap(), "debug");
        assert_eq!(config.get("graph_file").unwrap(), "");
    }
}
