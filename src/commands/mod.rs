// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod config;
pub mod edge;
pub mod info;
pub mod node;
pub mod query;

use crate::config::Config;
use crate::graph::WeightedGraph;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Settings shared by every command invocation
#[derive(Debug, Clone)]
pub struct Session {
    /// Graph document the command operates on
    pub graph_path: PathBuf,
    /// Print machine-readable JSON instead of text
    pub json: bool,
    /// Colored text output
    pub color: bool,
    /// Effective configuration
    pub config: Config,
}

impl Session {
    /// Build a session, resolving the graph path from the flag or config
    pub fn new(graph: Option<PathBuf>, json: bool, no_color: bool, config: Config) -> Result<Self> {
        let graph_path = graph
            .or_else(|| config.graph_file.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("No graph file given. Use --graph, GRAPHYARD_GRAPH or 'graphyard config graph_file <path>'")
            })?;

        Ok(Self {
            graph_path,
            json,
            color: config.color && !no_color,
            config,
        })
    }

    /// Load the graph document
    pub fn load_graph(&self) -> Result<WeightedGraph> {
        WeightedGraph::load(&self.graph_path)
            .with_context(|| format!("Failed to load graph from {}", self.graph_path.display()))
    }

    /// Load the graph document, or start an empty graph if it does not exist
    pub fn load_or_new(&self) -> Result<WeightedGraph> {
        if self.graph_path.exists() {
            self.load_graph()
        } else {
            info!("Creating new graph at {}", self.graph_path.display());
            Ok(WeightedGraph::new())
        }
    }

    /// Write the graph document back
    pub fn save_graph(&self, graph: &WeightedGraph) -> Result<()> {
        graph
            .save(&self.graph_path)
            .with_context(|| format!("Failed to write {}", self.graph_path.display()))
    }

    /// Highlight a value in text output
    pub fn accent(&self, value: impl Display) -> String {
        if self.color {
            value.bold().green().to_string()
        } else {
            value.to_string()
        }
    }

    /// Dim a value in text output
    pub fn muted(&self, value: impl Display) -> String {
        if self.color {
            value.dimmed().to_string()
        } else {
            value.to_string()
        }
    }

    /// Print a JSON value on stdout
    pub fn emit_json(&self, value: &serde_json::Value) -> Result<()> {
        let content = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

/// JSON value for a distance; infinity becomes `null`
#[must_use]
pub fn distance_value(distance: f64) -> serde_json::Value {
    serde_json::Number::from_f64(distance).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

/// Text form of a distance
#[must_use]
pub fn format_distance(distance: f64) -> String {
    if distance.is_infinite() {
        "unreachable".to_string()
    } else {
        distance.to_string()
    }
}

/// Text form of a node path
#[must_use]
pub fn format_path(path: &[crate::types::NodeId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_value() {
        assert_eq!(distance_value(2.5), serde_json::json!(2.5));
        assert_eq!(distance_value(f64::INFINITY), serde_json::Value::Null);
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[0, 1, 2]), "0 -> 1 -> 2");
        assert_eq!(format_path(&[]), "");
        assert_eq!(format_distance(f64::INFINITY), "unreachable");
        assert_eq!(format_distance(5.0), "5");
    }

    #[test]
    fn test_session_requires_graph() {
        assert!(Session::new(None, false, false, Config::default()).is_err());

        let config = Config {
            graph_file: Some(PathBuf::from("g.json")),
            ..Config::default()
        };
        let session = Session::new(None, false, true, config).unwrap();
        assert_eq!(session.graph_path, PathBuf::from("g.json"));
        assert!(!session.color);
    }
}
