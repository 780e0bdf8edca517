// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Edge management commands - create and list weighted edges

use super::Session;
use crate::types::NodeId;
use anyhow::{Context, Result};
use serde_json::json;

/// Run edge command
pub fn run(
    session: &Session,
    action: &str,
    src: Option<NodeId>,
    dest: Option<NodeId>,
    weight: Option<f64>,
) -> Result<()> {
    let mut graph = session.load_graph()?;

    match action {
        "add" | "create" => {
            let src = src.ok_or_else(|| anyhow::anyhow!("Source node is required"))?;
            let dest = dest.ok_or_else(|| anyhow::anyhow!("Destination node is required"))?;
            let weight = weight.ok_or_else(|| anyhow::anyhow!("Edge weight is required"))?;

            let previous = graph.edge_weight(src, dest);
            graph
                .add_edge(src, dest, weight)
                .with_context(|| format!("Cannot add edge {src} -> {dest}"))?;
            session.save_graph(&graph)?;

            if session.json {
                return session.emit_json(&json!({
                    "src": src,
                    "dest": dest,
                    "w": weight,
                    "replaced": previous,
                }));
            }

            match previous {
                Some(old) => println!("Updated edge: {} -> {} ({} => {})", src, dest, old, session.accent(weight)),
                None => println!("Created edge: {} -> {} ({})", src, dest, session.accent(weight)),
            }
        }

        "list" | "ls" => {
            let edges = graph.edges();

            if session.json {
                let list: Vec<_> = edges
                    .iter()
                    .map(|&(src, dest, w)| json!({"src": src, "w": w, "dest": dest}))
                    .collect();
                return session.emit_json(&json!(list));
            }

            if edges.is_empty() {
                println!("No edges defined. Use 'graphyard edge add <src> <dest> <weight>' to create one.");
                return Ok(());
            }

            println!("Edges ({}):", edges.len());
            for (src, dest, w) in edges {
                println!("  {} --[{}]--> {}", src, session.muted(w), dest);
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: add, list", other);
        }
    }

    Ok(())
}
