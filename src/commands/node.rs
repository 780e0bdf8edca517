// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Node management commands - add and list positioned nodes

use super::Session;
use crate::types::{NodeId, Position};
use anyhow::{Context, Result};
use serde_json::json;

/// Run node command
pub fn run(session: &Session, action: &str, id: Option<NodeId>, pos: Option<String>) -> Result<()> {
    match action {
        "add" | "create" => {
            let id = id.ok_or_else(|| anyhow::anyhow!("Node id is required"))?;
            let position = pos
                .as_deref()
                .map(str::parse::<Position>)
                .transpose()
                .with_context(|| format!("Invalid --pos for node {id}"))?;

            let mut graph = session.load_or_new()?;
            let created = graph.add_node(id, position);
            session.save_graph(&graph)?;

            if session.json {
                return session.emit_json(&json!({
                    "id": id,
                    "pos": position.map(|p| p.to_string()),
                    "created": created,
                }));
            }

            let verb = if created { "Created" } else { "Updated" };
            match position {
                Some(p) => println!("{} node {} at {}", verb, session.accent(id), p),
                None => println!("{} node {}", verb, session.accent(id)),
            }
        }

        "list" | "ls" => {
            let graph = session.load_graph()?;

            if session.json {
                let list: Vec<_> = graph
                    .nodes()
                    .into_iter()
                    .map(|n| json!({"id": n.id, "pos": n.position}))
                    .collect();
                return session.emit_json(&json!(list));
            }

            if graph.is_empty() {
                println!("No nodes defined. Use 'graphyard node add <id>' to create one.");
                return Ok(());
            }

            println!("Nodes ({}):", graph.node_count());
            for node in graph.nodes() {
                let out_degree = graph.outgoing(node.id).map(|m| m.len()).unwrap_or(0);
                let in_degree = graph.incoming(node.id).map(|m| m.len()).unwrap_or(0);
                let pos = node
                    .position
                    .map_or_else(|| "-".to_string(), |p| p.to_string());
                println!(
                    "  {}  pos={}  {}",
                    session.accent(node.id),
                    pos,
                    session.muted(format!("out={out_degree} in={in_degree}"))
                );
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: add, list", other);
        }
    }

    Ok(())
}
