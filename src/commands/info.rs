// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Info command - summary of the graph document

use super::Session;
use anyhow::Result;
use serde_json::json;

/// Run the info command
pub fn run(session: &Session) -> Result<()> {
    let graph = session.load_graph()?;
    let connected = graph.is_strongly_connected();

    if session.json {
        return session.emit_json(&json!({
            "path": session.graph_path.display().to_string(),
            "nodes": graph.node_count(),
            "edges": graph.edge_count(),
            "strongly_connected": connected,
        }));
    }

    if graph.is_empty() {
        eprintln!("Warning: Graph is empty. Use 'graphyard node add' first.");
    }

    println!("Graph: {}", session.graph_path.display());
    println!("  nodes: {}", session.accent(graph.node_count()));
    println!("  edges: {}", session.accent(graph.edge_count()));
    println!("  strongly connected: {}", connected);

    Ok(())
}
