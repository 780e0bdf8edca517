// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Query commands - thin wrappers over the graph algorithms

use super::{distance_value, format_distance, format_path, Session};
use crate::types::NodeId;
use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

/// Shortest path between two nodes
pub fn path(session: &Session, src: NodeId, dest: NodeId) -> Result<()> {
    let graph = session.load_graph()?;
    let (distance, path) = graph
        .shortest_path(src, dest)
        .with_context(|| format!("Cannot compute path {src} -> {dest}"))?;

    if session.json {
        return session.emit_json(&json!({"distance": distance_value(distance), "path": path}));
    }

    if path.is_empty() {
        println!("No path from {} to {}", src, dest);
    } else {
        println!("{}", format_path(&path));
        println!("  distance: {}", session.accent(format_distance(distance)));
    }
    Ok(())
}

/// Eccentricity of one node
pub fn eccentricity(session: &Session, id: NodeId) -> Result<()> {
    let graph = session.load_graph()?;
    let distance = graph
        .max_shortest_path(id)
        .with_context(|| format!("Cannot compute eccentricity of {id}"))?;

    if session.json {
        return session.emit_json(&json!({"id": id, "eccentricity": distance_value(distance)}));
    }

    println!("Eccentricity of {}: {}", id, session.accent(distance));
    Ok(())
}

/// Nodes reachable from one node
pub fn reachable(session: &Session, id: NodeId) -> Result<()> {
    let graph = session.load_graph()?;
    let reached = graph
        .reachable_set(id)
        .with_context(|| format!("Cannot walk from {id}"))?;

    if session.json {
        return session.emit_json(&json!({"source": id, "reachable": reached}));
    }

    println!("Reachable from {} ({} of {}):", id, session.accent(reached.len()), graph.node_count());
    let list: Vec<String> = reached.iter().map(ToString::to_string).collect();
    println!("  {}", list.join(", "));
    Ok(())
}

/// Strong connectivity check
pub fn connected(session: &Session) -> Result<()> {
    let graph = session.load_graph()?;
    let connected = graph.is_strongly_connected();

    if session.json {
        return session.emit_json(&json!({"strongly_connected": connected}));
    }

    if connected {
        println!("{}", session.accent("strongly connected"));
    } else {
        println!("not strongly connected");
    }
    Ok(())
}

/// Graph center
pub fn center(session: &Session) -> Result<()> {
    let graph = session.load_graph()?;
    let (node, distance) = graph.center();

    if session.json {
        return session.emit_json(&json!({"id": node, "eccentricity": distance_value(distance)}));
    }

    match node {
        Some(id) => println!("Center: {} (eccentricity {})", session.accent(id), distance),
        None => println!("No center: graph is not strongly connected"),
    }
    Ok(())
}

/// Shortest path visiting every listed node
pub fn tsp(session: &Session, ids: &[NodeId]) -> Result<()> {
    let graph = session.load_graph()?;
    info!("Solving TSP over {} nodes", ids.len());
    let (path, distance) = graph
        .tsp_with_limit(ids, session.config.tsp_member_limit)
        .context("Cannot solve TSP")?;

    if session.json {
        return session.emit_json(&json!({"path": path, "distance": distance_value(distance)}));
    }

    if path.is_empty() {
        println!("No path visits all of {}", format_path(ids));
    } else {
        println!("{}", format_path(&path));
        println!("  distance: {}", session.accent(format_distance(distance)));
    }
    Ok(())
}

/// Nearest of several candidates from a source node
pub fn nearest(session: &Session, source: NodeId, candidates: &[NodeId]) -> Result<()> {
    let graph = session.load_graph()?;
    let closest = graph
        .closest_node(candidates, source)
        .with_context(|| format!("Cannot search from {source}"))?;

    if session.json {
        let (id, distance) = closest.map_or((None, f64::INFINITY), |(id, d)| (Some(id), d));
        return session.emit_json(&json!({"id": id, "distance": distance_value(distance)}));
    }

    match closest {
        Some((id, distance)) => println!("Nearest to {}: {} (distance {})", source, session.accent(id), distance),
        None => println!("No candidate reachable from {}", source),
    }
    Ok(())
}
