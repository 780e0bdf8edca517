// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! JSON graph documents
//!
//! ```json
//! {
//!     "Edges": [{"src": 0, "w": 1.5, "dest": 1}],
//!     "Nodes": [{"pos": "1.0,2.0,0.0", "id": 0}, {"id": 1}]
//! }
//! ```
//!
//! `pos` is optional on load and omitted on save for nodes without a
//! position.

use crate::error::{GraphError, Result};
use crate::graph::WeightedGraph;
use crate::types::{NodeId, Position};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Node entry of a graph document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Position as `"x,y,z"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    /// Node ID
    pub id: NodeId,
}

/// Edge entry of a graph document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source node ID
    pub src: NodeId,
    /// Edge weight
    pub w: f64,
    /// Destination node ID
    pub dest: NodeId,
}

/// A whole graph document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GraphDocument {
    /// Edge list
    pub edges: Vec<EdgeRecord>,
    /// Node list
    pub nodes: Vec<NodeRecord>,
}

impl GraphDocument {
    /// Snapshot a graph as a document, nodes and edges in ascending ID order
    #[must_use]
    pub fn from_graph(graph: &WeightedGraph) -> Self {
        let nodes = graph
            .nodes()
            .into_iter()
            .map(|node| NodeRecord {
                pos: node.position.map(|p| p.to_string()),
                id: node.id,
            })
            .collect();
        let edges = graph
            .edges()
            .into_iter()
            .map(|(src, dest, w)| EdgeRecord { src, w, dest })
            .collect();

        Self { edges, nodes }
    }

    /// Build a fresh graph, adding nodes then edges in document order.
    ///
    /// Any schema violation yields [`GraphError::MalformedDocument`].
    pub fn into_graph(self) -> Result<WeightedGraph> {
        let mut graph = WeightedGraph::new();

        for node in self.nodes {
            let position = node.pos.as_deref().map(str::parse::<Position>).transpose()?;
            graph.add_node(node.id, position);
        }

        for edge in self.edges {
            graph.add_edge(edge.src, edge.dest, edge.w).map_err(|e| {
                GraphError::MalformedDocument(format!(
                    "edge {} -> {}: {e}",
                    edge.src, edge.dest
                ))
            })?;
        }

        Ok(graph)
    }
}

/// Parse a graph from JSON text
pub fn from_json_str(content: &str) -> Result<WeightedGraph> {
    let document: GraphDocument = serde_json::from_str(content)
        .map_err(|e| GraphError::MalformedDocument(e.to_string()))?;
    document.into_graph()
}

/// Serialize a graph as pretty JSON with four-space indentation
pub fn to_json_string(graph: &WeightedGraph) -> Result<String> {
    let document = GraphDocument::from_graph(graph);
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| GraphError::MalformedDocument(e.to_string()))
}

impl WeightedGraph {
    /// Load a graph from a JSON document.
    ///
    /// The graph is built from scratch, so a failed load never leaves a
    /// partially populated graph behind.
    ///
    /// # Errors
    ///
    /// [`GraphError::Io`] if the file cannot be read and
    /// [`GraphError::MalformedDocument`] if its content is not a valid graph.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let graph = from_json_str(&content)?;
        debug!(
            path = %path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph loaded"
        );
        Ok(graph)
    }

    /// Save the graph as a JSON document
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = to_json_string(self)?;
        fs::write(path, content)?;
        info!(path = %path.display(), nodes = self.node_count(), "graph saved");
        Ok(())
    }

    /// Serialize to JSON text
    pub fn to_json(&self) -> Result<String> {
        to_json_string(self)
    }
}
