// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Weighted directed graph model with petgraph backing

use crate::error::{GraphError, Result};
use crate::types::{NodeId, Position};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// A node as stored in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier within the graph
    pub id: NodeId,
    /// Optional 3D coordinate
    pub position: Option<Position>,
}

/// Directed graph with non-negative edge weights.
///
/// Nodes live in a dense petgraph table and are addressed by [`NodeId`]
/// through an id-to-index map. Every edge is stored once, so the per-node
/// outgoing/incoming views and the edge table cannot disagree.
///
/// `Clone` produces an independent deep copy. Algorithms borrow the graph
/// and keep their working state outside of it.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    /// The underlying directed graph
    graph: DiGraph<Node, f64>,
    /// Map from node ID to node index
    node_indices: HashMap<NodeId, NodeIndex>,
}

impl WeightedGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or overwrite the position of an existing one.
    ///
    /// Edges of an existing node are kept. Returns `true` if the node is new.
    pub fn add_node(&mut self, id: NodeId, position: Option<Position>) -> bool {
        if let Some(&idx) = self.node_indices.get(&id) {
            self.graph[idx].position = position;
            trace!(id, "node position overwritten");
            return false;
        }

        let idx = self.graph.add_node(Node { id, position });
        self.node_indices.insert(id, idx);
        true
    }

    /// Add an edge, overwriting the weight if `src -> dest` already exists
    pub fn add_edge(&mut self, src: NodeId, dest: NodeId, weight: f64) -> Result<()> {
        let from_idx = self.index_of(src)?;
        let to_idx = self.index_of(dest)?;

        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { src, dest, weight });
        }

        self.graph.update_edge(from_idx, to_idx, weight);
        Ok(())
    }

    /// Get a node by ID
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_indices.get(&id).map(|&idx| &self.graph[idx])
    }

    /// Check whether a node exists
    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_indices.contains_key(&id)
    }

    /// Position of a node, if the node exists and has one
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.node(id).and_then(|n| n.position)
    }

    /// All node IDs in ascending order
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.node_indices.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// All nodes in ascending ID order
    #[must_use]
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.graph.node_weights().collect();
        nodes.sort_unstable_by_key(|n| n.id);
        nodes
    }

    /// The edge table as `(src, dest, weight)`, ascending by `(src, dest)`
    #[must_use]
    pub fn edges(&self) -> Vec<(NodeId, NodeId, f64)> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| (self.graph[e.source()].id, self.graph[e.target()].id, *e.weight()))
            .collect();
        edges.sort_unstable_by_key(|&(src, dest, _)| (src, dest));
        edges
    }

    /// Outgoing neighbors of a node with their edge weights
    pub fn outgoing(&self, id: NodeId) -> Result<BTreeMap<NodeId, f64>> {
        let idx = self.index_of(id)?;
        Ok(self.neighbors(idx, Direction::Outgoing).collect())
    }

    /// Incoming neighbors of a node with their edge weights
    pub fn incoming(&self, id: NodeId) -> Result<BTreeMap<NodeId, f64>> {
        let idx = self.index_of(id)?;
        Ok(self.neighbors(idx, Direction::Incoming).collect())
    }

    /// Weight of the edge `src -> dest`, if present
    #[must_use]
    pub fn edge_weight(&self, src: NodeId, dest: NodeId) -> Option<f64> {
        let from_idx = *self.node_indices.get(&src)?;
        let to_idx = *self.node_indices.get(&dest)?;
        self.graph
            .find_edge(from_idx, to_idx)
            .map(|e| self.graph[e])
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Independent copy of the graph with every edge reversed.
    ///
    /// IDs and positions are preserved.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut transposed = self.clone();
        transposed.graph.reverse();
        transposed
    }

    /// Resolve a node ID to its dense index
    pub(crate) fn index_of(&self, id: NodeId) -> Result<NodeIndex> {
        self.node_indices
            .get(&id)
            .copied()
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// Node ID stored at a dense index
    pub(crate) fn id_at(&self, idx: NodeIndex) -> NodeId {
        self.graph[idx].id
    }

    /// Index of the smallest node ID, if any
    pub(crate) fn min_index(&self) -> Option<NodeIndex> {
        self.graph.node_indices().min_by_key(|&idx| self.graph[idx].id)
    }

    /// All dense indices, ascending by node ID
    pub(crate) fn indices_by_id(&self) -> Vec<NodeIndex> {
        let mut indices: Vec<NodeIndex> = self.graph.node_indices().collect();
        indices.sort_unstable_by_key(|&idx| self.graph[idx].id);
        indices
    }

    /// Number of dense slots, for sizing per-traversal tables
    pub(crate) fn bound(&self) -> usize {
        self.graph.node_count()
    }

    /// Adjacent indices and weights of a node in the given direction
    pub(crate) fn adjacent(
        &self,
        idx: NodeIndex,
        direction: Direction,
    ) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph.edges_directed(idx, direction).map(move |e| {
            let other = match direction {
                Direction::Outgoing => e.target(),
                Direction::Incoming => e.source(),
            };
            (other, *e.weight())
        })
    }

    fn neighbors(
        &self,
        idx: NodeIndex,
        direction: Direction,
    ) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adjacent(idx, direction)
            .map(|(other, w)| (self.graph[other].id, w))
    }
}
