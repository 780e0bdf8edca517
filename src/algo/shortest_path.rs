// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Single-source shortest paths (Dijkstra) and eccentricity
//!
//! The frontier is a binary heap ordered by tentative distance, then by
//! node ID, so equal-cost choices are reproducible. Paths are rebuilt from
//! the predecessor chain only after the traversal has settled every
//! reachable node. Requires non-negative edge weights.

use super::scratch::SearchState;
use crate::error::Result;
use crate::graph::WeightedGraph;
use crate::types::NodeId;
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// Frontier entry, ordered so the heap pops the smallest distance first
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    id: NodeId,
    idx: NodeIndex,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Run Dijkstra from `source` into a freshly reset `state`.
///
/// Returns the number of settled nodes.
pub(crate) fn dijkstra(graph: &WeightedGraph, source: NodeIndex, state: &mut SearchState) -> usize {
    state.get_mut(source).tentative_distance = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier {
        distance: 0.0,
        id: graph.id_at(source),
        idx: source,
    });

    let mut settled = 0;
    while let Some(Frontier { distance, idx, .. }) = heap.pop() {
        let record = state.get_mut(idx);
        // Stale entry for a node settled through a shorter path
        if record.visited {
            continue;
        }
        record.visited = true;
        settled += 1;

        for (next, weight) in graph.adjacent(idx, Direction::Outgoing) {
            let candidate = distance + weight;
            let next_record = state.get_mut(next);
            if !next_record.visited && candidate < next_record.tentative_distance {
                next_record.tentative_distance = candidate;
                next_record.predecessor = Some(idx);
                heap.push(Frontier {
                    distance: candidate,
                    id: graph.id_at(next),
                    idx: next,
                });
            }
        }
    }

    settled
}

/// Largest finite distance in a completed traversal; unreachable nodes are ignored
pub(crate) fn eccentricity_of(state: &SearchState) -> f64 {
    state
        .records()
        .map(|r| r.tentative_distance)
        .filter(|d| d.is_finite())
        .fold(0.0, f64::max)
}

/// Result of a completed single-source traversal
#[derive(Debug, Clone)]
pub struct ShortestPathTree<'g> {
    graph: &'g WeightedGraph,
    source: NodeIndex,
    state: SearchState,
}

impl<'g> ShortestPathTree<'g> {
    pub(crate) fn build(graph: &'g WeightedGraph, source: NodeIndex) -> Self {
        let mut state = SearchState::new(graph);
        let settled = dijkstra(graph, source, &mut state);
        debug!(source = graph.id_at(source), settled, "shortest path tree built");
        Self {
            graph,
            source,
            state,
        }
    }

    /// Source node of the traversal
    #[must_use]
    pub fn source(&self) -> NodeId {
        self.graph.id_at(self.source)
    }

    /// Distance from the source to `target`, infinite when unreachable
    pub fn distance_to(&self, target: NodeId) -> Result<f64> {
        let idx = self.graph.index_of(target)?;
        Ok(self.distance_at(idx))
    }

    /// Path from the source to `target`, empty when unreachable
    pub fn path_to(&self, target: NodeId) -> Result<Vec<NodeId>> {
        let idx = self.graph.index_of(target)?;
        Ok(self.path_at(idx))
    }

    /// Eccentricity of the source over the nodes it can reach
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        eccentricity_of(&self.state)
    }

    /// Reachable nodes and their distances, ascending by ID
    #[must_use]
    pub fn reachable(&self) -> Vec<(NodeId, f64)> {
        self.graph
            .node_ids()
            .into_iter()
            .filter_map(|id| {
                let d = self.distance_to(id).ok()?;
                d.is_finite().then_some((id, d))
            })
            .collect()
    }

    pub(crate) fn distance_at(&self, idx: NodeIndex) -> f64 {
        self.state.get(idx).tentative_distance
    }

    pub(crate) fn path_at(&self, idx: NodeIndex) -> Vec<NodeId> {
        if self.distance_at(idx).is_infinite() {
            return Vec::new();
        }

        let mut path = vec![self.graph.id_at(idx)];
        let mut current = idx;
        while let Some(prev) = self.state.get(current).predecessor {
            path.push(self.graph.id_at(prev));
            current = prev;
        }
        path.reverse();
        path
    }
}

impl WeightedGraph {
    /// Shortest path from `source` to `target` as `(distance, path)`.
    ///
    /// Returns `(0, [source])` when both are the same node and
    /// `(inf, [])` when `target` cannot be reached.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`](crate::GraphError::NodeNotFound) if
    /// either node is absent.
    pub fn shortest_path(&self, source: NodeId, target: NodeId) -> Result<(f64, Vec<NodeId>)> {
        let source_idx = self.index_of(source)?;
        let target_idx = self.index_of(target)?;

        if source_idx == target_idx {
            return Ok((0.0, vec![source]));
        }

        let tree = ShortestPathTree::build(self, source_idx);
        Ok((tree.distance_at(target_idx), tree.path_at(target_idx)))
    }

    /// Full single-source shortest path result from `source`
    pub fn shortest_path_tree(&self, source: NodeId) -> Result<ShortestPathTree<'_>> {
        let source_idx = self.index_of(source)?;
        Ok(ShortestPathTree::build(self, source_idx))
    }

    /// Eccentricity of `source`: the longest shortest path to a reachable node.
    ///
    /// Unreachable nodes are excluded, so a node that reaches nothing else
    /// has eccentricity `0`.
    pub fn max_shortest_path(&self, source: NodeId) -> Result<f64> {
        Ok(self.shortest_path_tree(source)?.eccentricity())
    }

    /// Nearest of `candidates` from `source`, excluding `source` itself.
    ///
    /// Ties go to the smallest ID. `None` when no candidate is reachable.
    pub fn closest_node(
        &self,
        candidates: &[NodeId],
        source: NodeId,
    ) -> Result<Option<(NodeId, f64)>> {
        let indices = candidates
            .iter()
            .map(|&id| self.index_of(id).map(|idx| (id, idx)))
            .collect::<Result<Vec<_>>>()?;
        let tree = self.shortest_path_tree(source)?;

        let mut best: Option<(NodeId, f64)> = None;
        for (id, idx) in indices {
            if id == source {
                continue;
            }
            let d = tree.distance_at(idx);
            if d.is_infinite() {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_id, best_d)) => d < best_d || (d == best_d && id < best_id),
            };
            if better {
                best = Some((id, d));
            }
        }
        Ok(best)
    }
}
