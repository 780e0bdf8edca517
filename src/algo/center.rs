// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graph center: the node with the smallest eccentricity

use super::scratch::SearchState;
use super::shortest_path::{dijkstra, eccentricity_of};
use crate::graph::WeightedGraph;
use crate::types::NodeId;
use tracing::{debug, warn};

impl WeightedGraph {
    /// Node minimizing the worst-case distance to every other node.
    ///
    /// Returns `(None, inf)` unless the graph is strongly connected and
    /// non-empty. Ties go to the smallest ID.
    #[must_use]
    pub fn center(&self) -> (Option<NodeId>, f64) {
        if self.is_empty() || !self.is_strongly_connected() {
            warn!(nodes = self.node_count(), "center requested on a graph that is not strongly connected");
            return (None, f64::INFINITY);
        }

        let mut state = SearchState::new(self);
        let mut best: (Option<NodeId>, f64) = (None, f64::INFINITY);

        for idx in self.indices_by_id() {
            state.reset_scratch_state();
            dijkstra(self, idx, &mut state);
            let eccentricity = eccentricity_of(&state);

            // ascending IDs with a strict comparison keep the smallest ID on ties
            if best.0.is_none() || eccentricity < best.1 {
                best = (Some(self.id_at(idx)), eccentricity);
            }
        }

        debug!(center = ?best.0, eccentricity = best.1, "center computed");
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from(nodes: &[NodeId], edges: &[(NodeId, NodeId, f64)]) -> WeightedGraph {
        let mut graph = WeightedGraph::new();
        for &id in nodes {
            graph.add_node(id, None);
        }
        for &(src, dest, w) in edges {
            graph.add_edge(src, dest, w).unwrap();
        }
        graph
    }

    #[test]
    fn test_center_unit_cycle() {
        let graph = graph_from(&[0, 1, 2], &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);
        assert_eq!(graph.center(), (Some(0), 2.0));
    }

    #[test]
    fn test_center_hub() {
        // star with a hub at 5: every leaf has a two-way edge to the hub
        let mut graph = graph_from(&[1, 2, 3, 5], &[]);
        for leaf in [1, 2, 3] {
            graph.add_edge(5, leaf, 1.0).unwrap();
            graph.add_edge(leaf, 5, 1.0).unwrap();
        }
        assert_eq!(graph.center(), (Some(5), 1.0));
    }

    #[test]
    fn test_center_weighted() {
        let graph = graph_from(
            &[0, 1, 2],
            &[(0, 1, 1.0), (1, 0, 1.0), (1, 2, 2.0), (2, 1, 2.0)],
        );
        // ecc(0) = 3, ecc(1) = 2, ecc(2) = 3
        assert_eq!(graph.center(), (Some(1), 2.0));
    }

    #[test]
    fn test_center_requires_strong_connectivity() {
        let graph = graph_from(&[0, 1, 2], &[(0, 1, 1.0), (1, 2, 4.0)]);
        let (node, distance) = graph.center();
        assert_eq!(node, None);
        assert!(distance.is_infinite());
    }

    #[test]
    fn test_center_degenerate() {
        let (node, distance) = WeightedGraph::new().center();
        assert_eq!(node, None);
        assert!(distance.is_infinite());

        assert_eq!(graph_from(&[8], &[]).center(), (Some(8), 0.0));
    }
}
