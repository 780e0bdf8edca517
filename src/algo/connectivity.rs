// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Reachability and strong connectivity

use super::scratch::SearchState;
use crate::error::Result;
use crate::graph::WeightedGraph;
use crate::types::NodeId;
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use std::collections::BTreeSet;
use tracing::debug;

/// Iterative depth-first walk from `start`, marking visited records.
///
/// `Direction::Incoming` walks the transpose without building it.
/// Expects a freshly reset `state`; returns the number of visited nodes.
pub(crate) fn depth_first(
    graph: &WeightedGraph,
    start: NodeIndex,
    direction: Direction,
    state: &mut SearchState,
) -> usize {
    let mut stack = vec![start];
    let mut visited = 0;

    while let Some(idx) = stack.pop() {
        let record = state.get_mut(idx);
        if record.visited {
            continue;
        }
        record.visited = true;
        visited += 1;

        for (next, _) in graph.adjacent(idx, direction) {
            if !state.get(next).visited {
                stack.push(next);
            }
        }
    }

    visited
}

impl WeightedGraph {
    /// Every node reachable from `source` along outgoing edges, `source` included
    pub fn reachable_set(&self, source: NodeId) -> Result<BTreeSet<NodeId>> {
        let start = self.index_of(source)?;
        let mut state = SearchState::new(self);
        depth_first(self, start, Direction::Outgoing, &mut state);

        Ok(state
            .records()
            .enumerate()
            .filter(|(_, record)| record.visited)
            .map(|(i, _)| self.id_at(NodeIndex::new(i)))
            .collect())
    }

    /// Check whether every node can reach every other node.
    ///
    /// Walks forward and backward from the smallest node ID; both walks must
    /// cover the whole graph. A graph with no nodes counts as strongly
    /// connected.
    #[must_use]
    pub fn is_strongly_connected(&self) -> bool {
        let Some(start) = self.min_index() else {
            return true;
        };
        let total = self.node_count();
        let mut state = SearchState::new(self);

        let forward = depth_first(self, start, Direction::Outgoing, &mut state);
        if forward < total {
            debug!(start = self.id_at(start), forward, total, "not all nodes reachable");
            return false;
        }

        state.reset_scratch_state();
        let backward = depth_first(self, start, Direction::Incoming, &mut state);
        if backward < total {
            debug!(start = self.id_at(start), backward, total, "not all nodes reach start");
            return false;
        }

        true
    }

    /// Check whether `source` can reach every node in `node_ids`
    pub fn has_path_to_all(&self, node_ids: &[NodeId], source: NodeId) -> Result<bool> {
        let targets = node_ids
            .iter()
            .map(|&id| self.index_of(id))
            .collect::<Result<Vec<_>>>()?;
        let start = self.index_of(source)?;

        let mut state = SearchState::new(self);
        depth_first(self, start, Direction::Outgoing, &mut state);
        Ok(targets.into_iter().all(|idx| state.get(idx).visited))
    }
}
