// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Per-traversal working state
//!
//! Traversals never annotate the graph itself. Each one owns a
//! [`SearchState`] holding a record per node, so queries on a shared
//! `&WeightedGraph` cannot interfere with each other.

use crate::graph::WeightedGraph;
use petgraph::graph::NodeIndex;

/// Working record for one node during a traversal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScratchRecord {
    /// Best known distance from the traversal source
    pub tentative_distance: f64,
    /// Node this one was reached from on the best known path
    pub predecessor: Option<NodeIndex>,
    /// Whether the node has been settled or visited
    pub visited: bool,
}

impl Default for ScratchRecord {
    fn default() -> Self {
        Self {
            tentative_distance: f64::INFINITY,
            predecessor: None,
            visited: false,
        }
    }
}

/// Dense table of scratch records, one per node of a graph
#[derive(Debug, Clone)]
pub struct SearchState {
    records: Vec<ScratchRecord>,
}

impl SearchState {
    /// Fresh state sized for `graph`, every record at its default
    #[must_use]
    pub fn new(graph: &WeightedGraph) -> Self {
        Self {
            records: vec![ScratchRecord::default(); graph.bound()],
        }
    }

    /// Clear every record back to its default.
    ///
    /// Must be called before a state is reused for another traversal.
    pub fn reset_scratch_state(&mut self) {
        self.records.fill(ScratchRecord::default());
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the state covers no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in dense index order
    pub fn records(&self) -> impl Iterator<Item = &ScratchRecord> {
        self.records.iter()
    }

    pub(crate) fn get(&self, idx: NodeIndex) -> &ScratchRecord {
        &self.records[idx.index()]
    }

    pub(crate) fn get_mut(&mut self, idx: NodeIndex) -> &mut ScratchRecord {
        &mut self.records[idx.index()]
    }

    pub(crate) fn visited_count(&self) -> usize {
        self.records.iter().filter(|r| r.visited).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_default() {
        let mut graph = WeightedGraph::new();
        graph.add_node(1, None);
        graph.add_node(2, None);

        let state = SearchState::new(&graph);
        assert_eq!(state.len(), 2);
        assert!(state.records().all(|r| *r == ScratchRecord::default()));
    }

    #[test]
    fn test_reset_scratch_state() {
        let mut graph = WeightedGraph::new();
        graph.add_node(1, None);
        let idx = graph.index_of(1).unwrap();

        let mut state = SearchState::new(&graph);
        {
            let record = state.get_mut(idx);
            record.tentative_distance = 3.0;
            record.predecessor = Some(idx);
            record.visited = true;
        }
        assert_eq!(state.visited_count(), 1);

        state.reset_scratch_state();
        assert_eq!(*state.get(idx), ScratchRecord::default());
        assert_eq!(state.visited_count(), 0);
    }
}
