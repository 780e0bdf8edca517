// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Graph algorithms
//!
//! Each submodule adds query methods to [`WeightedGraph`](crate::graph::WeightedGraph).
//! Queries borrow the graph immutably and keep their working state in a
//! per-call [`SearchState`].

pub mod center;
pub mod connectivity;
pub mod scratch;
pub mod shortest_path;
pub mod tsp;

pub use scratch::{ScratchRecord, SearchState};
pub use shortest_path::ShortestPathTree;
pub use tsp::{TspPath, DEFAULT_TSP_MEMBER_LIMIT, MAX_TSP_MEMBERS};
