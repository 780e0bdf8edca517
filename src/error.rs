// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for graph construction, queries and document I/O

use crate::types::NodeId;
use thiserror::Error;

/// Errors surfaced by the graph engine.
///
/// A missing path is not an error: queries report it with an infinite
/// distance and an empty path.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A query or edge endpoint names a node that is not in the graph
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Edge weight is negative, infinite or NaN
    #[error("Invalid weight {weight} on edge {src} -> {dest}")]
    InvalidWeight {
        /// Source node
        src: NodeId,
        /// Destination node
        dest: NodeId,
        /// Rejected weight
        weight: f64,
    },

    /// TSP subset exceeds what the exact solver will allocate for
    #[error("TSP subset of {requested} nodes exceeds the limit of {limit}")]
    SubsetTooLarge {
        /// Number of distinct nodes requested
        requested: usize,
        /// Configured limit
        limit: usize,
    },

    /// Graph document does not follow the expected schema
    #[error("Malformed graph document: {0}")]
    MalformedDocument(String),

    /// File could not be opened, read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Graph could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
