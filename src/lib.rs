// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Graphyard library - shortest paths, centers and exact tours over
//! weighted directed graphs
//!
//! The crate stores a graph of positioned nodes and non-negative weighted
//! edges ([`graph::WeightedGraph`]) and answers structural queries over it:
//! point-to-point shortest paths, eccentricity, strong connectivity, the
//! graph center and an exact traveling-salesman path over a node subset.
//! Graphs are read from and written to a flat JSON document ([`document`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algo;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod graph;

pub use error::{GraphError, Result};
pub use graph::WeightedGraph;

/// Core value types shared by the graph model and the document adapter
pub mod types {
    use crate::error::GraphError;
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;

    /// Node identity, unique within a graph
    pub type NodeId = i64;

    /// A 3D coordinate attached to a node
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct Position {
        /// X coordinate
        pub x: f64,
        /// Y coordinate
        pub y: f64,
        /// Z coordinate
        pub z: f64,
    }

    impl Position {
        /// Create a position from its three coordinates
        #[must_use]
        pub fn new(x: f64, y: f64, z: f64) -> Self {
            Self { x, y, z }
        }
    }

    impl fmt::Display for Position {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            // f64 Display is the shortest text that parses back to the same value
            write!(f, "{},{},{}", self.x, self.y, self.z)
        }
    }

    impl FromStr for Position {
        type Err = GraphError;

        /// Parse the `"x,y,z"` form used in graph documents
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let parts: Vec<&str> = s.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(GraphError::MalformedDocument(format!(
                    "position \"{s}\" must have exactly three comma-separated coordinates"
                )));
            }

            let mut coords = [0.0_f64; 3];
            for (slot, part) in coords.iter_mut().zip(&parts) {
                *slot = part.parse().map_err(|_| {
                    GraphError::MalformedDocument(format!(
                        "position \"{s}\" has a non-numeric coordinate \"{part}\""
                    ))
                })?;
            }

            Ok(Self::new(coords[0], coords[1], coords[2]))
        }
    }

}
