// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Graphyard CLI - shortest paths, centers and exact tours over weighted
//! directed graphs

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use graphyard::commands::{self, Session};
use graphyard::config;
use graphyard::types::NodeId;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graphyard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (log errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "GRAPHYARD_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Graph document (JSON)
    #[arg(short, long, env = "GRAPHYARD_GRAPH", global = true)]
    graph: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show node and edge counts
    Info,

    /// Manage nodes
    Node {
        /// Action: add, list
        action: String,

        /// Node id
        #[arg(allow_negative_numbers = true)]
        id: Option<NodeId>,

        /// Position as x,y,z
        #[arg(long, allow_hyphen_values = true)]
        pos: Option<String>,
    },

    /// Manage edges
    Edge {
        /// Action: add, list
        action: String,

        /// Source node id
        #[arg(allow_negative_numbers = true)]
        src: Option<NodeId>,

        /// Destination node id
        #[arg(allow_negative_numbers = true)]
        dest: Option<NodeId>,

        /// Edge weight (non-negative)
        weight: Option<f64>,
    },

    /// Shortest path between two nodes
    Path {
        /// Source node id
        #[arg(allow_negative_numbers = true)]
        src: NodeId,

        /// Destination node id
        #[arg(allow_negative_numbers = true)]
        dest: NodeId,
    },

    /// Longest shortest path from a node
    Eccentricity {
        /// Node id
        #[arg(allow_negative_numbers = true)]
        id: NodeId,
    },

    /// Nodes reachable from a node
    Reachable {
        /// Node id
        #[arg(allow_negative_numbers = true)]
        id: NodeId,
    },

    /// Check strong connectivity
    Connected,

    /// Node with the smallest eccentricity
    Center,

    /// Shortest path visiting every listed node
    Tsp {
        /// Node ids to visit
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        ids: Vec<NodeId>,
    },

    /// Nearest candidate from a source node
    Nearest {
        /// Source node id
        #[arg(allow_negative_numbers = true)]
        source: NodeId,

        /// Candidate node ids
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        candidates: Vec<NodeId>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key
        key: String,

        /// Value to set (omit to get)
        value: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(cli.config.as_deref())?;

    // Initialize logging; RUST_LOG wins over flags and config
    let level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => settings.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Commands that do not touch a graph document
    match cli.command {
        Commands::Config { key, value } => {
            return commands::config::run(cli.config.as_deref(), &settings, &key, value);
        }
        Commands::Completions { shell } => {
            return commands::completions::run(shell, &mut Cli::command());
        }
        _ => {}
    }

    let session = Session::new(cli.graph, cli.json, cli.no_color, settings)?;

    // Execute command
    match cli.command {
        Commands::Info => commands::info::run(&session),
        Commands::Node { action, id, pos } => commands::node::run(&session, &action, id, pos),
        Commands::Edge { action, src, dest, weight } => {
            commands::edge::run(&session, &action, src, dest, weight)
        }
        Commands::Path { src, dest } => commands::query::path(&session, src, dest),
        Commands::Eccentricity { id } => commands::query::eccentricity(&session, id),
        Commands::Reachable { id } => commands::query::reachable(&session, id),
        Commands::Connected => commands::query::connected(&session),
        Commands::Center => commands::query::center(&session),
        Commands::Tsp { ids } => commands::query::tsp(&session, &ids),
        Commands::Nearest { source, candidates } => {
            commands::query::nearest(&session, source, &candidates)
        }
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}
