//! # YADA CLI Module
//!
//! This module implements the CLI interface for YADA.
//!
//! ## Available Commands
//!
//! - `add` - Add or replace a basic food
//! - `compose` - Create a composite food from existing foods
//! - `search` - Find foods matching any or all keywords
//! - `remove` - Delete a food
//! - `list` - Show every food (default)
//! - `show` - Show a single food
//! - `status` - Show catalog metrics
//! - `init` - Initialize an empty database

mod commands;

use crate::config::YadaConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use yada_core::{SearchMode, YadaError};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// YADA - Yet Another Diet Assistant
///
/// Keeps a catalog of basic and composite foods with keyword search.
#[derive(Parser, Debug)]
#[command(name = "yada")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the food database (overrides config and YADA_DATABASE)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a basic food, replacing any food with the same identifier
    Add {
        /// Food identifier
        #[arg(short, long)]
        name: String,

        /// Keywords (comma-separated)
        #[arg(short, long, default_value = "")]
        keywords: String,

        /// Calories per serving
        #[arg(short, long)]
        calories: u32,
    },

    /// Create a composite food from existing foods
    Compose {
        /// Identifier of the new composite
        #[arg(short, long)]
        name: String,

        /// Component identifiers (comma-separated)
        #[arg(short, long)]
        parts: String,
    },

    /// Search foods by keyword
    Search {
        /// Match any or all keywords
        #[arg(short, long, default_value = "any")]
        mode: SearchMode,

        /// Keywords (comma-separated)
        #[arg(short, long)]
        keywords: String,
    },

    /// Remove a food
    Remove {
        /// Food identifier
        identifier: String,
    },

    /// List all foods
    List,

    /// Show a single food
    Show {
        /// Food identifier
        identifier: String,
    },

    /// Show catalog metrics
    Status,

    /// Initialize a new empty database
    Init {
        /// Force initialization even if database exists
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and resolved configuration.
pub fn execute(cli: Cli, config: &YadaConfig) -> Result<(), YadaError> {
    let db_path = config.database.as_path();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Add {
            name,
            keywords,
            calories,
        }) => cmd_add(db_path, json_mode, &name, &keywords, calories),
        Some(Commands::Compose { name, parts }) => cmd_compose(db_path, json_mode, &name, &parts),
        Some(Commands::Search { mode, keywords }) => {
            cmd_search(db_path, json_mode, mode, &keywords)
        }
        Some(Commands::Remove { identifier }) => cmd_remove(db_path, json_mode, &identifier),
        Some(Commands::Show { identifier }) => cmd_show(db_path, json_mode, &identifier),
        Some(Commands::Status) => cmd_status(db_path, json_mode),
        Some(Commands::Init { force }) => cmd_init(db_path, force),
        Some(Commands::List) | None => cmd_list(db_path, json_mode),
    }
}
