//! CLI module for tanktrack
//!
//! Provides the command-line interface using clap.

pub mod commands;
pub mod workspace;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::errors::{Result, TanktrackError};

/// Tanktrack - Track construction stages of water tanks across building levels
#[derive(Parser, Debug)]
#[command(name = "tanktrack")]
#[command(version)]
#[command(about = "Track construction stages of water tanks across building levels")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .tanktrack with the default config and seed tanks
    Init {
        /// Overwrite an existing .tanktrack
        #[arg(long)]
        force: bool,
    },

    /// List tanks with their color status and current stage
    List {
        /// Only list one level (N00, N10, N20, N30)
        #[arg(long)]
        level: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the progress of a tank or one of its sub-tanks
    Show {
        /// Level (N00, N10, N20, N30)
        level: String,

        /// Tank ID
        id: String,

        /// Sub-tank number, starting at 1
        #[arg(long)]
        sub: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the applicable stages of a tank and how it was classified
    Stages {
        level: String,
        id: String,
        #[arg(long)]
        sub: Option<usize>,
    },

    /// Complete a stage and open the next one
    Advance {
        level: String,
        id: String,

        /// Stage name, e.g. FormworkRemoval or "inspection stage 1"
        stage: String,

        #[arg(long)]
        sub: Option<usize>,
    },

    /// Reopen a stage and reset every stage after it
    Undo {
        level: String,
        id: String,
        stage: String,

        #[arg(long)]
        sub: Option<usize>,

        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Tanks across all levels that are ready for inspection
    Report {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| TanktrackError::InvalidJson(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
