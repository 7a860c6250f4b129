//! CLI module - Command-line interface for ravelry-harvest
//!
//! Each stage reads the artifacts of the previous one from the data directory,
//! so stages can be re-run independently.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::limits;

/// ravelry-harvest - Ravelry pattern and project harvester
#[derive(Parser)]
#[command(name = "ravelry-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the top patterns and the projects made from each
    #[command(alias = "find")]
    FindProjects {
        /// Where to write the result set (defaults to <data_dir>/projects.json)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Fetch yarn usage for every stored project
    #[command(alias = "yarns")]
    PullYarns,

    /// Compute statistics over the stored data and export CSV files
    Analyze {
        /// Number of entries in ranked tables
        #[arg(long, default_value_t = limits::DEFAULT_TOP_N)]
        top: usize,
    },

    /// Verify the credentials by fetching the current user
    Whoami,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
