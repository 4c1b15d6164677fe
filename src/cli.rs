use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "curator")]
#[command(author, version, about = "Sorts media directories into movies, galleries and scene covers in a Stash catalog")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog base URL (overrides the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Catalog API key (overrides the config file)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as a host plugin: read the job from stdin, print the status line to stdout
    Plugin,

    /// Apply poster/cover files to the scenes in the same directory
    Covers {
        /// Only use cover files modified in the last few days
        #[arg(long)]
        recent: bool,

        /// Write covers to the catalog (default only reports)
        #[arg(long)]
        apply: bool,

        /// Scan this directory instead of the catalog's library paths
        #[arg(long = "root")]
        roots: Vec<PathBuf>,
    },

    /// Create movies and galleries from directories and link their scenes and images
    Movies {
        /// Show what would be done without writing to the catalog
        #[arg(long)]
        dry_run: bool,

        /// Scan this directory instead of the catalog's library paths
        #[arg(long = "root")]
        roots: Vec<PathBuf>,
    },

    /// Classify directories and print the movies and galleries found
    Scan {
        /// Directory to scan
        #[arg(long = "root", required = true)]
        roots: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config or defaults if not specified)
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
