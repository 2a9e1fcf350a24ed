//! CLI commands and argument parsing

use crate::model::{Gender, Status};
use crate::pagination::CharacterFilter;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse the Rick and Morty character catalog
#[derive(Parser, Debug)]
#[command(name = "multiverse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog base URL (overrides the config file and MULTIVERSE_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List characters, optionally filtered
    Characters {
        #[command(flatten)]
        filter: FilterArgs,

        /// Page to fetch
        #[arg(long, default_value = "1")]
        page: u32,

        /// Follow `next` references and print every page
        #[arg(long, conflicts_with = "page")]
        all: bool,

        /// Stop after this many pages when using --all
        #[arg(long, requires = "all")]
        max_pages: Option<u32>,
    },

    /// Show one character with its first episode window
    Character {
        /// Character id
        id: u32,
    },

    /// Show one window of a character's episodes
    Episodes {
        /// Character id
        id: u32,

        /// Window to fetch (20 episodes per window)
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Character listing filter flags
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Name substring (case-insensitive)
    #[arg(long)]
    pub name: Option<String>,

    /// alive, dead or unknown
    #[arg(long)]
    pub status: Option<Status>,

    /// female, male, genderless or unknown
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Species, e.g. Human
    #[arg(long)]
    pub species: Option<String>,

    /// Subtype, e.g. Parasite
    #[arg(long = "type")]
    pub kind: Option<String>,
}

impl FilterArgs {
    /// Listing filter for these flags
    pub fn to_filter(&self) -> CharacterFilter {
        CharacterFilter {
            name: self.name.clone(),
            status: self.status,
            gender: self.gender,
            species: self.species.clone(),
            kind: self.kind.clone(),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}
