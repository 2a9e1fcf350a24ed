//! CLI module
//!
//! Command-line interface for browsing the catalog.
//!
//! # Commands
//!
//! - `characters` - List characters, one page or every page with `--all`
//! - `character` - Show one character with its first episode window
//! - `episodes` - Show one episode window of a character
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, FilterArgs, OutputFormat};
pub use runner::{render, Runner};
pub use server::{router, serve};
