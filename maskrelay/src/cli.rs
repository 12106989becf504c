//! Command-line argument definitions for `maskrelay`.
//!
//! A thin wrapper's surface: read input, sanitize, write output, optionally
//! reverse a prior run. No clipboard, theme, diff, sync, uninstall, or
//! licensing commands.
//! License: Apache-2.0

use std::path::PathBuf;

use clap::Parser;

/// Mask sensitive identifiers in text, structured, or markup content.
#[derive(Parser, Debug)]
#[command(
    name = "maskrelay",
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask sensitive identifiers with reversible placeholders before forwarding content to an untrusted consumer.",
)]
pub struct Cli {
    /// Read input from this file instead of stdin.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to a YAML configuration document (see `maskrelay_core::Config`).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the resulting rehydration map to this file, for later use with
    /// `--rehydrate`.
    #[arg(long = "map-output", value_name = "FILE")]
    pub map_output: Option<PathBuf>,

    /// Reverse a prior sanitize call: read the map at this path and apply it
    /// to the input instead of sanitizing.
    #[arg(long = "rehydrate", value_name = "MAP_FILE", conflicts_with = "config")]
    pub rehydrate: Option<PathBuf>,

    /// Suppress informational log output.
    #[arg(short = 'q', long, conflicts_with = "debug")]
    pub quiet: bool,

    /// Enable debug log output.
    #[arg(short = 'd', long)]
    pub debug: bool,
}
