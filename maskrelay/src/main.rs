//! `maskrelay` CLI entry point.
//!
//! Reads input from stdin or `--input`, masks it with `maskrelay-core`, and
//! writes the sanitized output plus (optionally) its rehydration map; or,
//! given `--rehydrate`, reverses a prior run.
//! License: Apache-2.0

use std::fs;
use std::io::{self, IsTerminal, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use maskrelay::cli::Cli;
use maskrelay::logger;
use maskrelay_core::placeholder::RehydrationMap;
use maskrelay_core::{Config, Sanitizer};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Warn)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);
    info!("maskrelay started. Version: {}", env!("CARGO_PKG_VERSION"));

    let input = read_input(&cli)?;

    let output = if let Some(map_path) = &cli.rehydrate {
        let map = load_map(map_path)?;
        map.rehydrate(&input)
    } else {
        let config = match &cli.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Config::from_yaml(&text)?
            }
            None => Config::default(),
        };

        let sanitizer = Sanitizer::new(config)?;
        let result = sanitizer.sanitize(&input)?;

        for warning in &result.warnings {
            log::warn!("{:?}", warning);
        }
        for item in &result.summary {
            log::info!("masked {} occurrence(s) of {}", item.occurrences, item.label);
        }

        if let Some(map_path) = &cli.map_output {
            save_map(map_path, &result.map)?;
        }

        result.output
    };

    write_output(&cli, &output)?;

    info!("maskrelay finished successfully.");
    Ok(())
}

fn read_input(cli: &Cli) -> Result<String> {
    if let Some(path) = &cli.input_file {
        fs::read_to_string(path).with_context(|| format!("failed to read input from {}", path.display()))
    } else {
        let mut buffer = String::new();
        if io::stdin().is_terminal() {
            info!("reading input from stdin; press Ctrl+D to finish");
        }
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    }
}

fn write_output(cli: &Cli, output: &str) -> Result<()> {
    if let Some(path) = &cli.output {
        fs::write(path, output).with_context(|| format!("failed to write output to {}", path.display()))
    } else {
        io::stdout()
            .write_all(output.as_bytes())
            .context("failed to write output to stdout")
    }
}

fn load_map(path: &std::path::Path) -> Result<RehydrationMap> {
    let bytes = fs::read(path).with_context(|| format!("failed to read map file {}", path.display()))?;
    let entries = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse map file {}", path.display()))?;
    Ok(RehydrationMap::from_entries(entries))
}

fn save_map(path: &std::path::Path, map: &RehydrationMap) -> Result<()> {
    let json = serde_json::to_vec_pretty(map.entries()).context("failed to serialize rehydration map")?;
    fs::write(path, json).with_context(|| format!("failed to write map file {}", path.display()))
}
