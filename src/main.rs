//! vaultstage - stage a markdown research vault as a buildable MyST book.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod logger;
mod manifest;
mod stage;
mod utils;
mod vault;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::VaultConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = VaultConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_book(&config),
        Commands::Stage { .. } => cli::build::stage_only(&config).map(|_| ()),
        Commands::Manifest { dir, .. } => cli::manifest::write_manifest(dir, &config),
        Commands::Validate { json, .. } => cli::validate::validate_vault_links(&config, *json),
    }
}
