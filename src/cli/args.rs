//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Stage an Obsidian-style research vault for a MyST book build
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: vaultstage.toml, searched upward)
    #[arg(short = 'C', long, default_value = "vaultstage.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Stage the vault and generate the book manifest
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        stage_args: StageArgs,

        /// Book title (default: derived from the source directory name)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Stage the vault without generating a manifest
    #[command(visible_alias = "s")]
    Stage {
        #[command(flatten)]
        stage_args: StageArgs,
    },

    /// Generate the book manifest for an already staged directory
    #[command(visible_alias = "m")]
    Manifest {
        /// Staged directory to describe
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: PathBuf,

        /// Book title (default: derived from the project name)
        #[arg(short, long)]
        title: Option<String>,

        /// Project name (default: directory name without `_local`/`_gcs`)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Report unresolved and ambiguous references without writing anything
    #[command(visible_alias = "v")]
    Validate {
        /// Vault directory (default: `[stage] source` from config)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        source: Option<PathBuf>,

        /// Print diagnostics as JSON
        #[arg(short, long)]
        json: bool,

        /// Enable verbose output for debugging
        #[arg(short = 'V', long)]
        verbose: bool,
    },
}

/// Shared arguments for Build and Stage commands
#[derive(clap::Args, Debug, Clone)]
pub struct StageArgs {
    /// Vault directory (default: `[stage] source` from config)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Staging output directory (default: `_build_staging`)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Keep existing files in the output directory
    #[arg(long)]
    pub no_clean: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// Verbose flag of whichever command was given.
    pub const fn verbose(&self) -> bool {
        match &self.command {
            Commands::Build { stage_args, .. } | Commands::Stage { stage_args } => {
                stage_args.verbose
            }
            Commands::Validate { verbose, .. } => *verbose,
            Commands::Manifest { .. } => false,
        }
    }
}
