//! Configuration management for `vaultstage.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [stage], [rewrite], [manifest]
//! ├── error          # ConfigError
//! ├── util           # config file discovery
//! └── mod.rs         # VaultConfig (this file)
//! ```
//!
//! The config file is optional. Without one, every section uses its
//! defaults and relative paths resolve against the current directory.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{ManifestConfig, ManifestSiteConfig, RewriteConfig, StageSectionConfig};

use util::find_config_file;

use crate::{
    cli::{Cli, Commands, StageArgs},
    debug, log,
    utils::path::{normalize_path, resolve_user_path},
    vault::Rewriter,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing vaultstage.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory config-relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub stage: StageSectionConfig,

    #[serde(default)]
    pub rewrite: RewriteConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

impl VaultConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Paths from the file are
    /// relative to the file; paths from the command line are relative to cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        crate::logger::set_verbose(cli.verbose());
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, root) = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
                config.config_path = Some(normalize_path(&path));
                (config, root)
            }
            None if cli.config != Path::new(DEFAULT_CONFIG) => {
                bail!("config file `{}` not found", cli.config.display());
            }
            None => {
                debug!("config"; "no {DEFAULT_CONFIG} found, using defaults");
                (Self::default(), cwd.clone())
            }
        };

        config.normalize_paths(&root);
        config.apply_command_options(cli, &cwd);
        if let Some(path) = &config.config_path {
            debug!("config"; "loaded {}, paths relative to {}", path.display(), config.get_root().display());
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Source vault, or an error naming both ways to provide one.
    pub fn source(&self) -> Result<&Path> {
        match &self.stage.source {
            Some(source) => Ok(source),
            None => bail!("no source directory: pass one on the command line or set [stage] source"),
        }
    }

    /// Compile the rewrite settings.
    pub fn rewriter(&self) -> Result<Rewriter, ConfigError> {
        Rewriter::new(&self.rewrite)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_command_options(&mut self, cli: &Cli, cwd: &Path) {
        match &cli.command {
            Commands::Build { stage_args, title } => {
                self.apply_stage_args(stage_args, cwd);
                Self::update_some(&mut self.manifest.title, title.as_ref());
            }
            Commands::Stage { stage_args } => self.apply_stage_args(stage_args, cwd),
            Commands::Manifest { title, name, .. } => {
                Self::update_some(&mut self.manifest.title, title.as_ref());
                Self::update_some(&mut self.manifest.name, name.as_ref());
            }
            Commands::Validate { source, .. } => {
                let source = source.as_ref().map(|p| resolve_user_path(p, cwd));
                Self::update_some(&mut self.stage.source, source.as_ref());
            }
        }
    }

    fn apply_stage_args(&mut self, args: &StageArgs, cwd: &Path) {
        let source = args.source.as_ref().map(|p| resolve_user_path(p, cwd));
        Self::update_some(&mut self.stage.source, source.as_ref());

        let output = args.output.as_ref().map(|p| resolve_user_path(p, cwd));
        Self::update_option(&mut self.stage.output, output.as_ref());

        if args.no_clean {
            self.stage.clean = false;
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Same as `update_option` for fields that are optional in the file.
    fn update_some<T: Clone>(config_option: &mut Option<T>, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = Some(option.clone());
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve file paths against the config root, with `~` expansion.
    fn normalize_paths(&mut self, root: &Path) {
        self.root = normalize_path(root);
        let root = self.root.clone();

        if let Some(source) = self.stage.source.take() {
            self.stage.source = Some(resolve_user_path(&source, &root));
        }
        self.stage.output = resolve_user_path(&self.stage.output, &root);
    }

    // ========================================================================
    // validation
    // ========================================================================

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rewriter()?;

        if self.manifest.output.is_empty() || self.manifest.output.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "[manifest.output] must be a plain file name, got `{}`",
                self.manifest.output
            )));
        }
        if self.manifest.max_depth == 0 {
            return Err(ConfigError::Validation(
                "[manifest.max_depth] must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

const DEFAULT_CONFIG: &str = "vaultstage.toml";

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config. Panics on unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> VaultConfig {
    let (parsed, ignored) = VaultConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        let result: Result<VaultConfig, _> = toml::from_str("[stage\nclean = false");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = test_parse_config("");
        assert!(config.config_path.is_none());
        assert!(config.stage.clean);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[stage]\nclean = false\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = VaultConfig::parse_with_ignored(content).unwrap();
        assert!(!config.stage.clean);
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_invalid_vendor_pattern_rejected() {
        let config = test_parse_config("[rewrite]\nvendor_folders = [\"(\"]");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_empty_image_list_rejected() {
        let config = test_parse_config("[rewrite]\nimage_extensions = []");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_manifest_output_must_be_file_name() {
        let config = test_parse_config("[manifest]\noutput = \"out/myst.yml\"");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_paths_resolve_against_root() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config("[stage]\nsource = \"vault\"\noutput = \"staged\"");
        config.normalize_paths(dir.path());

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.stage.source, Some(root.join("vault")));
        assert_eq!(config.stage.output, root.join("staged"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().canonicalize().unwrap();
        let mut config = test_parse_config("[stage]\nclean = true\n[manifest]\ntitle = \"File\"");
        config.normalize_paths(&cwd);

        let cli = Cli::parse_from(["vaultstage", "build", "src", "-o", "out", "--no-clean", "-t", "Cli"]);
        config.apply_command_options(&cli, &cwd);

        assert_eq!(config.stage.source, Some(cwd.join("src")));
        assert_eq!(config.stage.output, cwd.join("out"));
        assert!(!config.stage.clean);
        assert_eq!(config.manifest.title.as_deref(), Some("Cli"));
    }

    #[test]
    fn test_missing_source() {
        let config = VaultConfig::default();
        assert!(config.source().is_err());
    }
}
