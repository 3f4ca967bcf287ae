//! `[stage]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [stage]
//! source = "~/vaults/research_biology_md_local"
//! output = "_build_staging"   # relative to the config file
//! clean = true                # remove the output directory first
//! exclude = [".git", ".obsidian", "node_modules"]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{DEFAULT_STAGE_EXCLUDE, strings};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSectionConfig {
    /// Vault to stage. Usually given on the command line.
    pub source: Option<PathBuf>,

    /// Staging directory, mirrored from the source with sanitized names.
    pub output: PathBuf,

    /// Remove an existing output directory before staging.
    pub clean: bool,

    /// Directory names skipped at any depth.
    pub exclude: Vec<String>,
}

impl Default for StageSectionConfig {
    fn default() -> Self {
        Self {
            source: None,
            output: "_build_staging".into(),
            clean: true,
            exclude: strings(DEFAULT_STAGE_EXCLUDE),
        }
    }
}

impl StageSectionConfig {
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.exclude.iter().any(|e| e == dir_name)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::test_parse_config;

    #[test]
    fn test_stage_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.stage.output, PathBuf::from("_build_staging"));
        assert!(config.stage.clean);
        assert!(config.stage.source.is_none());
        assert!(config.stage.is_excluded(".obsidian"));
        assert!(!config.stage.is_excluded("attachments"));
    }

    #[test]
    fn test_stage_override() {
        let config = test_parse_config(
            "[stage]\nsource = \"vault\"\nclean = false\nexclude = [\"private\"]",
        );
        assert_eq!(config.stage.source, Some(PathBuf::from("vault")));
        assert!(!config.stage.clean);
        assert!(config.stage.is_excluded("private"));
        assert!(!config.stage.is_excluded(".git"));
    }
}
