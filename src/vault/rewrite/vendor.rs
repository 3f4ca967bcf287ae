//! Phase 2: vendor export normalization.
//!
//! The lab notebook exporter writes attachments into a per-notebook folder
//! named after the notebook plus a hex id, e.g.
//! `Lab%20Notebook%20abc123def/photo.png`. Those references are pointed at
//! the vault's attachments folder instead.

use regex::{NoExpand, Regex, RegexBuilder};

use crate::config::ConfigError;

/// Compiled vendor folder rules.
#[derive(Debug, Clone)]
pub struct VendorRules {
    folders: Vec<Regex>,
    double_prefix: Regex,
    replacement: String,
}

impl VendorRules {
    /// Compile `patterns` (case-insensitive) mapping to `attachments/`.
    pub fn new(patterns: &[String], attachments: &str) -> Result<Self, ConfigError> {
        let folders = patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;

        let attachments = attachments.trim_matches('/');
        let double_prefix = compile(&format!("__{}/", regex::escape(attachments)))?;

        Ok(Self {
            folders,
            double_prefix,
            replacement: format!("{attachments}/"),
        })
    }

    /// Rewrite every vendor folder prefix, then collapse `__attachments/`.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for folder in &self.folders {
            if folder.is_match(&out) {
                out = folder
                    .replace_all(&out, NoExpand(&self.replacement))
                    .into_owned();
            }
        }
        self.double_prefix
            .replace_all(&out, NoExpand(&self.replacement))
            .into_owned()
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::Validation(format!("invalid vendor pattern `{pattern}`: {e}")))
}
