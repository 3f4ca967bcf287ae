//! `manifest` command.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::VaultConfig;
use crate::log;
use crate::manifest;
use crate::utils::path::{normalize_path, resolve_user_path};

/// Write the manifest for an already staged directory.
pub fn write_manifest(dir: &Path, config: &VaultConfig) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current working directory")?;
    let dir = normalize_path(&resolve_user_path(dir, &cwd));

    let manifest = manifest::generate(&dir, &config.manifest)?;
    log!(
        "manifest";
        "`{}` with {} top-level entries",
        manifest.project.title,
        manifest.project.toc.len()
    );
    Ok(())
}
