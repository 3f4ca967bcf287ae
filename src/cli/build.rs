//! `build` and `stage` commands.

use std::path::Path;

use anyhow::Result;

use super::report_diagnostics;
use crate::config::{ManifestConfig, VaultConfig};
use crate::log;
use crate::manifest;
use crate::stage::{StageReport, stage_vault};
use crate::utils::{path::normalize_path, plural_count};
use crate::vault::Diagnostics;

/// Stage the vault, then write the manifest into the staged tree.
pub fn build_book(config: &VaultConfig) -> Result<()> {
    stage_only(config)?;

    let output = normalize_path(&config.stage.output);
    let manifest_config = manifest_config_for(config)?;
    let manifest = manifest::generate(&output, &manifest_config)?;
    log!("build"; "book `{}` ready in {}", manifest.project.title, output.display());
    Ok(())
}

/// Stage the vault without a manifest.
pub fn stage_only(config: &VaultConfig) -> Result<StageReport> {
    let diagnostics = Diagnostics::new();
    let report = stage_vault(config, &diagnostics)?;

    log!(
        "stage";
        "{} rewritten, {} copied",
        plural_count(report.markdown, "document"),
        plural_count(report.copied, "file")
    );
    if report.failed > 0 {
        log!("error"; "{} could not be staged", plural_count(report.failed, "file"));
    }
    report_diagnostics(&diagnostics);
    Ok(report)
}

/// The staged directory has its own name; the project is named after the source.
fn manifest_config_for(config: &VaultConfig) -> Result<ManifestConfig> {
    let mut manifest = config.manifest.clone();
    if manifest.name.is_none() {
        let source = normalize_path(config.source()?);
        manifest.name = Some(project_name_of(&source, &manifest));
    }
    Ok(manifest)
}

fn project_name_of(source: &Path, manifest: &ManifestConfig) -> String {
    let dir_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    manifest.project_name(&dir_name)
}
