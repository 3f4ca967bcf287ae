//! Vault staging.
//!
//! Mirrors a vault into the output directory with sanitized path segments.
//! Markdown is rewritten on the way; every other file is copied.
//!
//! ```text
//! check paths ─► clean output ─► collect + index ─► rewrite/copy (parallel)
//! ```

pub mod collect;


use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use crate::config::VaultConfig;
use crate::logger::ProgressLine;
use crate::utils::path::normalize_path;
use crate::vault::{Diagnostic, DiagnosticKind, Diagnostics, Rewriter};
use crate::{debug, log};

pub use collect::{StagePlan, VaultFile};

/// Counts for one staging run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageReport {
    /// Markdown documents rewritten.
    pub markdown: usize,
    /// Other files copied.
    pub copied: usize,
    /// Files that could not be read or written.
    pub failed: usize,
}

/// Stage `config.stage.source` into `config.stage.output`.
///
/// Only setup problems are errors. Per-file failures become `Io`
/// diagnostics and are counted in the report.
pub fn stage_vault(config: &VaultConfig, diagnostics: &Diagnostics) -> Result<StageReport> {
    let source = normalize_path(config.source()?);
    if !source.is_dir() {
        bail!("source is not a directory: {}", source.display());
    }
    let output = normalize_path(&config.stage.output);
    check_output_location(&source, &output)?;

    let rewriter = config.rewriter()?;
    prepare_output(&output, config.stage.clean)?;

    log!("stage"; "{} -> {}", source.display(), output.display());

    let skip = output.starts_with(&source).then_some(output.as_path());
    let plan = StagePlan::collect(&source, &config.stage.exclude, skip, diagnostics);
    debug!(
        "index";
        "{} files indexed, {} shared filenames",
        plan.index.len(),
        plan.index.duplicates().len()
    );

    let mut report = process_files(&plan, &rewriter, &output, diagnostics);
    report.failed += plan.unreadable;
    Ok(report)
}

/// The output is wiped before staging, so it must never hold the source.
fn check_output_location(source: &Path, output: &Path) -> Result<()> {
    if source.starts_with(output) {
        bail!(
            "output directory {} contains the source {}",
            output.display(),
            source.display()
        );
    }
    Ok(())
}

fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clean {}", output.display()))?;
    }
    fs::create_dir_all(output).with_context(|| format!("failed to create {}", output.display()))
}

/// Rewrite or copy every planned file in parallel.
fn process_files(
    plan: &StagePlan,
    rewriter: &Rewriter,
    output: &Path,
    diagnostics: &Diagnostics,
) -> StageReport {
    let progress = ProgressLine::new(
        "stage",
        &[("markdown", plan.markdown_count()), ("files", plan.other_count())],
    );
    let markdown = AtomicUsize::new(0);
    let copied = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    plan.files.par_iter().for_each(|file| {
        let result = if file.markdown {
            stage_markdown(file, plan, rewriter, output, diagnostics)
        } else {
            copy_file(file, output)
        };

        match result {
            Ok(()) if file.markdown => {
                markdown.fetch_add(1, Ordering::Relaxed);
            }
            Ok(()) => {
                copied.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                failed.fetch_add(1, Ordering::Relaxed);
                diagnostics.push(
                    Diagnostic::new(DiagnosticKind::Io, &file.relative, &file.relative)
                        .with_detail(format!("{e:#}")),
                );
            }
        }
        progress.inc(if file.markdown { "markdown" } else { "files" });
    });

    progress.finish();

    StageReport {
        markdown: markdown.into_inner(),
        copied: copied.into_inner(),
        failed: failed.into_inner(),
    }
}

fn stage_markdown(
    file: &VaultFile,
    plan: &StagePlan,
    rewriter: &Rewriter,
    output: &Path,
    diagnostics: &Diagnostics,
) -> Result<()> {
    let content = fs::read_to_string(&file.path)
        .with_context(|| format!("failed to read {}", file.path.display()))?;
    let rewritten = rewriter.rewrite(&content, &file.target, &plan.index, diagnostics);
    write_target(output, file, rewritten.as_bytes())
}

fn copy_file(file: &VaultFile, output: &Path) -> Result<()> {
    let dest = output.join(file.target.as_str());
    create_parent(&dest)?;
    fs::copy(&file.path, &dest)
        .with_context(|| format!("failed to copy {}", file.path.display()))?;
    Ok(())
}

fn write_target(output: &Path, file: &VaultFile, bytes: &[u8]) -> Result<()> {
    let dest = output.join(file.target.as_str());
    create_parent(&dest)?;
    fs::write(&dest, bytes).with_context(|| format!("failed to write {}", dest.display()))
}

fn create_parent(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

/// Rewrite every markdown document in memory, writing nothing.
///
/// Returns the number of documents checked.
pub fn validate_vault(config: &VaultConfig, diagnostics: &Diagnostics) -> Result<usize> {
    let source = normalize_path(config.source()?);
    if !source.is_dir() {
        bail!("source is not a directory: {}", source.display());
    }
    let rewriter = config.rewriter()?;

    let output = normalize_path(&config.stage.output);
    let skip = output.starts_with(&source).then_some(output.as_path());
    let plan = StagePlan::collect(&source, &config.stage.exclude, skip, diagnostics);

    let checked = AtomicUsize::new(0);
    plan.files
        .par_iter()
        .filter(|file| file.markdown)
        .for_each(|file| match fs::read_to_string(&file.path) {
            Ok(content) => {
                rewriter.rewrite(&content, &file.target, &plan.index, diagnostics);
                checked.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => diagnostics.push(
                Diagnostic::new(DiagnosticKind::Io, &file.relative, &file.relative)
                    .with_detail(e.to_string()),
            ),
        });

    Ok(checked.into_inner())
}
