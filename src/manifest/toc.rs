//! Table of contents derived from the staged folder layout.
//!
//! ```text
//! <project>/                 -> Project: <Pretty Name>
//!   1_eln/                   -> Chapter 1: ELN
//!     2024/ day1.md          -> 2024 { day1.md }
//!   5_confidential/          -> skipped
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::ManifestConfig;
use crate::core::ContentKind;
use crate::utils::prettify_folder_name;
use crate::vault::index::to_slash;

/// One TOC node: a page, or a titled group of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TocEntry {
    File {
        file: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Section {
        title: String,
        children: Vec<TocEntry>,
    },
}

impl TocEntry {
    pub fn file(file: impl Into<String>) -> Self {
        Self::File {
            file: file.into(),
            title: None,
        }
    }

    pub fn titled_file(file: impl Into<String>, title: impl Into<String>) -> Self {
        Self::File {
            file: file.into(),
            title: Some(title.into()),
        }
    }

    pub fn section(title: impl Into<String>, children: Vec<TocEntry>) -> Self {
        Self::Section {
            title: title.into(),
            children,
        }
    }
}

/// Project folders directly under `root`, sorted.
pub fn project_folders(root: &Path, config: &ManifestConfig) -> Result<Vec<PathBuf>> {
    let (_, dirs) = list_dir(root)?;
    Ok(dirs
        .into_iter()
        .filter(|d| {
            let name = dir_name(d);
            !name.starts_with('_') && !name.starts_with('.') && !config.is_excluded(&name)
        })
        .collect())
}

/// Build the TOC for every project under `root`. Empty projects are left out.
pub fn scan_projects(root: &Path, config: &ManifestConfig) -> Result<Vec<TocEntry>> {
    let mut toc = Vec::new();

    for project in project_folders(root, config)? {
        let chapters = scan_chapters(&project, root, config)?;
        if !chapters.is_empty() {
            let title = format!("Project: {}", prettify_folder_name(&dir_name(&project)));
            toc.push(TocEntry::section(title, chapters));
        }
    }
    Ok(toc)
}

/// Chapter folders of one project: names starting with a digit.
fn scan_chapters(project: &Path, root: &Path, config: &ManifestConfig) -> Result<Vec<TocEntry>> {
    let (_, dirs) = list_dir(project)?;
    let mut chapters = Vec::new();

    for chapter in dirs {
        let name = dir_name(&chapter);
        let Some(number) = name.chars().next().filter(char::is_ascii_digit) else {
            continue;
        };
        let number = number.to_string();
        if config.skips_chapter(&number) {
            continue;
        }

        let children = scan_folder(&chapter, root, config, 0)?;
        if children.is_empty() {
            continue;
        }

        let chapter_name = config
            .chapter_names
            .get(&number)
            .cloned()
            .unwrap_or_else(|| prettify_folder_name(&name));
        chapters.push(TocEntry::section(
            format!("Chapter {number}: {chapter_name}"),
            children,
        ));
    }
    Ok(chapters)
}

/// Pages of `folder` first, then non-empty subfolders, down to `max_depth`.
pub fn scan_folder(
    folder: &Path,
    root: &Path,
    config: &ManifestConfig,
    depth: usize,
) -> Result<Vec<TocEntry>> {
    if depth >= config.max_depth {
        return Ok(Vec::new());
    }

    let (files, dirs) = list_dir(folder)?;
    let mut entries: Vec<TocEntry> = files
        .iter()
        .filter(|f| ContentKind::is_toc_page(f))
        .filter_map(|f| f.strip_prefix(root).ok())
        .map(|rel| TocEntry::file(to_slash(rel)))
        .collect();

    for sub in dirs {
        let name = dir_name(&sub);
        if config.is_excluded(&name) || name.starts_with('.') || name.ends_with(".dist-info") {
            continue;
        }
        let children = scan_folder(&sub, root, config, depth + 1)?;
        if !children.is_empty() {
            entries.push(TocEntry::section(folder_title(&name), children));
        }
    }
    Ok(entries)
}

/// Files and directories of `dir`, each sorted by name.
fn list_dir(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    let read = fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
    for entry in read {
        let path = entry
            .with_context(|| format!("failed to read entry in {}", dir.display()))?
            .path();
        if path.is_dir() {
            dirs.push(path);
        } else if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    dirs.sort();
    Ok((files, dirs))
}

/// Prettified name, or the raw name when nothing is left of it (`2024_01`).
fn folder_title(name: &str) -> String {
    let pretty = prettify_folder_name(name);
    if pretty.trim().is_empty() { name.to_string() } else { pretty }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
