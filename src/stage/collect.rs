//! Vault file collection.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rustc_hash::FxHashSet;

use crate::core::ContentKind;
use crate::vault::index::to_slash;
use crate::vault::{Diagnostic, DiagnosticKind, Diagnostics, FileIndex, SanitizedPath};
use crate::{debug, log};

/// Files that should be ignored during staging.
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Every file under `root`, in sorted traversal order, plus the number of
/// entries that could not be read.
///
/// Directories named in `exclude` are not descended into, nor is `skip_dir`
/// (the output directory when it sits inside the vault). Unreadable entries
/// become `Io` diagnostics.
pub fn collect_all_files(
    root: &Path,
    exclude: &[String],
    skip_dir: Option<&Path>,
    diagnostics: &Diagnostics,
) -> (Vec<PathBuf>, usize) {
    let exclude = exclude.to_vec();
    let skip_dir = skip_dir.map(Path::to_path_buf);

    let mut files = Vec::new();
    let mut unreadable = 0;
    let walk = WalkDir::new(root)
        .sort(true)
        .skip_hidden(false)
        .process_read_dir(move |_, _, _, children| {
            children.retain(|entry| match entry {
                Ok(e) if e.file_type().is_dir() => {
                    let name = e.file_name().to_string_lossy();
                    let excluded = exclude.iter().any(|x| *x == name);
                    !excluded && skip_dir.as_deref() != Some(e.path().as_path())
                }
                _ => true,
            });
        });

    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                unreadable += 1;
                diagnostics.push(walk_error(root, e.path(), &e));
                continue;
            }
        };
        if let Some(e) = &entry.read_children_error {
            unreadable += 1;
            let dir = entry.path();
            diagnostics.push(walk_error(root, Some(e.path().unwrap_or(dir.as_path())), e));
        }
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().unwrap_or_default();
        if !IGNORED_FILES.contains(&name) {
            files.push(entry.path());
        }
    }

    (files, unreadable)
}

/// `Io` diagnostic for an entry or directory the walk could not read.
fn walk_error(root: &Path, path: Option<&Path>, error: &jwalk::Error) -> Diagnostic {
    let reference = match path {
        Some(path) => match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => to_slash(rel),
            _ => path.display().to_string(),
        },
        None => root.display().to_string(),
    };
    log!("error"; "cannot read {reference}: {error}");
    Diagnostic::new(DiagnosticKind::Io, &reference, &reference).with_detail(error.to_string())
}

/// One file to stage.
#[derive(Debug, Clone)]
pub struct VaultFile {
    /// Absolute source path.
    pub path: PathBuf,
    /// Root-relative path as found in the vault, `/` separated.
    pub relative: String,
    /// Root-relative output path.
    pub target: SanitizedPath,
    pub markdown: bool,
}

/// Everything a run needs before touching any document.
pub struct StagePlan {
    pub files: Vec<VaultFile>,
    pub index: FileIndex,
    /// Entries the walk could not read.
    pub unreadable: usize,
}

impl StagePlan {
    /// Collect files and build the index from them.
    pub fn collect(
        root: &Path,
        exclude: &[String],
        skip_dir: Option<&Path>,
        diagnostics: &Diagnostics,
    ) -> Self {
        let (paths, unreadable) = collect_all_files(root, exclude, skip_dir, diagnostics);
        let index = FileIndex::from_files(root, &paths, diagnostics);

        let mut targets = FxHashSet::default();
        let files = paths
            .into_iter()
            .filter_map(|path| {
                let relative = to_slash(path.strip_prefix(root).ok()?);
                let target = SanitizedPath::new(&relative);
                if !targets.insert(target.clone()) {
                    debug!("stage"; "skipping {relative}: {target} already staged");
                    return None;
                }
                let markdown = ContentKind::is_markdown(&path);
                Some(VaultFile {
                    path,
                    relative,
                    target,
                    markdown,
                })
            })
            .collect();

        Self {
            files,
            index,
            unreadable,
        }
    }

    pub fn markdown_count(&self) -> usize {
        self.files.iter().filter(|f| f.markdown).count()
    }

    pub fn other_count(&self) -> usize {
        self.files.len() - self.markdown_count()
    }
}
