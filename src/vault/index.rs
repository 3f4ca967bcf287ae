//! Vault-wide file index.
//!
//! Built once per run, before any document is rewritten, and read-only
//! afterwards. Two lookups:
//!
//! ```text
//! by_filename                       all_paths
//! ===========                       =========
//! diagram.png -> assets/diagram.png   assets/diagram.png
//! x.png       -> [a/x.png, b/x.png]   a/x.png, b/x.png
//! ```

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};

use super::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use super::sanitize::{SanitizedPath, is_private_path, sanitize_segment};

/// Candidates for one sanitized filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEntry {
    Unique(SanitizedPath),
    /// Several files, in traversal order. Never empty.
    Ambiguous(Vec<SanitizedPath>),
}

impl IndexEntry {
    /// The candidate used for resolution (first seen).
    pub fn first(&self) -> &SanitizedPath {
        match self {
            Self::Unique(path) => path,
            Self::Ambiguous(paths) => &paths[0],
        }
    }

    /// All candidates in traversal order.
    pub fn candidates(&self) -> &[SanitizedPath] {
        match self {
            Self::Unique(path) => std::slice::from_ref(path),
            Self::Ambiguous(paths) => paths,
        }
    }

    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }

    fn push(&mut self, path: SanitizedPath) {
        match self {
            Self::Unique(first) => *self = Self::Ambiguous(vec![first.clone(), path]),
            Self::Ambiguous(paths) => paths.push(path),
        }
    }
}

/// Lookup index over every non-private file of a vault.
#[derive(Debug, Default)]
pub struct FileIndex {
    by_filename: FxHashMap<String, IndexEntry>,
    all_paths: FxHashSet<SanitizedPath>,
}

impl FileIndex {
    /// Index files found under `root`, in the given (traversal) order.
    pub fn from_files(root: &Path, files: &[PathBuf], diagnostics: &Diagnostics) -> Self {
        let relative = files
            .iter()
            .filter_map(|path| path.strip_prefix(root).ok().map(to_slash));
        Self::from_paths(relative, diagnostics)
    }

    /// Build an index from root-relative paths, in traversal order.
    pub fn from_paths<I, S>(paths: I, diagnostics: &Diagnostics) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for raw in paths {
            index.insert(raw.as_ref(), diagnostics);
        }
        index
    }

    fn insert(&mut self, raw: &str, diagnostics: &Diagnostics) {
        if raw.is_empty() || is_private_path(raw) {
            return;
        }

        let path = SanitizedPath::new(raw);
        if !self.all_paths.insert(path.clone()) {
            diagnostics.push(
                Diagnostic::new(DiagnosticKind::PathCollision, raw, "")
                    .with_detail(format!("sanitizes to existing {path}")),
            );
            return;
        }

        let key = path.file_name().to_owned();
        match self.by_filename.get_mut(&key) {
            None => {
                self.by_filename.insert(key, IndexEntry::Unique(path));
            }
            Some(entry) => {
                diagnostics.push(
                    Diagnostic::new(DiagnosticKind::DuplicateFilename, key.as_str(), "")
                        .with_detail(format!("{} also at {}", entry.first(), path)),
                );
                entry.push(path);
            }
        }
    }

    /// Look up a bare filename (sanitized before lookup).
    pub fn lookup(&self, filename: &str) -> Option<&IndexEntry> {
        self.by_filename.get(&sanitize_segment(filename))
    }

    /// Check if a sanitized root-relative path exists.
    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.all_paths.contains(path)
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.all_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_paths.is_empty()
    }

    /// Filenames shared by more than one file, sorted.
    pub fn duplicates(&self) -> Vec<(&str, &[SanitizedPath])> {
        let mut dups: Vec<_> = self
            .by_filename
            .iter()
            .filter(|(_, entry)| entry.is_ambiguous())
            .map(|(name, entry)| (name.as_str(), entry.candidates()))
            .collect();
        dups.sort_by_key(|(name, _)| *name);
        dups
    }
}

/// Join path components with `/` regardless of host separator.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
