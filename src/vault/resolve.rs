//! Embedded reference resolution.
//!
//! Resolves the inside of a `![[...]]` token against the [`FileIndex`] and
//! decides how it renders. All ambiguity and failure policy lives here:
//!
//! | Reference            | Policy                                            |
//! |----------------------|---------------------------------------------------|
//! | bare, unique         | link to the indexed file                          |
//! | bare, ambiguous      | first-seen candidate, `Ambiguous` diagnostic      |
//! | bare, missing        | token left untouched, `Unresolved` diagnostic     |
//! | path, root-relative  | link relative to the document                     |
//! | path, doc-relative   | sanitized reference as given                      |
//! | path, missing        | sanitized reference, `PathNotFound` diagnostic    |
//!
//! When a path exists under both interpretations the root-relative one wins.

use rustc_hash::FxHashSet;

use super::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use super::index::FileIndex;
use super::relative::{join_relative, relative_path};
use super::sanitize::{SanitizedPath, sanitize_path};

/// How a resolved reference is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    /// `![](path)`
    Image,
    /// `[label](path)`
    Download,
}

/// Case-insensitive set of image file extensions.
#[derive(Debug, Clone)]
pub struct ImageSet(FxHashSet<String>);

impl ImageSet {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        )
    }

    /// Check if a filename or path has an image extension.
    pub fn is_image(&self, name: &str) -> bool {
        extension_of(name).is_some_and(|ext| self.0.contains(&ext.to_ascii_lowercase()))
    }

    pub fn kind_of(&self, name: &str) -> RenderKind {
        if self.is_image(name) {
            RenderKind::Image
        } else {
            RenderKind::Download
        }
    }
}

impl Default for ImageSet {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_EXTENSIONS)
    }
}

pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"];

/// Extension of the last path segment, without the dot.
fn extension_of(name: &str) -> Option<&str> {
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    file.rsplit_once('.')
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
        .map(|(_, ext)| ext)
}

/// Where a reference ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Resolved to an indexed file.
    Found(SanitizedPath),
    /// Explicit path not found; emitted sanitized, best effort.
    Passthrough,
    /// Bare filename not found; token left as written.
    Unresolved,
}

/// Result of resolving one embedded reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Raw text between `![[` and `]]`.
    pub reference: String,
    pub target: Target,
    /// Link destination, relative to the document when resolved.
    pub href: String,
    pub kind: RenderKind,
    /// Download link label: alias if given, else the original filename.
    pub label: String,
}

impl ResolvedLink {
    pub fn is_resolved(&self) -> bool {
        matches!(self.target, Target::Found(_))
    }

    /// Render as standard markdown (or the untouched token when unresolved).
    pub fn render(&self) -> String {
        match (&self.target, self.kind) {
            (Target::Unresolved, _) => format!("![[{}]]", self.reference),
            (_, RenderKind::Image) => format!("![]({})", self.href),
            (_, RenderKind::Download) => format!("[{}]({})", self.label, self.href),
        }
    }
}

/// Resolves embedded references for documents of one vault.
pub struct Resolver<'a> {
    index: &'a FileIndex,
    images: &'a ImageSet,
    diagnostics: &'a Diagnostics,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a FileIndex, images: &'a ImageSet, diagnostics: &'a Diagnostics) -> Self {
        Self {
            index,
            images,
            diagnostics,
        }
    }

    /// Resolve `raw` (the text inside `![[...]]`) as referenced from `doc`.
    pub fn resolve(&self, raw: &str, doc: &SanitizedPath) -> ResolvedLink {
        let (reference, alias) = match raw.split_once('|') {
            Some((reference, alias)) => (reference.trim(), Some(alias.trim())),
            None => (raw.trim(), None),
        };
        let (path, fragment) = reference.split_once('#').unwrap_or((reference, ""));

        let original_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        let label = alias
            .filter(|a| !a.is_empty())
            .unwrap_or(original_name)
            .to_string();
        let kind = self.images.kind_of(path);

        let (target, href) = if path.contains(['/', '\\']) {
            self.resolve_path(path, doc)
        } else {
            self.resolve_filename(path, doc)
        };

        let href = if fragment.is_empty() || target == Target::Unresolved {
            href
        } else {
            format!("{href}#{fragment}")
        };

        ResolvedLink {
            reference: raw.to_string(),
            target,
            href,
            kind,
            label,
        }
    }

    /// Explicit path: root-relative first, then relative to the document.
    fn resolve_path(&self, path: &str, doc: &SanitizedPath) -> (Target, String) {
        let sanitized = sanitize_path(path);
        let root_relative = sanitized.trim_start_matches('/');

        if self.index.contains(root_relative) {
            let href = relative_path(doc.as_str(), root_relative);
            return (Target::Found(SanitizedPath::new(root_relative)), href);
        }

        if let Some(candidate) = join_relative(doc.as_str(), &sanitized)
            && self.index.contains(&candidate)
        {
            return (Target::Found(SanitizedPath::new(&candidate)), sanitized);
        }

        self.diagnostics.push(Diagnostic::new(
            DiagnosticKind::PathNotFound,
            path,
            doc.as_str(),
        ));
        (Target::Passthrough, sanitized)
    }

    /// Bare filename: vault-wide lookup, first-seen wins on ambiguity.
    fn resolve_filename(&self, name: &str, doc: &SanitizedPath) -> (Target, String) {
        let Some(entry) = self.index.lookup(name) else {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::Unresolved,
                name,
                doc.as_str(),
            ));
            return (Target::Unresolved, String::new());
        };

        let chosen = entry.first();
        if entry.is_ambiguous() {
            let ignored = entry.candidates()[1..]
                .iter()
                .map(SanitizedPath::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            self.diagnostics.push(
                Diagnostic::new(DiagnosticKind::Ambiguous, name, doc.as_str())
                    .with_detail(format!("used {chosen}, ignored {ignored}")),
            );
        }

        let href = relative_path(doc.as_str(), chosen.as_str());
        (Target::Found(chosen.clone()), href)
    }
}
