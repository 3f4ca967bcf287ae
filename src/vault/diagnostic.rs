//! Diagnostics collected while indexing and rewriting.
//!
//! Nothing in the engine fails hard: unresolved links, ambiguous names and
//! per-file I/O errors are pushed here and the run continues. The sink is
//! shared by parallel workers, so pushes go through a mutex and the
//! recorded order across documents is unspecified. Use [`Diagnostics::sorted`]
//! for stable output.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;
use parking_lot::Mutex;
use serde::Serialize;

use crate::utils::plural_s;

/// What went wrong (or was decided arbitrarily).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Several files share one sanitized filename.
    DuplicateFilename,
    /// Two source paths sanitize to the same output path.
    PathCollision,
    /// Bare filename not present in the index.
    Unresolved,
    /// Bare filename matched several files; the first was used.
    Ambiguous,
    /// Explicit path not found under either interpretation.
    PathNotFound,
    /// File could not be read or written.
    Io,
}

impl DiagnosticKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::DuplicateFilename => "duplicate filename",
            Self::PathCollision => "path collision",
            Self::Unresolved => "unresolved",
            Self::Ambiguous => "ambiguous",
            Self::PathNotFound => "path not found",
            Self::Io => "io",
        }
    }

    /// Index-time findings are informational; the rest are warnings.
    pub const fn is_warning(self) -> bool {
        !matches!(self, Self::DuplicateFilename)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The reference, filename or path the diagnostic is about.
    pub reference: String,
    /// Document (or file) the diagnostic was raised in; empty for index-wide findings.
    pub document: String,
    /// Extra context: alternatives, the chosen candidate, an error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        reference: impl Into<String>,
        document: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            reference: reference.into(),
            document: document.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.reference)?;
        if !self.document.is_empty() {
            write!(f, " (in {})", self.document)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, " - {detail}")?;
        }
        Ok(())
    }
}

/// Append-only, thread-safe diagnostic sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, diagnostic: Diagnostic) {
        self.items.lock().push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.lock().iter().filter(|d| d.kind == kind).count()
    }

    /// Number of diagnostics that are warnings.
    pub fn warning_count(&self) -> usize {
        self.items.lock().iter().filter(|d| d.kind.is_warning()).count()
    }

    /// Copy of all diagnostics, sorted by document, kind, then reference.
    pub fn sorted(&self) -> Vec<Diagnostic> {
        let mut items = self.items.lock().clone();
        items.sort_by(|a, b| {
            (&a.document, a.kind, &a.reference).cmp(&(&b.document, b.kind, &b.reference))
        });
        items
    }

    /// Take all diagnostics, leaving the sink empty.
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.items.lock())
    }

    /// Print diagnostics grouped by document.
    ///
    /// Output format:
    /// ```text
    /// diagnostics (2 files, 3 warnings)
    /// [notes/a.md]
    /// → unresolved: missing.png
    /// → ambiguous: x.png - used a/x.png, ignored b/x.png
    /// ```
    pub fn print(&self) {
        let items = self.sorted();
        if items.is_empty() {
            return;
        }

        let mut grouped: BTreeMap<&str, Vec<&Diagnostic>> = BTreeMap::new();
        for item in &items {
            let key = if item.document.is_empty() {
                "index"
            } else {
                item.document.as_str()
            };
            grouped.entry(key).or_default().push(item);
        }

        let files = grouped.len();
        let warnings = items.iter().filter(|d| d.kind.is_warning()).count();
        eprintln!();
        eprintln!(
            "{} {}",
            "diagnostics".yellow().bold(),
            format!(
                "({files} file{}, {warnings} warning{})",
                plural_s(files),
                plural_s(warnings)
            )
            .dimmed()
        );

        for (document, diagnostics) in grouped {
            eprintln!("{}{}{}", "[".dimmed(), document.cyan(), "]".dimmed());
            for d in diagnostics {
                let arrow = if d.kind.is_warning() {
                    "→".yellow().to_string()
                } else {
                    "→".dimmed().to_string()
                };
                match &d.detail {
                    Some(detail) => {
                        eprintln!("{arrow} {}: {} {}", d.kind, d.reference, detail.dimmed())
                    }
                    None => eprintln!("{arrow} {}: {}", d.kind, d.reference),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::new(DiagnosticKind::Unresolved, "a.png", "x.md"));
        diagnostics.push(Diagnostic::new(DiagnosticKind::DuplicateFilename, "b.png", ""));
        diagnostics.push(Diagnostic::new(DiagnosticKind::Unresolved, "c.png", "y.md"));

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::Unresolved), 2);
        assert_eq!(diagnostics.warning_count(), 2);
    }

    #[test]
    fn test_sorted_is_stable_across_push_order() {
        let a = Diagnostics::new();
        let b = Diagnostics::new();
        let items = [
            Diagnostic::new(DiagnosticKind::Unresolved, "z.png", "b.md"),
            Diagnostic::new(DiagnosticKind::Ambiguous, "x.png", "a.md"),
            Diagnostic::new(DiagnosticKind::Unresolved, "y.png", "a.md"),
        ];
        for item in items.iter().cloned() {
            a.push(item);
        }
        for item in items.iter().rev().cloned() {
            b.push(item);
        }
        assert_eq!(a.sorted(), b.sorted());
        assert_eq!(a.sorted()[0].reference, "y.png");
    }

    #[test]
    fn test_parallel_push() {
        use rayon::prelude::*;

        let diagnostics = Diagnostics::new();
        (0..200).into_par_iter().for_each(|i| {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::PathNotFound,
                format!("{i}.png"),
                "doc.md",
            ));
        });
        assert_eq!(diagnostics.len(), 200);
    }

    #[test]
    fn test_drain() {
        let diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::new(DiagnosticKind::Io, "a.md", "a.md").with_detail("denied"));
        let drained = diagnostics.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].detail.as_deref(), Some("denied"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::new(DiagnosticKind::Ambiguous, "x.png", "notes/a.md")
            .with_detail("used a/x.png");
        assert_eq!(d.to_string(), "ambiguous: x.png (in notes/a.md) - used a/x.png");
    }
}
