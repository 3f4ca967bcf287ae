//! File kind definitions.

use std::path::Path;

/// Kind of document file in a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Markdown note (.md, .markdown), rewritten during staging
    Markdown,
    /// Jupyter notebook (.ipynb), copied as-is
    Notebook,
}

impl ContentKind {
    /// Detect content kind from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "ipynb" => Some(Self::Notebook),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Notebook => "notebook",
        }
    }

    /// Markdown content goes through the rewrite pipeline.
    #[inline]
    pub fn is_markdown(path: &Path) -> bool {
        Self::from_path(path) == Some(Self::Markdown)
    }

    /// Files listed as pages in the table of contents (`.md`, `.ipynb`).
    #[inline]
    pub fn is_toc_page(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "md" || e == "ipynb")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(ContentKind::from_path(Path::new("a/b.md")), Some(ContentKind::Markdown));
        assert_eq!(ContentKind::from_path(Path::new("b.MARKDOWN")), Some(ContentKind::Markdown));
        assert_eq!(ContentKind::from_path(Path::new("nb.ipynb")), Some(ContentKind::Notebook));
        assert_eq!(ContentKind::from_path(Path::new("x.png")), None);
        assert_eq!(ContentKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_markdown_only_rewritten() {
        assert!(ContentKind::is_markdown(Path::new("notes/a.md")));
        assert!(!ContentKind::is_markdown(Path::new("nb.ipynb")));
    }

    #[test]
    fn test_toc_pages() {
        assert!(ContentKind::is_toc_page(Path::new("a.md")));
        assert!(ContentKind::is_toc_page(Path::new("a.ipynb")));
        // TOC listing is case-sensitive, unlike staging
        assert!(!ContentKind::is_toc_page(Path::new("a.MD")));
        assert!(!ContentKind::is_toc_page(Path::new("a.markdown")));
    }
}
