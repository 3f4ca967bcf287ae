//! Link classification utilities.

use crate::utils::path::route::is_external_link;

/// Syntactic classification of a markdown link destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// URL with a scheme (https://, mailto:, data:, etc.)
    External(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Vault-root path (/attachments/a.png).
    SiteRoot(&'a str),
    /// Path relative to the document or the vault root (img/a.png, ../b.md).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if let Some(anchor) = link.strip_prefix("./#") {
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }

    /// Links that point into the vault and may need rewriting.
    #[inline]
    pub fn is_vault_path(self) -> bool {
        matches!(self, Self::SiteRoot(_) | Self::FileRelative(_))
    }
}
