//! Web-safe path sanitization.
//!
//! Pure functions. No side effects.
//!
//! - [`sanitize_segment`]: one filename or folder name
//! - [`sanitize_path`]: every segment of a `/` or `\` delimited path
//! - [`is_private_path`]: hidden / underscore-prefixed segments

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// URL-encoded space as produced by exporters and browsers.
const ENCODED_SPACE: &str = "%20";

/// Replace every space and `%20` token with `_`.
///
/// # Examples
/// ```ignore
/// assert_eq!(sanitize_segment("My Photo.png"), "My_Photo.png");
/// assert_eq!(sanitize_segment("My%20Photo.png"), "My_Photo.png");
/// ```
#[inline]
pub fn sanitize_segment(segment: &str) -> String {
    segment.replace(ENCODED_SPACE, "_").replace(' ', "_")
}

/// Sanitize each segment of a path and rejoin with `/`.
///
/// Both `/` and `\` are accepted as separators on input; output always
/// uses `/`.
pub fn sanitize_path(path: &str) -> String {
    path.split(['/', '\\'])
        .map(sanitize_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Check if a path contains a segment starting with `.` or `_`.
///
/// Such files are private to the vault and never indexed. `.` and `..`
/// navigation segments are not private.
pub fn is_private_path(path: &str) -> bool {
    path.split(['/', '\\']).any(is_private_segment)
}

#[inline]
fn is_private_segment(segment: &str) -> bool {
    !matches!(segment, "." | "..") && (segment.starts_with('.') || segment.starts_with('_'))
}

/// Root-relative path with every segment sanitized.
///
/// Invariants:
/// - `/` separated, no leading `/`
/// - every segment passed through [`sanitize_segment`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SanitizedPath(Arc<str>);

impl SanitizedPath {
    /// Sanitize a raw root-relative path. A leading `/` is dropped.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim_start_matches(['/', '\\']);
        Self(Arc::from(sanitize_path(trimmed)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment (the filename).
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Everything before the last segment; empty for root-level files.
    pub fn parent(&self) -> &str {
        self.0.rsplit_once('/').map_or("", |(dir, _)| dir)
    }
}

impl fmt::Display for SanitizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SanitizedPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SanitizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SanitizedPath {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for SanitizedPath {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
