//! Link string utilities.

/// Check if a link is external (has a URL scheme like http:, mailto:, data:)
///
/// A valid scheme must:
/// - Start with an ASCII letter
/// - Only contain ASCII alphanumeric or `+`, `-`, `.` after that
///
/// # Examples
/// ```ignore
/// assert!(is_external_link("https://example.com"));
/// assert!(is_external_link("data:image/png;base64,AAAA"));
/// assert!(!is_external_link("attachments/photo.png"));
/// ```
#[inline]
pub fn is_external_link(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Split a link into path and fragment parts
///
/// The fragment is empty when there is no `#`.
#[inline]
pub fn split_path_fragment(url: &str) -> (&str, &str) {
    url.split_once('#').unwrap_or((url, ""))
}
