//! Phase 3: sanitize standard markdown link destinations.
//!
//! `[text](url)` and `![alt](url)` pointing inside the vault get the same
//! segment sanitization as the output tree, so `My%20Plot.png` keeps
//! working after the file is staged as `My_Plot.png`. Root-relative targets
//! that exist in the index are rewritten relative to the document.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::LinkKind;
use crate::utils::path::route::split_path_fragment;
use crate::vault::index::FileIndex;
use crate::vault::relative::relative_path;
use crate::vault::sanitize::{SanitizedPath, sanitize_path};

/// `[label](dest)` or `![alt](dest)`. The label may hold one nested link or
/// image, as in badge links `[![alt](img.png)](target)`.
static STANDARD_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[((?:[^\[\]\n]|!?\[[^\[\]\n]*\]\([^)\n]*\))*)\]\(([^)\n]*)\)").unwrap()
});

/// Rewrite destinations of every standard link and image in `text`.
pub fn sanitize_links(text: &str, doc: &SanitizedPath, index: &FileIndex) -> String {
    STANDARD_LINK
        .replace_all(text, |caps: &Captures| {
            let bang = &caps[1];
            let label = if caps[2].contains("](") {
                sanitize_links(&caps[2], doc, index)
            } else {
                caps[2].to_string()
            };
            let dest = rewrite_destination(&caps[3], doc, index)
                .unwrap_or_else(|| caps[3].to_string());
            format!("{bang}[{label}]({dest})")
        })
        .into_owned()
}

/// New destination, or `None` to leave the link as written.
fn rewrite_destination(raw: &str, doc: &SanitizedPath, index: &FileIndex) -> Option<String> {
    let (url, title) = split_title(raw.trim());
    let (url, angled) = match url.strip_prefix('<').and_then(|u| u.strip_suffix('>')) {
        Some(inner) => (inner, true),
        None => (url, false),
    };

    if url.is_empty() || !LinkKind::parse(url).is_vault_path() {
        return None;
    }

    let (path, fragment) = split_path_fragment(url);
    let sanitized = sanitize_path(path);
    let lookup = sanitized.trim_start_matches('/');

    let mut dest = if index.contains(lookup) {
        relative_path(doc.as_str(), lookup)
    } else {
        sanitized
    };
    if !fragment.is_empty() {
        dest.push('#');
        dest.push_str(fragment);
    }
    if angled {
        dest = format!("<{dest}>");
    }
    if let Some(title) = title {
        dest.push(' ');
        dest.push_str(title);
    }
    Some(dest)
}

/// Split `url "title"` into its parts. The title keeps its quotes.
fn split_title(dest: &str) -> (&str, Option<&str>) {
    if dest.ends_with('"')
        && let Some(pos) = dest.rfind(" \"")
        && pos + 1 < dest.len() - 1
    {
        return (dest[..pos].trim_end(), Some(&dest[pos + 1..]));
    }
    (dest, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::diagnostic::Diagnostics;

    fn rewrite(text: &str, doc: &str, paths: &[&str]) -> String {
        let index = FileIndex::from_paths(paths.iter().copied(), &Diagnostics::new());
        sanitize_links(text, &SanitizedPath::new(doc), &index)
    }

    #[test]
    fn test_external_untouched() {
        let text = "[site](https://example.com/a b) ![x](data:image/png;base64,AAA=) [m](mailto:a@b.c)";
        assert_eq!(rewrite(text, "a.md", &[]), text);
    }

    #[test]
    fn test_fragment_untouched() {
        assert_eq!(rewrite("[up](#top)", "a.md", &[]), "[up](#top)");
    }

    #[test]
    fn test_encoded_space_sanitized() {
        assert_eq!(
            rewrite("![](img/My%20Plot.png)", "notes/a.md", &[]),
            "![](img/My_Plot.png)"
        );
    }

    #[test]
    fn test_root_relative_made_relative() {
        assert_eq!(
            rewrite("![plot](assets/My Plot.png)", "notes/a.md", &["assets/My Plot.png"]),
            "![plot](../assets/My_Plot.png)"
        );
        assert_eq!(
            rewrite("[doc](/data/run%201.csv)", "p/x/a.md", &["data/run 1.csv"]),
            "[doc](../../data/run_1.csv)"
        );
    }

    #[test]
    fn test_title_and_fragment_preserved() {
        assert_eq!(
            rewrite(r#"[s](other note.md#Part 2 "Other")"#, "n/a.md", &[]),
            r#"[s](other_note.md#Part 2 "Other")"#
        );
    }

    #[test]
    fn test_angle_brackets() {
        assert_eq!(
            rewrite("[s](<my file.pdf>)", "a.md", &[]),
            "[s](<my_file.pdf>)"
        );
    }

    #[test]
    fn test_embed_syntax_not_matched() {
        assert_eq!(rewrite("![[x y.png]]", "a.md", &[]), "![[x y.png]]");
    }

    #[test]
    fn test_nested_badge_link() {
        assert_eq!(
            rewrite("[![ci](badges/build ok.svg)](reports/run 1.md)", "a.md", &[]),
            "[![ci](badges/build_ok.svg)](reports/run_1.md)"
        );
        assert_eq!(
            rewrite("[![a](x.png)](my file.md)", "notes/a.md", &["x.png", "my file.md"]),
            "[![a](../x.png)](../my_file.md)"
        );
    }

    #[test]
    fn test_digit_prefixed_name_is_not_a_scheme() {
        assert_eq!(
            rewrite("[notes](10:30 meeting.md)", "a.md", &[]),
            "[notes](10:30_meeting.md)"
        );
    }

    #[test]
    fn test_split_title() {
        assert_eq!(split_title(r#"a.png "T""#), ("a.png", Some(r#""T""#)));
        assert_eq!(split_title("a.png"), ("a.png", None));
        assert_eq!(split_title(r#"a".png"#), (r#"a".png"#, None));
    }
}
