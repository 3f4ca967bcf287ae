//! Relative link computation between two root-relative paths.

use std::path::{Component, Path};

/// Relative path from the directory containing `from_doc` to `to`.
///
/// Always `/` separated. When no relative path exists (e.g. `from_doc`
/// climbs above the root with `..`), `to` is returned unchanged.
///
/// # Examples
/// ```ignore
/// assert_eq!(relative_path("notes/a.md", "assets/d.png"), "../assets/d.png");
/// assert_eq!(relative_path("notes/a.md", "notes/img/d.png"), "img/d.png");
/// assert_eq!(relative_path("a.md", "assets/d.png"), "assets/d.png");
/// ```
pub fn relative_path(from_doc: &str, to: &str) -> String {
    let from_dir = Path::new(from_doc).parent().unwrap_or(Path::new(""));
    let target = Path::new(to);

    match pathdiff::diff_paths(target, from_dir) {
        Some(rel) if rel.as_os_str().is_empty() => file_name_or(to),
        Some(rel) => join_slash(&rel),
        None => to.to_string(),
    }
}

/// Lexically resolve `rel` against the directory containing `from_doc`.
///
/// Returns `None` when `..` climbs above the root.
///
/// # Examples
/// ```ignore
/// assert_eq!(join_relative("notes/a.md", "../assets/x.png"), Some("assets/x.png".into()));
/// assert_eq!(join_relative("a.md", "../x.png"), None);
/// ```
pub fn join_relative(from_doc: &str, rel: &str) -> Option<String> {
    let from_dir = from_doc.rsplit_once('/').map_or("", |(dir, _)| dir);
    let mut segments: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();

    for part in rel.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(part),
        }
    }

    Some(segments.join("/"))
}

fn join_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::ParentDir => Some("..".into()),
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn file_name_or(to: &str) -> String {
    to.rsplit('/').next().unwrap_or(to).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_directories() {
        assert_eq!(
            relative_path("notes/a.md", "assets/diagram.png"),
            "../assets/diagram.png"
        );
        assert_eq!(relative_path("A/file.md", "B/file.md"), "../B/file.md");
    }

    #[test]
    fn test_same_and_nested_directory() {
        assert_eq!(relative_path("notes/a.md", "notes/b.png"), "b.png");
        assert_eq!(relative_path("notes/a.md", "notes/img/b.png"), "img/b.png");
    }

    #[test]
    fn test_from_root_document() {
        assert_eq!(relative_path("a.md", "assets/d.png"), "assets/d.png");
        assert_eq!(relative_path("a.md", "d.png"), "d.png");
    }

    #[test]
    fn test_deep_to_root() {
        assert_eq!(relative_path("p/1_ELN/day/x.md", "README.md"), "../../../README.md");
        assert_eq!(
            relative_path("p/1_ELN/day/x.md", "p/2_Data/set.csv"),
            "../../2_Data/set.csv"
        );
    }

    #[test]
    fn test_self_reference() {
        assert_eq!(relative_path("notes/a.md", "notes/a.md"), "a.md");
    }

    #[test]
    fn test_incomparable_falls_back() {
        // document directory climbs above root: no relative path exists
        assert_eq!(relative_path("../outside/a.md", "assets/d.png"), "assets/d.png");
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(
            join_relative("notes/a.md", "img/x.png"),
            Some("notes/img/x.png".to_string())
        );
        assert_eq!(
            join_relative("notes/a.md", "../assets/x.png"),
            Some("assets/x.png".to_string())
        );
        assert_eq!(
            join_relative("notes/a.md", "./x.png"),
            Some("notes/x.png".to_string())
        );
        assert_eq!(join_relative("a.md", "../x.png"), None);
    }

    #[test]
    fn test_round_trip_resolves_to_target() {
        for (from, to) in [
            ("notes/a.md", "assets/diagram.png"),
            ("x/y/z.md", "x/q.png"),
            ("root.md", "deep/er/file.pdf"),
            ("a/b/c.md", "a/b/c.png"),
        ] {
            let rel = relative_path(from, to);
            assert_eq!(join_relative(from, &rel).as_deref(), Some(to), "{from} -> {to}");
        }
    }
}
