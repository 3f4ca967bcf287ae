//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// # Example
/// ```text
/// /home/user/vault/notes/day1/     ← cwd
/// /home/user/vault/vaultstage.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Walk up from `start` until a directory contains `config_name`.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("notes/day1");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("vaultstage.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("vaultstage.toml"));
        assert_eq!(found, Some(dir.path().join("vaultstage.toml")));
    }

    #[test]
    fn test_nearest_wins() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("inner");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("vaultstage.toml"), "").unwrap();
        fs::write(nested.join("vaultstage.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("vaultstage.toml"));
        assert_eq!(found, Some(nested.join("vaultstage.toml")));
    }

    #[test]
    fn test_directory_with_config_name_ignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("odd.toml")).unwrap();
        assert_eq!(find_config_file_from(dir.path(), Path::new("odd.toml")), None);
    }

    #[test]
    fn test_absolute_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(find_config_file_from(dir.path(), &path), None);
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file_from(Path::new("/"), &path), Some(path));
    }
}
