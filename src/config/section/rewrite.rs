//! `[rewrite]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [rewrite]
//! attachments = "attachments"
//! image_extensions = ["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "tiff"]
//! vendor_folders = ["Lab(?:%20|[ _])Notebook(?:%20|[ _])[0-9a-f]{6,32}/"]
//! typography = true
//! ```

use serde::{Deserialize, Serialize};

use super::{DEFAULT_VENDOR_FOLDERS, strings};
use crate::vault::resolve::DEFAULT_IMAGE_EXTENSIONS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Vault folder that vendor export folders are redirected to.
    pub attachments: String,

    /// Extensions rendered as images; everything else becomes a download link.
    pub image_extensions: Vec<String>,

    /// Case-insensitive regexes matching vendor export folder prefixes.
    pub vendor_folders: Vec<String>,

    /// Normalize dashes and escape `@`.
    pub typography: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            attachments: "attachments".into(),
            image_extensions: strings(DEFAULT_IMAGE_EXTENSIONS),
            vendor_folders: strings(DEFAULT_VENDOR_FOLDERS),
            typography: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_rewrite_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.rewrite.attachments, "attachments");
        assert!(config.rewrite.image_extensions.iter().any(|e| e == "png"));
        assert_eq!(config.rewrite.vendor_folders.len(), 1);
        assert!(config.rewrite.typography);
    }

    #[test]
    fn test_rewrite_override() {
        let config = test_parse_config(
            "[rewrite]\nattachments = \"files\"\nimage_extensions = [\"tiff\"]\ntypography = false",
        );
        assert_eq!(config.rewrite.attachments, "files");
        assert_eq!(config.rewrite.image_extensions, vec!["tiff".to_string()]);
        assert!(!config.rewrite.typography);
        // untouched field keeps its default
        assert_eq!(config.rewrite.vendor_folders.len(), 1);
    }
}
