//! `[manifest]` section configuration.
//!
//! Controls the generated `myst.yml`.
//!
//! # Example
//!
//! ```toml
//! [manifest]
//! title = "Research Biology"
//! license = "CC-BY-4.0"
//! max_depth = 4
//! skip_chapters = ["5"]
//!
//! [manifest.chapter_names]
//! 1 = "ELN"
//! 2 = "Curated Datasets"
//!
//! [manifest.site]
//! favicon = "_static/favicon.png"
//! style = "_static/style.css"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DEFAULT_TOC_EXCLUDE, strings};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Manifest file name, written into the staged directory.
    pub output: String,

    /// Project name the title is derived from (default: directory name).
    pub name: Option<String>,

    /// Book title (default: prettified project name).
    pub title: Option<String>,

    /// Project id (default: a fresh UUID v4 per run).
    pub id: Option<String>,

    /// Project description (default: `Research data from <title>`).
    pub description: Option<String>,

    pub license: String,
    pub open_access: bool,

    /// Site template name.
    pub template: String,

    /// Folder levels scanned below each chapter.
    pub max_depth: usize,

    /// Chapter numbers left out of the TOC.
    pub skip_chapters: Vec<String>,

    /// Chapter number to display name.
    pub chapter_names: BTreeMap<String, String>,

    /// Suffixes stripped from the directory name to get the project name.
    pub name_suffixes: Vec<String>,

    /// Folder names never listed.
    pub exclude: Vec<String>,

    pub site: ManifestSiteConfig,
}

/// `site.options` of the manifest. Only configured keys are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestSiteConfig {
    pub favicon: Option<String>,
    pub logo: Option<String>,
    pub logo_dark: Option<String>,
    pub style: Option<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        let chapter_names = [
            ("1", "ELN"),
            ("2", "Curated Datasets"),
            ("3", "Code"),
            ("4", "Auxiliary Files"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            output: "myst.yml".into(),
            name: None,
            title: None,
            id: None,
            description: None,
            license: "CC-BY-4.0".into(),
            open_access: true,
            template: "book-theme".into(),
            max_depth: 4,
            skip_chapters: vec!["5".into()],
            chapter_names,
            name_suffixes: vec!["_local".into(), "_gcs".into()],
            exclude: strings(DEFAULT_TOC_EXCLUDE),
            site: ManifestSiteConfig::default(),
        }
    }
}

impl ManifestConfig {
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.exclude.iter().any(|e| e == dir_name)
    }

    pub fn skips_chapter(&self, number: &str) -> bool {
        self.skip_chapters.iter().any(|c| c == number)
    }

    /// Strip every configured suffix from a directory name.
    pub fn project_name(&self, dir_name: &str) -> String {
        self.name_suffixes
            .iter()
            .fold(dir_name.to_string(), |name, suffix| name.replace(suffix.as_str(), ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_manifest_defaults() {
        let config = test_parse_config("");
        let manifest = &config.manifest;
        assert_eq!(manifest.output, "myst.yml");
        assert_eq!(manifest.license, "CC-BY-4.0");
        assert_eq!(manifest.max_depth, 4);
        assert!(manifest.skips_chapter("5"));
        assert!(!manifest.skips_chapter("1"));
        assert_eq!(manifest.chapter_names.get("2").map(String::as_str), Some("Curated Datasets"));
        assert!(manifest.is_excluded("dist-info"));
        assert!(manifest.site.favicon.is_none());
    }

    #[test]
    fn test_manifest_site_options() {
        let config = test_parse_config(
            "[manifest]\ntitle = \"Lab\"\nskip_chapters = []\n[manifest.site]\nlogo = \"_static/logo.png\"",
        );
        assert_eq!(config.manifest.title.as_deref(), Some("Lab"));
        assert!(!config.manifest.skips_chapter("5"));
        assert_eq!(config.manifest.site.logo.as_deref(), Some("_static/logo.png"));
        assert!(config.manifest.site.style.is_none());
    }

    #[test]
    fn test_chapter_names_table() {
        let config = test_parse_config("[manifest.chapter_names]\n1 = \"Notebook\"\n6 = \"Talks\"");
        let names = &config.manifest.chapter_names;
        assert_eq!(names.get("1").map(String::as_str), Some("Notebook"));
        assert_eq!(names.get("6").map(String::as_str), Some("Talks"));
        // a configured table replaces the defaults
        assert!(!names.contains_key("2"));
    }

    #[test]
    fn test_project_name() {
        let manifest = ManifestConfig::default();
        assert_eq!(manifest.project_name("research_biology_md_local"), "research_biology_md");
        assert_eq!(manifest.project_name("bucket_gcs"), "bucket");
        assert_eq!(manifest.project_name("plain"), "plain");
    }
}
