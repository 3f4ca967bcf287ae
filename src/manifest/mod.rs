//! `myst.yml` generation for a staged vault.

pub mod toc;


use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::config::{ManifestConfig, ManifestSiteConfig};
use crate::utils::prettify_folder_name;
use crate::{debug, log};

pub use toc::TocEntry;

/// Root-level files tried as the homepage, in order.
const HOMEPAGE_CANDIDATES: &[&str] = &["README.md", "index.md", "intro.md"];

/// The generated manifest. Field order is the YAML key order.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub version: u32,
    pub project: Project,
    pub site: Site,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub open_access: bool,
    pub license: String,
    pub toc: Vec<TocEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub template: String,
    pub options: SiteOptions,
}

/// Only configured keys are written.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_dark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl From<&ManifestSiteConfig> for SiteOptions {
    fn from(site: &ManifestSiteConfig) -> Self {
        Self {
            favicon: site.favicon.clone(),
            logo: site.logo.clone(),
            logo_dark: site.logo_dark.clone(),
            style: site.style.clone(),
        }
    }
}

/// Where the homepage came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Homepage {
    Existing(String),
    Generated(String),
}

impl Homepage {
    pub fn file(&self) -> &str {
        match self {
            Self::Existing(file) | Self::Generated(file) => file,
        }
    }
}

/// Scan `dir`, write `dir/<config.output>` and return the manifest.
///
/// May also write a placeholder `index.md` when no homepage exists.
pub fn generate(dir: &Path, config: &ManifestConfig) -> Result<Manifest> {
    if !dir.is_dir() {
        bail!("manifest directory does not exist: {}", dir.display());
    }

    let name = project_name(dir, config);
    let title = config
        .title
        .clone()
        .unwrap_or_else(|| prettify_folder_name(&name));

    let sections = toc::scan_projects(dir, config)?;
    let homepage = find_or_create_homepage(dir, &title, config)?;
    if let Homepage::Generated(file) = &homepage {
        log!("manifest"; "generated placeholder homepage {file}");
    }

    let mut entries = Vec::with_capacity(sections.len() + 1);
    entries.push(TocEntry::titled_file(homepage.file(), "Home"));
    entries.extend(sections);

    let manifest = Manifest {
        version: 1,
        project: Project {
            id: config
                .id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            description: config
                .description
                .clone()
                .unwrap_or_else(|| format!("Research data from {title}")),
            title,
            open_access: config.open_access,
            license: config.license.clone(),
            toc: entries,
        },
        site: Site {
            template: config.template.clone(),
            options: SiteOptions::from(&config.site),
        },
    };

    let path = dir.join(&config.output);
    let yaml = serde_yaml_ng::to_string(&manifest).context("failed to serialize manifest")?;
    fs::write(&path, yaml).with_context(|| format!("failed to write {}", path.display()))?;
    log!("manifest"; "wrote {}", path.display());
    debug!("manifest"; "{} top-level toc entries", manifest.project.toc.len());

    Ok(manifest)
}

/// Configured name, else the directory name without configured suffixes.
pub fn project_name(dir: &Path, config: &ManifestConfig) -> String {
    if let Some(name) = &config.name {
        return name.clone();
    }
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    config.project_name(&dir_name)
}

/// Root intro file, else the first project README, else a generated `index.md`.
pub fn find_or_create_homepage(dir: &Path, title: &str, config: &ManifestConfig) -> Result<Homepage> {
    for candidate in HOMEPAGE_CANDIDATES {
        if dir.join(candidate).is_file() {
            return Ok(Homepage::Existing((*candidate).to_string()));
        }
    }

    for project in toc::project_folders(dir, config)? {
        if project.join("README.md").is_file()
            && let Some(name) = project.file_name()
        {
            return Ok(Homepage::Existing(format!(
                "{}/README.md",
                name.to_string_lossy()
            )));
        }
    }

    let placeholder = "index.md";
    let content = format!("# {title}\n\nResearch data and documentation from {title}.\n");
    let path = dir.join(placeholder);
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(Homepage::Generated(placeholder.to_string()))
}
