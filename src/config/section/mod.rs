//! Configuration section definitions.
//!
//! Each module corresponds to a section in `vaultstage.toml`:
//!
//! | Module     | TOML Section   | Purpose                                   |
//! |------------|----------------|-------------------------------------------|
//! | `stage`    | `[stage]`      | Source, output, cleaning, excluded dirs   |
//! | `rewrite`  | `[rewrite]`    | Image types, attachments, vendor folders  |
//! | `manifest` | `[manifest]`   | `myst.yml` project, TOC and site options  |

mod manifest;
mod rewrite;
mod stage;

pub use manifest::{ManifestConfig, ManifestSiteConfig};
pub use rewrite::RewriteConfig;
pub use stage::StageSectionConfig;

/// Lab notebook export folders (`Lab Notebook <hex id>/`).
pub const DEFAULT_VENDOR_FOLDERS: &[&str] = &["Lab(?:%20|[ _])Notebook(?:%20|[ _])[0-9a-f]{6,32}/"];

/// Directories never staged.
pub const DEFAULT_STAGE_EXCLUDE: &[&str] = &[
    ".git",
    ".obsidian",
    "node_modules",
    "__pycache__",
    "venv",
    "site-packages",
    ".ipynb_checkpoints",
    "__pypackages__",
];

/// Directories never listed in the table of contents.
pub const DEFAULT_TOC_EXCLUDE: &[&str] = &[
    "venv",
    "node_modules",
    "__pycache__",
    ".git",
    ".obsidian",
    "site-packages",
    ".ipynb_checkpoints",
    "dist-info",
    "__pypackages__",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
