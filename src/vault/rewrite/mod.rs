//! Markdown content rewriting.
//!
//! A document goes through five phases in fixed order:
//!
//! ```text
//! isolate ─► vendor ─► standard links ─► embeds ─► typography
//! ```
//!
//! Isolation must see the raw `![[...]]` tokens before the embed phase turns
//! them into `![](...)`, and typography runs last so it never sees a path it
//! could corrupt before links are final.
//!
//! Fenced code blocks are split off first and copied through untouched; the
//! phases only ever see prose.

mod embed;
mod isolate;
mod standard;
mod typography;
mod vendor;

#[cfg(test)]
mod tests;

use std::sync::LazyLock;

use regex::Regex;

pub use embed::convert_embeds;
pub use isolate::isolate_embeds;
pub use standard::sanitize_links;
pub use typography::fix_typography;
pub use vendor::VendorRules;

use super::diagnostic::Diagnostics;
use super::index::FileIndex;
use super::resolve::{ImageSet, Resolver};
use super::sanitize::SanitizedPath;
use crate::config::{ConfigError, RewriteConfig};

/// `![[reference]]`, group 1 is the reference.
pub(super) static EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\[\]\n]+)\]\]").unwrap());

/// Immutable rewrite settings shared by every document of a run.
#[derive(Debug, Clone)]
pub struct Rewriter {
    images: ImageSet,
    vendor: VendorRules,
    typography: bool,
}

impl Rewriter {
    pub fn new(config: &RewriteConfig) -> Result<Self, ConfigError> {
        if config.image_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "[rewrite.image_extensions] must not be empty".into(),
            ));
        }
        Ok(Self {
            images: ImageSet::new(&config.image_extensions),
            vendor: VendorRules::new(&config.vendor_folders, &config.attachments)?,
            typography: config.typography,
        })
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    /// Rewrite one document located at `doc` (root-relative, sanitized).
    pub fn rewrite(
        &self,
        content: &str,
        doc: &SanitizedPath,
        index: &FileIndex,
        diagnostics: &Diagnostics,
    ) -> String {
        let resolver = Resolver::new(index, &self.images, diagnostics);

        let mut out = String::with_capacity(content.len() + 16);
        for segment in split_fenced(content) {
            match segment {
                Segment::Fenced(block) => out.push_str(block),
                Segment::Prose(prose) => {
                    out.push_str(&self.rewrite_prose(prose, doc, index, &resolver));
                }
            }
        }
        out
    }

    fn rewrite_prose(
        &self,
        text: &str,
        doc: &SanitizedPath,
        index: &FileIndex,
        resolver: &Resolver<'_>,
    ) -> String {
        let text = isolate_embeds(text, &self.images);
        let text = self.vendor.apply(&text);
        let text = sanitize_links(&text, doc, index);
        let text = convert_embeds(&text, resolver, doc);

        if self.typography {
            fix_typography(&text)
        } else {
            text
        }
    }
}

// ============================================================================
// fenced code blocks
// ============================================================================

/// A run of document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Segment<'a> {
    Prose(&'a str),
    /// A fenced code block including both fence lines. An unclosed fence
    /// runs to the end of the document.
    Fenced(&'a str),
}

/// Split `text` into prose and fenced code blocks, in order.
///
/// A fence is a line starting (after indentation) with ` ``` ` or `~~~`,
/// closed only by a fence of the same character.
pub(super) fn split_fenced(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut open: Option<(char, usize)> = None;
    let mut prose_start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        match (open, fence_marker(line)) {
            (None, Some(marker)) => {
                if line_start > prose_start {
                    segments.push(Segment::Prose(&text[prose_start..line_start]));
                }
                open = Some((marker, line_start));
            }
            (Some((marker, start)), Some(m)) if m == marker => {
                segments.push(Segment::Fenced(&text[start..offset]));
                open = None;
                prose_start = offset;
            }
            _ => {}
        }
    }

    match open {
        Some((_, start)) => segments.push(Segment::Fenced(&text[start..])),
        None if prose_start < text.len() => segments.push(Segment::Prose(&text[prose_start..])),
        None => {}
    }
    segments
}

/// Fence character when `line` opens or closes a fenced code block.
fn fence_marker(line: &str) -> Option<char> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
        Some('`')
    } else if trimmed.starts_with("~~~") {
        Some('~')
    } else {
        None
    }
}
