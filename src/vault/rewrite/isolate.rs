//! Phase 1: block isolation of image embeds.
//!
//! `text![[img.png]]` renders the image inline (or not at all) downstream.
//! A blank line before the embed makes it a block of its own.

use super::EMBED;
use crate::vault::resolve::ImageSet;

/// Insert `\n\n` before every image embed directly preceded by non-whitespace.
pub fn isolate_embeds(text: &str, images: &ImageSet) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;

    for caps in EMBED.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let reference = caps.get(1).map_or("", |m| m.as_str());
        let target = reference.split(['|', '#']).next().unwrap_or(reference);

        let glued = text[..whole.start()]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_whitespace());

        if glued && images.is_image(target.trim()) {
            out.push_str(&text[last..whole.start()]);
            out.push_str("\n\n");
            last = whole.start();
        }
    }

    out.push_str(&text[last..]);
    out
}
