//! Phase 4: `![[reference]]` to standard markdown.

use regex::Captures;

use super::EMBED;
use crate::vault::resolve::Resolver;
use crate::vault::sanitize::SanitizedPath;

/// Replace every embed with its rendered form. Unresolved embeds stay as written.
pub fn convert_embeds(text: &str, resolver: &Resolver<'_>, doc: &SanitizedPath) -> String {
    EMBED
        .replace_all(text, |caps: &Captures| resolver.resolve(&caps[1], doc).render())
        .into_owned()
}
