//! Phase 5: typographic fix-up.
//!
//! En dash, em dash and the minus sign become `-`, and bare `@` is escaped
//! as `\@` so downstream renderers do not read it as a citation. Fenced code
//! blocks, inline code spans, link destinations and leftover (unresolved)
//! `![[...]]` tokens are copied through as-is.

use std::sync::LazyLock;

use regex::Regex;

use super::{EMBED, Segment, split_fenced};

static LINK_DEST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\]\([^)\n]*\)").unwrap());

const DASHES: [char; 3] = ['\u{2013}', '\u{2014}', '\u{2212}'];

pub fn fix_typography(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);

    for segment in split_fenced(text) {
        match segment {
            Segment::Fenced(block) => out.push_str(block),
            Segment::Prose(prose) => {
                for line in prose.split_inclusive('\n') {
                    fix_line(line, &mut out);
                }
            }
        }
    }
    out
}

fn fix_line(line: &str, out: &mut String) {
    let mut protected = code_spans(line);
    let others: Vec<_> = LINK_DEST
        .find_iter(line)
        .chain(EMBED.find_iter(line))
        .map(|m| (m.start(), m.end()))
        .collect();
    for (start, end) in others {
        let overlaps = protected.iter().any(|&(s, e)| start < e && s < end);
        if !overlaps {
            protected.push((start, end));
        }
    }
    protected.sort_unstable();

    let mut pos = 0;
    for (start, end) in protected {
        fix_text(line, pos, start, out);
        out.push_str(&line[start..end]);
        pos = end;
    }
    fix_text(line, pos, line.len(), out);
}

/// Fix `line[start..end]`, looking back into `line` for escapes.
fn fix_text(line: &str, start: usize, end: usize, out: &mut String) {
    for (i, c) in line[start..end].char_indices() {
        match c {
            c if DASHES.contains(&c) => out.push('-'),
            '@' if !line[..start + i].ends_with('\\') => out.push_str("\\@"),
            c => out.push(c),
        }
    }
}

/// Byte ranges of inline code spans, including their backtick delimiters.
fn code_spans(line: &str) -> Vec<(usize, usize)> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let run = run_len(bytes, i);
        match find_run(bytes, i + run, run) {
            Some(close) => {
                spans.push((i, close + run));
                i = close + run;
            }
            None => i += run,
        }
    }
    spans
}

fn run_len(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|&&b| b == b'`').count()
}

/// Start of the next backtick run of exactly `len` at or after `from`.
fn find_run(bytes: &[u8], from: usize, len: usize) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() {
        if bytes[j] == b'`' {
            let run = run_len(bytes, j);
            if run == len {
                return Some(j);
            }
            j += run;
        } else {
            j += 1;
        }
    }
    None
}
