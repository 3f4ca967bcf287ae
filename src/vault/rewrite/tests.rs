use super::*;
use crate::vault::diagnostic::DiagnosticKind;

struct Vault {
    index: FileIndex,
    diagnostics: Diagnostics,
    rewriter: Rewriter,
}

impl Vault {
    fn new(paths: &[&str]) -> Self {
        Self::with_config(paths, RewriteConfig::default())
    }

    fn with_config(paths: &[&str], config: RewriteConfig) -> Self {
        let diagnostics = Diagnostics::new();
        let index = FileIndex::from_paths(paths.iter().copied(), &diagnostics);
        diagnostics.drain();
        Self {
            index,
            diagnostics,
            rewriter: Rewriter::new(&config).unwrap(),
        }
    }

    fn rewrite(&self, content: &str, doc: &str) -> String {
        self.rewriter
            .rewrite(content, &SanitizedPath::new(doc), &self.index, &self.diagnostics)
    }
}

#[test]
fn test_glued_image_becomes_own_block() {
    let vault = Vault::new(&["img.png", "a.md"]);
    assert_eq!(vault.rewrite("text![[img.png]]", "a.md"), "text\n\n![](img.png)");
}

#[test]
fn test_isolation_sees_raw_embed() {
    // running embed conversion first would leave nothing for isolation to match
    let vault = Vault::new(&["img.png"]);
    let resolver = Resolver::new(&vault.index, vault.rewriter.images(), &vault.diagnostics);
    let doc = SanitizedPath::new("a.md");
    let converted_first = convert_embeds("text![[img.png]]", &resolver, &doc);
    assert_eq!(
        isolate_embeds(&converted_first, vault.rewriter.images()),
        "text![](img.png)"
    );
}

#[test]
fn test_end_to_end_bare_reference() {
    let vault = Vault::new(&["notes/a.md", "assets/diagram.png"]);
    assert_eq!(
        vault.rewrite("See ![[diagram.png]]", "notes/a.md"),
        "See ![](../assets/diagram.png)"
    );
    assert!(vault.diagnostics.is_empty());
}

#[test]
fn test_vendor_export_resolves_into_attachments() {
    let vault = Vault::new(&["attachments/photo.png", "p/notes/day.md"]);
    assert_eq!(
        vault.rewrite("![](Lab%20Notebook%20abc123def/photo.png)", "p/notes/day.md"),
        "![](../../attachments/photo.png)"
    );
    assert_eq!(
        vault.rewrite("![[Lab Notebook abc123def/photo.png]]", "p/notes/day.md"),
        "![](../../attachments/photo.png)"
    );
}

#[test]
fn test_typography_runs_last_and_spares_paths() {
    let vault = Vault::new(&["data/10–20 run.csv", "n.md"]);
    assert_eq!(
        vault.rewrite("range 10–20 @50mT ![[10–20 run.csv]]", "n.md"),
        "range 10-20 \\@50mT [10-20 run.csv](data/10–20_run.csv)"
    );
}

#[test]
fn test_typography_disabled() {
    let config = RewriteConfig {
        typography: false,
        ..RewriteConfig::default()
    };
    let vault = Vault::with_config(&[], config);
    assert_eq!(vault.rewrite("a–b @c", "n.md"), "a–b @c");
}

#[test]
fn test_ambiguous_reported_once_per_embed() {
    let vault = Vault::new(&["a/x.png", "b/x.png"]);
    let out = vault.rewrite("![[x.png]] and ![[x.png]]", "c/doc.md");
    assert_eq!(out, "![](../a/x.png) and ![](../a/x.png)");
    assert_eq!(vault.diagnostics.count(DiagnosticKind::Ambiguous), 2);
}

#[test]
fn test_unresolved_passthrough() {
    let vault = Vault::new(&["a.md"]);
    assert_eq!(vault.rewrite("![[missing.png]]", "a.md"), "![[missing.png]]");
    assert_eq!(vault.diagnostics.count(DiagnosticKind::Unresolved), 1);
}

#[test]
fn test_fenced_code_spared_by_typography() {
    let vault = Vault::new(&["x.png"]);
    let out = vault.rewrite("```\n@a – b\n```\n", "doc.md");
    assert_eq!(out, "```\n@a – b\n```\n");
}

#[test]
fn test_custom_image_extensions() {
    let config = RewriteConfig {
        image_extensions: vec!["tiff".into()],
        ..RewriteConfig::default()
    };
    let vault = Vault::with_config(&["scan.tiff", "plot.png"], config);
    assert_eq!(
        vault.rewrite("![[scan.tiff]] ![[plot.png]]", "doc.md"),
        "![](scan.tiff) [plot.png](plot.png)"
    );
}

#[test]
fn test_empty_image_extensions_rejected() {
    let config = RewriteConfig {
        image_extensions: Vec::new(),
        ..RewriteConfig::default()
    };
    assert!(matches!(Rewriter::new(&config), Err(ConfigError::Validation(_))));
}

#[test]
fn test_unresolved_token_survives_typography() {
    let vault = Vault::new(&["a.md"]);
    assert_eq!(
        vault.rewrite("![[scan 10–20 @2x.png]]", "a.md"),
        "![[scan 10–20 @2x.png]]"
    );
    assert_eq!(vault.diagnostics.count(DiagnosticKind::Unresolved), 1);
}

#[test]
fn test_badge_link_outer_destination_rewritten() {
    let vault = Vault::new(&["x.png", "my file.md", "notes/a.md"]);
    assert_eq!(
        vault.rewrite("[![a](x.png)](my file.md)", "notes/a.md"),
        "[![a](../x.png)](../my_file.md)"
    );
}

#[test]
fn test_fenced_embeds_left_alone() {
    let vault = Vault::new(&["img.png", "doc.md"]);
    let text = "```\nx![[img.png]] [a](my file.md)\n```\nafter![[img.png]]";
    assert_eq!(
        vault.rewrite(text, "doc.md"),
        "```\nx![[img.png]] [a](my file.md)\n```\nafter\n\n![](img.png)"
    );
    assert!(vault.diagnostics.is_empty());
}

#[test]
fn test_split_fenced_segments() {
    let text = "intro\n~~~\n```\ncode\n~~~\nmiddle\n```open\nrest";
    assert_eq!(
        split_fenced(text),
        vec![
            Segment::Prose("intro\n"),
            Segment::Fenced("~~~\n```\ncode\n~~~\n"),
            Segment::Prose("middle\n"),
            Segment::Fenced("```open\nrest"),
        ]
    );
    assert!(split_fenced("").is_empty());
}
