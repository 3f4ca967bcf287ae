//! Display names for folders.

/// Turn a folder name into a display title.
///
/// Leading digits and underscores are dropped, `_` becomes a space and
/// every alphabetic run is title-cased.
///
/// # Examples
///
/// - `1_ELN` -> `Eln`
/// - `02_curated_datasets` -> `Curated Datasets`
/// - `research_biology_md` -> `Research Biology Md`
pub fn prettify_folder_name(name: &str) -> String {
    let trimmed = name.trim_start_matches(|c: char| c.is_ascii_digit() || c == '_');

    let mut out = String::with_capacity(trimmed.len());
    let mut in_word = false;
    for c in trimmed.chars() {
        if c == '_' {
            out.push(' ');
            in_word = false;
        } else if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
