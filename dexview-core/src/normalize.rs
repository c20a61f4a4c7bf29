//! Identifier normalization: turning loose natural-language identifiers into keys.
//!
//! Every function here is total. Malformed input produces a best-effort string,
//! possibly empty, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regional-form adjectives and their canonical region key.
pub const REGION_SYNONYMS: &[(&str, &str)] = &[
    ("alola", "alola"),
    ("alolan", "alola"),
    ("galar", "galar"),
    ("galarian", "galar"),
    ("hisui", "hisui"),
    ("hisuian", "hisui"),
    ("paldea", "paldea"),
    ("paldean", "paldea"),
    ("kanto", "kanto"),
    ("kantonian", "kanto"),
];

static MEGA_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"mega\s*=\s*true").expect("mega flag pattern is valid"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Canonical region key for a token, if it names a region.
#[must_use]
pub fn region_for(token: &str) -> Option<&'static str> {
    REGION_SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, region)| *region)
}

/// Lower-case and drop every character outside `[a-z0-9]`.
#[must_use]
pub fn compact_key(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Lower-case, trim, remove `mega = true` annotations and collapse whitespace.
#[must_use]
pub fn strip_annotations(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = MEGA_FLAG.replace_all(lowered.trim(), "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Split on runs of non-alphanumeric characters, dropping empty tokens.
#[must_use]
pub fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Human-readable item name: the segment after the first `:` with `_` as spaces.
///
/// `cobblemon:oval_stone` becomes `oval stone`.
#[must_use]
pub fn item_display_name(item_id: &str) -> String {
    let mut parts = item_id.split(':');
    let first = parts.next().unwrap_or_default();
    parts.next().unwrap_or(first).replace('_', " ")
}

/// Collapse a hierarchical biome key onto the leaf tag used by the biome index.
///
/// `mod:path/to/tag` becomes `mod:tag`. Keys without a namespace keep only their
/// final path segment.
#[must_use]
pub fn canonical_biome_tag(key: &str) -> String {
    match key.split_once(':') {
        Some((namespace, path)) => {
            let leaf = path.rsplit('/').next().unwrap_or(path);
            format!("{namespace}:{leaf}")
        }
        None => key.rsplit('/').next().unwrap_or(key).to_string(),
    }
}

/// Short label for a biome key: the part after the namespace.
#[must_use]
pub fn biome_short_label(key: &str) -> &str {
    key.split(':').nth(1).unwrap_or(key)
}
