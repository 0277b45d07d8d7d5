//! Okurigana alignment.
//!
//! Splits a surface form into its kana prefix, kanji core and kana suffix,
//! and strips the matching kana off both ends of a whole-surface reading so
//! that only the part the core actually needs remains.

use crate::kana::{is_kana, katakana_to_hiragana};

/// The decomposition of a surface form around its kanji core.
///
/// `prefix`, `core` and `suffix` are consecutive slices of the surface, so
/// concatenating them always reproduces the surface exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<'a> {
    pub prefix: &'a str,
    pub core: &'a str,
    pub suffix: &'a str,
    /// The reading with the prefix and suffix kana stripped off.
    pub reading: String,
}

impl Alignment<'_> {
    /// Whether there is a kanji core with a reading left to annotate.
    /// When false, callers must pass the surface through unannotated.
    pub fn is_annotatable(&self) -> bool {
        !self.core.is_empty() && !self.reading.is_empty()
    }
}

/// Aligns a hiragana reading for the whole surface against the surface's
/// kana edges.
///
/// If the reading does not actually start or end with the corresponding kana
/// edge, that edge is left unstripped; a reading that is fully consumed this
/// way comes out empty, signalling that alignment failed.
pub fn align_okurigana<'a>(surface: &'a str, reading_hira: &str) -> Alignment<'a> {
    let mut prefix_end = 0;
    for c in surface.chars() {
        if !is_kana(c) {
            break;
        }
        prefix_end += c.len_utf8();
    }
    let prefix = &surface[..prefix_end];
    let rest = &surface[prefix_end..];

    let mut suffix_start = rest.len();
    for c in rest.chars().rev() {
        if !is_kana(c) {
            break;
        }
        suffix_start -= c.len_utf8();
    }
    let core = &rest[..suffix_start];
    let suffix = &rest[suffix_start..];

    let mut reading = reading_hira;
    let prefix_hira = katakana_to_hiragana(prefix);
    if let Some(stripped) = reading.strip_prefix(prefix_hira.as_str()) {
        reading = stripped;
    }
    let suffix_hira = katakana_to_hiragana(suffix);
    if let Some(stripped) = reading.strip_suffix(suffix_hira.as_str()) {
        reading = stripped;
    }

    Alignment {
        prefix,
        core,
        suffix,
        reading: reading.to_string(),
    }
}
