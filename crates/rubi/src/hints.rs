//! Harvesting of user-supplied reading hints.
//!
//! A hint is a kanji run immediately followed by a parenthesized kana run,
//! e.g. `学校(がっこう)` or `学校（ガッコウ）`. Hints must be harvested from
//! the original text before stripping, since stripping removes the
//! parenthesis markup they live in.

use crate::{
    kana::{is_kana, katakana_to_hiragana},
    script::{is_iteration_mark, is_kanji},
};
use std::collections::HashMap;

/// A successfully parsed `base(reading)` pattern at the start of a string.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParsedHint<'a> {
    pub base: &'a str,
    pub reading: &'a str,
    /// Bytes consumed from the start of the input, including the parentheses.
    pub len: usize,
}

/// Tries to parse a base run, optional whitespace, and a parenthesized kana
/// reading at the start of `s`. The base run characters are chosen by
/// `is_base` so that the stripper can widen the class.
pub(crate) fn parse_hint(s: &str, is_base: fn(char) -> bool) -> Option<ParsedHint<'_>> {
    let mut idx = 0;
    for c in s.chars() {
        if !is_base(c) {
            break;
        }
        idx += c.len_utf8();
    }
    if idx == 0 {
        return None;
    }
    let base = &s[..idx];

    for c in s[idx..].chars() {
        if !c.is_whitespace() {
            break;
        }
        idx += c.len_utf8();
    }

    let open = s[idx..].chars().next()?;
    if open != '(' && open != '（' {
        return None;
    }
    idx += open.len_utf8();

    let reading_start = idx;
    for c in s[idx..].chars() {
        if !is_kana(c) {
            break;
        }
        idx += c.len_utf8();
    }
    if idx == reading_start {
        return None;
    }
    let reading = &s[reading_start..idx];

    let close = s[idx..].chars().next()?;
    if close != ')' && close != '）' {
        return None;
    }
    Some(ParsedHint {
        base,
        reading,
        len: idx + close.len_utf8(),
    })
}

fn is_hint_base(c: char) -> bool {
    is_kanji(c) || is_iteration_mark(c)
}

/// Scans the original text for `漢字(かな)` patterns and returns the readings
/// keyed by their kanji runs, normalized to hiragana. When the same run is
/// hinted more than once, the longest reading wins.
pub fn extract_hints(source: &str) -> HashMap<String, String> {
    let mut hints = HashMap::<String, String>::new();
    let mut idx = 0;
    while let Some(c) = source[idx..].chars().next() {
        if is_hint_base(c) {
            if let Some(parsed) = parse_hint(&source[idx..], is_hint_base) {
                let reading = katakana_to_hiragana(parsed.reading);
                let entry = hints.entry(parsed.base.to_string()).or_default();
                if reading.chars().count() > entry.chars().count() {
                    *entry = reading;
                }
                idx += parsed.len;
                continue;
            }
        }
        idx += c.len_utf8();
    }
    hints
}
