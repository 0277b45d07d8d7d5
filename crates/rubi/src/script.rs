//! Script classification: kanji detection and Japanese run segmentation.

use crate::kana::is_kana;
use std::ops::Range;

/// Whether the character is a CJK unified ideograph (including extension A).
pub fn is_kanji(c: char) -> bool {
    ('\u{3400}'..='\u{9FFF}').contains(&c)
}

pub fn has_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

/// The kanji iteration marks 々 and 〻.
pub fn is_iteration_mark(c: char) -> bool {
    c == '々' || c == '〻'
}

fn is_japanese(c: char) -> bool {
    is_kanji(c) || is_kana(c) || is_iteration_mark(c)
}

/// An Iterator over the maximal runs of Japanese script in a string, in order.
///
/// Yields each run together with its byte range; characters between runs
/// (whitespace, ASCII, punctuation) are never part of any run.
#[derive(Debug, Clone)]
pub struct JapaneseRuns<'a> {
    idx: usize,
    s: &'a str,
}

impl<'a> JapaneseRuns<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { idx: 0, s }
    }
}

impl<'a> Iterator for JapaneseRuns<'a> {
    type Item = (Range<usize>, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        // scroll past non-Japanese characters
        for c in self.s[self.idx..].chars() {
            if is_japanese(c) {
                break;
            }
            self.idx += c.len_utf8();
        }

        let start = self.idx;
        for c in self.s[self.idx..].chars() {
            if !is_japanese(c) {
                break;
            }
            self.idx += c.len_utf8();
        }
        if self.idx == start {
            return None;
        }
        Some((start..self.idx, &self.s[start..self.idx]))
    }
}
