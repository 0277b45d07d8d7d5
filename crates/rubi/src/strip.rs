//! Removal of pre-existing annotation markup.
//!
//! Turns `<ruby>食<rt>た</rt></ruby>べる` and `食(た)べる` style input back
//! into plain `食べる` so the engine can re-annotate from a clean slate.
//! Every kanji character survives in its original relative position.

use crate::{
    hints::parse_hint,
    script::{is_iteration_mark, is_kanji},
};

const RUBY_OPEN: &str = "<ruby>";
const RT_OPEN: &str = "<rt";
const RUBY_CLOSE: &str = "</rt></ruby>";

/// Removes existing ruby markup and parenthesized reading hints,
/// keeping the base text of each.
pub fn strip_existing(source: &str) -> String {
    strip_parenthesized(&strip_ruby(source))
}

/// Replaces each `<ruby>BASE<rt>...</rt></ruby>` with BASE. The reading may
/// carry attributes or nested tags; the match is non-greedy on both sides.
/// Markup that never closes is left untouched.
fn strip_ruby(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find(RUBY_OPEN) {
        let after_open = &rest[start + RUBY_OPEN.len()..];
        let base_and_rest = after_open.find(RT_OPEN).and_then(|rt| {
            let after_rt = &after_open[rt..];
            after_rt
                .find(RUBY_CLOSE)
                .map(|close| (&after_open[..rt], &after_rt[close + RUBY_CLOSE.len()..]))
        });
        match base_and_rest {
            Some((base, after)) => {
                out.push_str(&rest[..start]);
                // the base may itself be wrapped in <rb> tags
                out.push_str(&base.replace("<rb>", "").replace("</rb>", ""));
                rest = after;
            }
            None => {
                out.push_str(&rest[..start + RUBY_OPEN.len()]);
                rest = &rest[start + RUBY_OPEN.len()..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_strippable_base(c: char) -> bool {
    // compatibility ideographs can appear in the base of existing annotations
    is_kanji(c) || is_iteration_mark(c) || ('\u{F900}'..='\u{FAFF}').contains(&c)
}

/// Replaces each `漢字(かな)` pattern with the kanji run alone.
fn strip_parenthesized(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut idx = 0;
    while let Some(c) = source[idx..].chars().next() {
        if is_strippable_base(c) {
            if let Some(parsed) = parse_hint(&source[idx..], is_strippable_base) {
                out.push_str(parsed.base);
                idx += parsed.len;
                continue;
            }
        }
        out.push(c);
        idx += c.len_utf8();
    }
    out
}
