//! Kana classification and normalization.

const KANA_TABLE_DISTANCE: u32 = 'ア' as u32 - 'あ' as u32;

/// Whether the character is in the hiragana or katakana block,
/// including the prolonged sound mark ー.
pub fn is_kana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c) || ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// Replaces every katakana character with its hiragana equivalent,
/// leaving everything else unchanged.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'ァ'..='ヶ' => char::from_u32(c as u32 - KANA_TABLE_DISTANCE).unwrap_or(c),
            _ => c,
        })
        .collect()
}
