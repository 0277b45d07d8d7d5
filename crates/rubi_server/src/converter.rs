//! Kakasi-backed fallback reading converter.

use rubi_core::tokenizer::ReadingConverter;

/// Derives best-effort hiragana readings from kakasi's built-in dictionary
/// for text the tokenizer could not resolve.
pub struct KakasiConverter;

impl ReadingConverter for KakasiConverter {
    fn reading(&self, text: &str) -> Option<String> {
        let converted = kakasi::convert(text).hiragana;
        // kakasi returns the input unchanged when it has no reading for it
        if converted.is_empty() || converted == text {
            None
        } else {
            Some(converted)
        }
    }
}
