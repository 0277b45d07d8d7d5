//! Lindera-backed implementation of the tokenizer interface.

use lindera::{
    dictionary::{load_dictionary_from_kind, DictionaryKind},
    mode::Mode,
    segmenter::Segmenter,
    tokenizer::Tokenizer as Lindera,
};
use rubi_core::tokenizer::{BoxError, Morpheme, Tokenizer};

// IPADIC feature layout: part-of-speech tags at 0..=3, katakana reading at 7
const POS_DETAILS: usize = 4;
const READING_DETAIL: usize = 7;

/// Morphological analyzer backed by lindera and its embedded IPADIC dictionary.
pub struct LinderaTokenizer {
    inner: Lindera,
}

impl LinderaTokenizer {
    pub fn new() -> Result<Self, BoxError> {
        let dictionary = load_dictionary_from_kind(DictionaryKind::IPADIC)?;
        let segmenter = Segmenter::new(Mode::Normal, dictionary, None);
        Ok(Self {
            inner: Lindera::new(segmenter),
        })
    }
}

impl Tokenizer for LinderaTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>, BoxError> {
        let mut tokens = self.inner.tokenize(text)?;
        let mut morphemes = Vec::with_capacity(tokens.len());
        for token in tokens.iter_mut() {
            let surface = token.text.to_string();
            let details = token.details();
            let reading = details
                .get(READING_DETAIL)
                .copied()
                .filter(|reading| *reading != "*")
                .unwrap_or_default();
            let part_of_speech = details
                .iter()
                .take(POS_DETAILS)
                .filter(|tag| **tag != "*")
                .map(|tag| tag.to_string())
                .collect();
            morphemes.push(Morpheme::new(surface, reading, part_of_speech));
        }
        Ok(morphemes)
    }
}
