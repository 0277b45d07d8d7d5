//! Interfaces for the external morphological analyzer and the optional
//! fallback reading converter.

use serde::{Deserialize, Serialize};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A single unit of tokenizer output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Morpheme {
    /// The morpheme as it appears in the text.
    pub surface: String,
    /// The reading in kana. Empty when the analyzer could not resolve one.
    pub reading: String,
    /// Part-of-speech tags, broadest first (e.g. `["名詞", "固有名詞", ...]`).
    /// May be empty or shorter than two tags for analyzers without usable tags.
    pub part_of_speech: Vec<String>,
}

impl Morpheme {
    pub fn new(
        surface: impl Into<String>,
        reading: impl Into<String>,
        part_of_speech: Vec<String>,
    ) -> Self {
        Self {
            surface: surface.into(),
            reading: reading.into(),
            part_of_speech,
        }
    }
}

/// A morphological analyzer that splits text into morphemes.
///
/// Implementations are initialized once at process start and shared read-only
/// between requests, so they must be safe for concurrent use.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>, BoxError>;
}

/// An optional best-effort converter from kanji-containing text to a kana reading.
///
/// Returning `None` means the converter has no answer; callers must treat
/// that the same as the converter being absent entirely.
pub trait ReadingConverter: Send + Sync {
    fn reading(&self, text: &str) -> Option<String>;
}
