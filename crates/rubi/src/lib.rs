//! The RUBI annotation engine.
//!
//! Takes raw text, harvests any `漢字(かな)` reading hints embedded in it,
//! strips pre-existing annotation markup, and rebuilds the text with
//! `<ruby>` markup over every kanji run while reproducing everything else
//! verbatim. Morphological analysis is delegated to an external tokenizer
//! behind the interfaces in [`rubi_core::tokenizer`].

pub mod align;
pub mod annotate;
pub mod hints;
pub mod kana;
pub mod script;
pub mod strip;

pub use annotate::Annotator;
