use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Furigana<'a> {
    /// The raw text to annotate.
    pub text: Cow<'a, str>,
    /// When true (the default), kana-only text is left unannotated.
    #[serde(default = "default_skip_kana")]
    pub skip_kana: bool,
}

fn default_skip_kana() -> bool {
    true
}
