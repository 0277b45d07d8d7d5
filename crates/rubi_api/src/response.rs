use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Furigana {
    /// The annotated text.
    pub html: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Error {
    pub message: String,
}
