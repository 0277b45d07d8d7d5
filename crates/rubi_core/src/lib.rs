//! RUBI core types.

pub mod tokenizer;
