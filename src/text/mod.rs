//! Text module for turning page text into a bag of words
//!
//! This module contains:
//! - Stop-word lists keyed by language code
//! - The `\w+` tokenizer with case-insensitive deduplication

mod stopwords;
mod tokenizer;

pub use stopwords::{resolve, StopWordSet, SUPPORTED_LANGUAGES};
pub use tokenizer::tokenize;
