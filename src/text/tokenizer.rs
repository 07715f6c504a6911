//! Bag-of-words extraction

use crate::text::StopWordSet;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximal runs of Unicode word characters
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Turns raw text into a bag of words
///
/// Each `\w+` run is lowercased and kept if it has not been seen before and
/// is not a stop word. Output is in first-occurrence order.
///
/// # Example
///
/// ```
/// use wiki_backlinks::text::{tokenize, StopWordSet};
///
/// let words = tokenize("Cat cat dog CAT", &StopWordSet::empty());
/// assert_eq!(words, vec!["cat", "dog"]);
/// ```
pub fn tokenize(text: &str, stop_words: &StopWordSet) -> Vec<String> {
    let mut bag = Vec::new();

    if text.trim().is_empty() {
        return bag;
    }

    let mut seen = HashSet::new();
    for found in WORD_RE.find_iter(text) {
        let word = found.as_str().to_lowercase();

        if stop_words.contains(&word) || seen.contains(&word) {
            continue;
        }

        seen.insert(word.clone());
        bag.push(word);
    }

    bag
}
