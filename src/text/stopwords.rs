//! Stop-word lookup keyed by language code

use std::collections::HashSet;

const COMMON_WORDS_EN: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "I", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when", "make",
    "can", "like", "time", "no", "just", "him", "know", "take", "people", "into", "year",
    "your", "good", "some", "could", "them", "see", "other", "than", "then", "now", "look",
    "only", "come", "its", "over", "think", "also", "back", "after", "use", "two", "how", "our",
    "work", "first", "well", "way", "even", "new", "want", "because", "any", "these", "give",
    "day", "most", "us",
];

const COMMON_WORDS_SV: &[&str] = &[
    "i", "och", "att", "det", "som", "en", "på", "är", "av", "för", "med", "till", "den", "har",
    "de", "inte", "om", "ett", "han", "men", "var", "jag", "sig", "från", "vi", "så", "kan",
    "man", "när", "år", "säger", "hon", "under", "också", "efter", "eller", "nu", "sin", "där",
    "vid", "mot", "ska", "skulle", "kommer", "ut", "får", "finns", "vara", "hade", "alla",
    "andra", "mycket", "än", "här", "då", "sedan", "över", "bara", "in", "blir", "upp", "även",
    "vad", "få", "två", "vill", "ha", "många", "hur", "mer",
];

/// Language codes with a built-in stop-word list
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "sv"];

/// Immutable set of lowercase stop words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Returns the stop words for `language`
    ///
    /// Unknown codes yield an empty set, which means no filtering.
    pub fn resolve(language: &str) -> Self {
        match lookup(language) {
            Some(words) => Self::from_words(words),
            None => Self::empty(),
        }
    }

    /// An empty set (no filtering)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from a custom word list
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            words: words.iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// Whole-token membership test; `token` is expected to be lowercase
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn lookup(language: &str) -> Option<&'static [&'static str]> {
    match language {
        "en" => Some(COMMON_WORDS_EN),
        "sv" => Some(COMMON_WORDS_SV),
        _ => None,
    }
}

/// Convenience wrapper around [`StopWordSet::resolve`]
pub fn resolve(language: &str) -> StopWordSet {
    StopWordSet::resolve(language)
}
