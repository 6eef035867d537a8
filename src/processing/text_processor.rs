//! Text normalization

use regex::Regex;

/// Lowercases text and blanks out everything that is not `a-z` or a space.
///
/// Each offending character becomes exactly one space, so punctuation still
/// separates words: `"skill-set"` gives `"skill set"`, `"C++"` gives `"c  "`.
pub struct TextNormalizer {
    non_letter: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let non_letter = Regex::new(r"[^a-z ]").expect("Invalid normalization regex");
        Self { non_letter }
    }

    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        self.non_letter.replace_all(&lowered, " ").into_owned()
    }

    /// Whitespace-separated words of an already normalized text
    pub fn words(normalized: &str) -> impl Iterator<Item = &str> {
        normalized.split_whitespace()
    }
}
