// File: src/core/alphabet.rs
use crate::core::types::CharIndex;
use crate::error::ConfigError;
use std::collections::HashMap;

/// Lowercase latin letters plus space. Punctuation and digits are ignored.
/// Special purposes (e-mail addresses, say) may want '@', '.', etc.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz ";

/// The set of characters a classifier recognizes. Characters are stored
/// lowercased, deduplicated and sorted, so a character's index is stable
/// for a given set regardless of the order it was supplied in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    index: HashMap<char, CharIndex>,
}

impl Alphabet {
    pub fn new<I: IntoIterator<Item = char>>(chars: I) -> Result<Self, ConfigError> {
        let chars: Vec<char> = chars.into_iter().flat_map(char::to_lowercase).collect();
        if chars.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self::from_chars(chars))
    }

    fn from_chars(mut chars: Vec<char>) -> Self {
        chars.sort_unstable();
        chars.dedup();
        let index = chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { chars, index }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn index_of(&self, c: char) -> Option<CharIndex> {
        self.index.get(&c).copied()
    }

    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    /// Lowercases `text`, drops every character outside the alphabet and
    /// trims surrounding whitespace. Never fails; idempotent.
    pub fn normalize(&self, text: &str) -> String {
        let filtered: String = text
            .trim()
            .to_lowercase()
            .chars()
            .filter(|&c| self.contains(c))
            .collect();
        filtered.trim().to_string()
    }

    /// Normalizes `text` and maps it to character indices.
    pub fn encode(&self, text: &str) -> Vec<CharIndex> {
        self.normalize(text)
            .chars()
            .filter_map(|c| self.index_of(c))
            .collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::from_chars(DEFAULT_ALPHABET.chars().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_alphabet_is_rejected() {
        let err = Alphabet::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyAlphabet));
    }

    #[test]
    fn default_matches_explicit_construction() {
        let explicit = Alphabet::new(DEFAULT_ALPHABET.chars()).unwrap();
        assert_eq!(Alphabet::default(), explicit);
        assert_eq!(explicit.len(), 27);
    }

    #[test]
    fn indices_do_not_depend_on_input_order() {
        let a = Alphabet::new("cab".chars()).unwrap();
        let b = Alphabet::new("bca".chars()).unwrap();
        assert_eq!(a.chars(), b.chars());
        assert_eq!(a.index_of('a'), Some(0));
        assert_eq!(a.index_of('c'), Some(2));
    }

    #[test]
    fn uppercase_and_duplicate_chars_are_folded() {
        let alphabet = Alphabet::new("AaBb".chars()).unwrap();
        assert_eq!(alphabet.chars(), &['a', 'b']);
    }

    #[test]
    fn normalize_lowercases_and_filters() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.normalize("  Hello, World! 123 "), "hello world");
        assert_eq!(alphabet.normalize(""), "");
        assert_eq!(alphabet.normalize("!!!"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let alphabet = Alphabet::default();
        for s in ["a ! ", "  Mixed CASE, punctuation...  ", "ünïcödé text", "\t\n", "x  y"] {
            let once = alphabet.normalize(s);
            assert_eq!(alphabet.normalize(&once), once, "input {s:?}");
            assert!(once.chars().all(|c| alphabet.contains(c)));
        }
    }

    #[test]
    fn custom_alphabet_keeps_only_its_chars() {
        let alphabet = Alphabet::new("abc@.".chars()).unwrap();
        assert_eq!(alphabet.normalize("Bob@Cab.dev"), "bb@cab.");
    }

    #[test]
    fn encode_yields_indices() {
        let alphabet = Alphabet::new("ab".chars()).unwrap();
        assert_eq!(alphabet.encode("BAx b"), vec![1, 0, 1]);
    }
}
