//! # Special Words Vocabulary

use crate::regex::{RegexPattern, exact_match_union_pattern};
use crate::types::{TCHashSet, TokenType};
use crate::vocab::vocab_types::SpecialTokenMap;

/// Token vocabulary for reserved special words.
///
/// Special words are atomic: they are never regex-split or merged.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SpecialVocab<T: TokenType> {
    /// The map of special words to tokens.
    word_map: SpecialTokenMap<T>,
}

impl<T: TokenType> From<SpecialTokenMap<T>> for SpecialVocab<T> {
    fn from(word_map: SpecialTokenMap<T>) -> Self {
        Self::from_map(word_map)
    }
}

impl<T: TokenType> SpecialVocab<T> {
    /// Create a new special words vocab.
    pub fn from_map(word_map: SpecialTokenMap<T>) -> Self {
        Self { word_map }
    }

    /// Build a vocab from an iterator of word strings and tokens.
    pub fn from_words<W, S>(words: W) -> Self
    where
        W: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        Self::default().with_special_words(words)
    }

    /// Get the number of special words in the vocab.
    pub fn len(&self) -> usize {
        self.word_map.len()
    }

    /// Check if the vocab is empty.
    pub fn is_empty(&self) -> bool {
        self.word_map.is_empty()
    }

    /// Add a word to the vocab.
    ///
    /// ## Arguments
    /// * `word` - The word string to add.
    /// * `token` - The token value to assign to the word.
    pub fn add_word(
        &mut self,
        word: &str,
        token: T,
    ) {
        self.word_map.insert(word.to_string(), token);
    }

    /// Extend the vocabulary with the given special words.
    ///
    /// ## Arguments
    /// * `words` - An iterator of word strings and tokens.
    ///
    /// ## Returns
    /// The updated `SpecialVocab` instance.
    pub fn with_special_words<W, S>(
        self,
        words: W,
    ) -> Self
    where
        W: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let mut vocab = self;
        for (word, token) in words {
            vocab.add_word(word.as_ref(), token);
        }
        vocab
    }

    /// Return the associated token for the word, if any.
    pub fn lookup_token(
        &self,
        word: &str,
    ) -> Option<T> {
        self.word_map.get(word).copied()
    }

    /// Get the associated word for a token, if any.
    pub fn lookup_word(
        &self,
        token: &T,
    ) -> Option<&str> {
        self.word_map.iter().find_map(|(word, t)| {
            if t == token {
                Some(word.as_str())
            } else {
                None
            }
        })
    }

    /// Iterate over the special word strings.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.word_map.keys().map(String::as_str)
    }

    /// The set of special word strings.
    pub fn word_set(&self) -> TCHashSet<&str> {
        self.words().collect()
    }

    /// Iterate over ``(word, token)`` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> {
        self.word_map.iter().map(|(word, &t)| (word.as_str(), t))
    }

    /// The highest special token id, if any.
    pub fn max_token(&self) -> Option<T> {
        self.word_map.values().max().copied()
    }

    /// Get the regex pattern matching any special word.
    ///
    /// ## Returns
    /// `None` if no special words are present;
    /// and `Some(RegexPattern)` otherwise.
    pub fn special_pattern(&self) -> Option<RegexPattern> {
        if self.is_empty() {
            return None;
        }

        let alts = self.words().collect::<Vec<_>>();
        Some(exact_match_union_pattern(&alts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_vocab() {
        type T = u32;

        let mut vocab: SpecialVocab<T> = SpecialVocab::default();
        assert!(vocab.is_empty());
        assert_eq!(vocab.special_pattern(), None);

        vocab.add_word("<|endoftext|>", 300);
        assert_eq!(vocab.len(), 1);
        assert!(!vocab.is_empty());

        assert_eq!(vocab.lookup_token("<|endoftext|>"), Some(300));
        assert_eq!(vocab.lookup_token("<|missing|>"), None);
        assert_eq!(vocab.lookup_word(&300), Some("<|endoftext|>"));
        assert_eq!(vocab.lookup_word(&301), None);
        assert_eq!(vocab.max_token(), Some(300));

        let rebuild = SpecialVocab::from_words(vocab.iter());
        assert_eq!(rebuild, vocab);
    }

    #[test]
    fn test_special_pattern() {
        type T = u32;

        let vocab = SpecialVocab::<T>::from_words([("<|a|>", 10), ("<|b|>", 11)]);

        let re = vocab.special_pattern().unwrap().compile().unwrap();
        assert_eq!(re.find_ranges("x<|a|>y<|b|>").count(), 2);
    }
}
