//! # Mergeable Rank ``{ Vec<u8> -> T }`` Vocabulary

use crate::types::TokenType;
use crate::vocab::vocab_types::SpanTokenMap;

/// The mergeable byte-sequence rank table.
///
/// Lower ranks merge first; ranks are unique.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RankVocab<T: TokenType> {
    /// Map of ``{ Vec<u8> -> T }``.
    span_map: SpanTokenMap<T>,
}

impl<T: TokenType> From<SpanTokenMap<T>> for RankVocab<T> {
    fn from(span_map: SpanTokenMap<T>) -> Self {
        Self::from_map(span_map)
    }
}

impl<T: TokenType> FromIterator<(Vec<u8>, T)> for RankVocab<T> {
    fn from_iter<I: IntoIterator<Item = (Vec<u8>, T)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<T: TokenType> RankVocab<T> {
    /// Create a new rank vocab from a span map.
    pub fn from_map(span_map: SpanTokenMap<T>) -> Self {
        Self { span_map }
    }

    /// Build a rank vocab over all 256 single bytes, rank = byte value.
    ///
    /// Mostly useful for tests; real tables come from
    /// [`crate::vocab::io`] loaders.
    pub fn byte_ordinal() -> Self {
        (0u16..256)
            .map(|b| (vec![b as u8], T::from_u16(b).unwrap()))
            .collect()
    }

    /// The number of mergeable entries in the vocab.
    pub fn len(&self) -> usize {
        self.span_map.len()
    }

    /// Check if the vocab is empty.
    pub fn is_empty(&self) -> bool {
        self.span_map.is_empty()
    }

    /// Return the associated rank for the byte span, if any.
    pub fn lookup_rank(
        &self,
        span: &[u8],
    ) -> Option<T> {
        self.span_map.get(span).copied()
    }

    /// The highest rank in the table, if any.
    pub fn max_token(&self) -> Option<T> {
        self.span_map.values().max().copied()
    }

    /// Iterate over ``(span, rank)`` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&Vec<u8>, &T)> {
        self.span_map.iter()
    }

    /// Iterate over owned ``(span, rank)`` pairs.
    pub fn span_pairs(&self) -> impl Iterator<Item = (Vec<u8>, T)> + '_ {
        self.span_map.iter().map(|(span, &rank)| (span.clone(), rank))
    }

    /// Add a byte span to the vocab.
    pub fn add_span(
        &mut self,
        span: &[u8],
        rank: T,
    ) {
        self.span_map.insert(span.to_vec(), rank);
    }

    /// Extend the vocabulary with the given byte-span words.
    ///
    /// ## Arguments
    /// * `words` - An iterator of word strings and ranks.
    ///
    /// ## Returns
    /// The updated `RankVocab` instance.
    pub fn with_str_spans<W, S>(
        self,
        words: W,
    ) -> Self
    where
        W: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let mut vocab = self;
        for (word, rank) in words {
            vocab.add_span(word.as_ref().as_bytes(), rank);
        }
        vocab
    }
}
