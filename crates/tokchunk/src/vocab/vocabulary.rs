//! # Unified Vocabulary

use crate::errors::{Result, TokchunkError};
use crate::regex::RegexPattern;
use crate::types::TokenType;
use crate::vocab::rank_vocab::RankVocab;
use crate::vocab::special_vocab::SpecialVocab;
use crate::vocab::vocab_types::TokenSpanMap;

/// The well-known end-of-text special word.
pub const ENDOFTEXT: &str = "<|endoftext|>";

/// Immutable vocabulary: rank table + special words + piece pattern.
///
/// Constructed once at startup and shared read-only (via
/// [`std::sync::Arc`]) across all concurrent operations.
#[derive(Debug, Clone)]
pub struct Vocabulary<T: TokenType> {
    /// The encoding name, e.g. ``"o200k_base"``.
    name: String,

    /// The piece pre-split pattern.
    ///
    /// Pieces are never merged across pattern boundaries.
    pattern: RegexPattern,

    /// The mergeable byte-sequence rank table.
    ranks: RankVocab<T>,

    /// The special word table; ids disjoint from the ranks.
    specials: SpecialVocab<T>,

    /// Combined inverse map; special words decode to their UTF-8 bytes.
    decoder: TokenSpanMap<T>,

    /// Lexicographically sorted rank spans, for suffix completion search.
    sorted_spans: Vec<Vec<u8>>,

    /// ``max(max rank, max special id)``.
    max_token_value: T,
}

impl<T: TokenType> Vocabulary<T> {
    /// Initialize a [`Vocabulary`].
    ///
    /// ## Arguments
    /// * `name` - The encoding name.
    /// * `pattern` - The piece pre-split pattern.
    /// * `ranks` - The mergeable rank table.
    /// * `specials` - The special word table.
    /// * `explicit_n_vocab` - Optional declared vocabulary size.
    ///
    /// ## Returns
    /// A `Result<Vocabulary>`, with [`TokchunkError::VocabConflict`] errors on:
    /// * an empty rank table;
    /// * a special id colliding with a rank;
    /// * duplicate spans in the rank table (lossy inversion);
    /// * `explicit_n_vocab` disagreeing with the table sizes.
    pub fn init<P>(
        name: &str,
        pattern: P,
        ranks: RankVocab<T>,
        specials: SpecialVocab<T>,
        explicit_n_vocab: Option<usize>,
    ) -> Result<Self>
    where
        P: Into<RegexPattern>,
    {
        if ranks.is_empty() {
            return Err(TokchunkError::VocabConflict(
                "empty mergeable rank table".to_string(),
            ));
        }

        let mut decoder: TokenSpanMap<T> = ranks
            .iter()
            .map(|(span, &rank)| (rank, span.clone()))
            .collect();

        if decoder.len() != ranks.len() {
            return Err(TokchunkError::VocabConflict(
                "rank table contains duplicate ranks".to_string(),
            ));
        }

        for (word, token) in specials.iter() {
            if decoder.contains_key(&token) {
                return Err(TokchunkError::VocabConflict(format!(
                    "special token {word:?} -> ({token}) collides with a rank"
                )));
            }
            decoder.insert(token, word.as_bytes().to_vec());
        }

        let max_token_value = decoder.keys().max().copied().unwrap();

        if let Some(n_vocab) = explicit_n_vocab {
            if ranks.len() + specials.len() != n_vocab {
                return Err(TokchunkError::VocabConflict(format!(
                    "explicit vocab size {n_vocab} != {} ranks + {} specials",
                    ranks.len(),
                    specials.len(),
                )));
            }
            if max_token_value.to_usize() != Some(n_vocab - 1) {
                return Err(TokchunkError::VocabConflict(format!(
                    "max token value {max_token_value} != explicit vocab size {n_vocab} - 1"
                )));
            }
        }

        let mut sorted_spans: Vec<Vec<u8>> = ranks.iter().map(|(span, _)| span.clone()).collect();
        sorted_spans.sort();

        Ok(Self {
            name: name.to_string(),
            pattern: pattern.into(),
            ranks,
            specials,
            decoder,
            sorted_spans,
            max_token_value,
        })
    }

    /// Get the encoding name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the piece pre-split pattern.
    pub fn pattern(&self) -> &RegexPattern {
        &self.pattern
    }

    /// Get the mergeable rank table.
    pub fn ranks(&self) -> &RankVocab<T> {
        &self.ranks
    }

    /// Get the special word table.
    pub fn specials(&self) -> &SpecialVocab<T> {
        &self.specials
    }

    /// The maximum assigned token value.
    pub fn max_token_value(&self) -> T {
        self.max_token_value
    }

    /// The number of tokens in the vocabulary, ``max_token_value + 1``.
    pub fn n_vocab(&self) -> usize {
        self.max_token_value.to_usize().unwrap() + 1
    }

    /// The end-of-text token, if the vocabulary declares one.
    pub fn eot_token(&self) -> Option<T> {
        self.specials.lookup_token(ENDOFTEXT)
    }

    /// Return the associated rank for a mergeable byte span, if any.
    pub fn lookup_rank(
        &self,
        span: &[u8],
    ) -> Option<T> {
        self.ranks.lookup_rank(span)
    }

    /// Return the associated token for a special word, if any.
    pub fn lookup_special(
        &self,
        word: &str,
    ) -> Option<T> {
        self.specials.lookup_token(word)
    }

    /// Get the byte value of a token, special or ordinary.
    pub fn token_bytes(
        &self,
        token: &T,
    ) -> Option<&[u8]> {
        self.decoder.get(token).map(Vec::as_slice)
    }

    /// The byte values of all tokens, in lexicographic span order.
    ///
    /// Special words are not included.
    pub fn sorted_spans(&self) -> &[Vec<u8>] {
        &self.sorted_spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_vocab() -> Vocabulary<u32> {
        Vocabulary::init(
            "test",
            r"\w+|\s+",
            RankVocab::byte_ordinal().with_str_spans([("ab", 256), ("abc", 257)]),
            SpecialVocab::from_words([(ENDOFTEXT, 258)]),
            Some(259),
        )
        .unwrap()
    }

    #[test]
    fn test_init() {
        let vocab = small_vocab();

        assert_eq!(vocab.name(), "test");
        assert_eq!(vocab.max_token_value(), 258);
        assert_eq!(vocab.n_vocab(), 259);
        assert_eq!(vocab.eot_token(), Some(258));

        assert_eq!(vocab.lookup_rank(b"ab"), Some(256));
        assert_eq!(vocab.lookup_rank(b"<|endoftext|>"), None);
        assert_eq!(vocab.lookup_special("<|endoftext|>"), Some(258));

        assert_eq!(vocab.token_bytes(&256), Some(b"ab".as_slice()));
        assert_eq!(vocab.token_bytes(&258), Some(b"<|endoftext|>".as_slice()));
        assert_eq!(vocab.token_bytes(&259), None);
    }

    #[test]
    fn test_sorted_spans() {
        let vocab = small_vocab();
        let spans = vocab.sorted_spans();

        assert_eq!(spans.len(), 258);
        assert!(spans.windows(2).all(|w| w[0] < w[1]));

        // "ab" sorts immediately before "abc".
        let at = spans.partition_point(|s| s.as_slice() < b"ab".as_slice());
        assert_eq!(&spans[at], b"ab");
        assert_eq!(&spans[at + 1], b"abc");
    }

    #[test]
    fn test_explicit_n_vocab_conflict() {
        let result = Vocabulary::<u32>::init(
            "test",
            r"\w+",
            RankVocab::byte_ordinal(),
            SpecialVocab::from_words([(ENDOFTEXT, 300)]),
            Some(257),
        );
        assert!(matches!(result, Err(TokchunkError::VocabConflict(_))));
    }

    #[test]
    fn test_special_rank_collision() {
        let result = Vocabulary::<u32>::init(
            "test",
            r"\w+",
            RankVocab::byte_ordinal(),
            SpecialVocab::from_words([("<|zero|>", 0)]),
            None,
        );
        assert!(matches!(result, Err(TokchunkError::VocabConflict(_))));
    }
}
