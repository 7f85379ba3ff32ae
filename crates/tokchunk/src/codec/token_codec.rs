//! # Token Codec

use std::sync::Arc;

use crate::codec::special_policy::{AllowedSpecial, DisallowedSpecial};
use crate::codec::{DecodeMode, EXPECTED_BYTES_PER_TOKEN, PieceSegmentor};
use crate::errors::{Result, TokchunkError};
use crate::merge::{BytePairMerger, RankScanMerger};
use crate::regex::{RegexWrapper, exact_match_union_pattern};
use crate::types::{TCHashSet, TokenType};
use crate::vocab::Vocabulary;

/// The codec between Unicode text and token-id sequences.
///
/// Orchestrates regex pre-splitting, special-token scanning and
/// enforcement, and delegates byte-level merging to a
/// [`BytePairMerger`]. Cheap to share behind an [`Arc`]; all operations
/// take `&self` and the vocabulary is immutable.
pub struct TokenCodec<T: TokenType, M: BytePairMerger<T> = RankScanMerger> {
    vocab: Arc<Vocabulary<T>>,
    segmentor: PieceSegmentor,
    merger: M,

    /// Precompiled union regex over *all* special words, for the common
    /// disallow-all scan.
    all_special_re: Option<RegexWrapper>,
}

impl<T: TokenType> TokenCodec<T> {
    /// Build a codec with the default merge engine.
    ///
    /// ## Arguments
    /// * `vocab` - The shared vocabulary.
    pub fn init(vocab: Arc<Vocabulary<T>>) -> Result<Self> {
        Self::with_merger(vocab, RankScanMerger)
    }
}

impl<T: TokenType, M: BytePairMerger<T>> TokenCodec<T, M> {
    /// Build a codec with an explicit merge engine.
    ///
    /// ## Arguments
    /// * `vocab` - The shared vocabulary.
    /// * `merger` - The byte-pair merge engine.
    pub fn with_merger(
        vocab: Arc<Vocabulary<T>>,
        merger: M,
    ) -> Result<Self> {
        let segmentor = PieceSegmentor::from_vocab(vocab.as_ref(), None)?;

        let all_special_re = match vocab.specials().special_pattern() {
            Some(pattern) => Some(pattern.compile()?),
            None => None,
        };

        Ok(Self {
            vocab,
            segmentor,
            merger,
            all_special_re,
        })
    }

    /// Get the shared vocabulary.
    pub fn vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    /// The number of tokens in the vocabulary.
    pub fn n_vocab(&self) -> usize {
        self.vocab.n_vocab()
    }

    /// The maximum assigned token value.
    pub fn max_token_value(&self) -> T {
        self.vocab.max_token_value()
    }

    /// The end-of-text token, if the vocabulary declares one.
    pub fn eot_token(&self) -> Option<T> {
        self.vocab.eot_token()
    }

    /// The byte values of all ordinary tokens, in lexicographic span order.
    pub fn token_byte_values(&self) -> &[Vec<u8>] {
        self.vocab.sorted_spans()
    }

    fn token_buffer(
        &self,
        text_len: usize,
    ) -> Vec<T> {
        Vec::with_capacity(text_len / EXPECTED_BYTES_PER_TOKEN + 1)
    }

    /// Encode text into tokens, ignoring special tokens.
    ///
    /// Every special word in the text is regex-split and merged like any
    /// other text.
    pub fn encode_ordinary(
        &self,
        text: &str,
    ) -> Result<Vec<T>> {
        let mut tokens = self.token_buffer(text.len());
        self.encode_ordinary_append(text, &mut tokens)?;
        Ok(tokens)
    }

    /// Encode raw bytes into tokens, ignoring special tokens.
    ///
    /// Invalid UTF-8 input is lossily re-encoded (replacement characters
    /// stand in for the unencodable sequences) and retried once; this
    /// entry point never fails on malformed input bytes.
    pub fn encode_ordinary_bytes(
        &self,
        bytes: &[u8],
    ) -> Result<Vec<T>> {
        match core::str::from_utf8(bytes) {
            Ok(text) => self.encode_ordinary(text),
            Err(_) => {
                log::debug!(
                    "lossy re-encoding of {} input bytes with invalid UTF-8",
                    bytes.len()
                );
                self.encode_ordinary(&String::from_utf8_lossy(bytes))
            }
        }
    }

    pub(crate) fn encode_ordinary_append(
        &self,
        text: &str,
        out: &mut Vec<T>,
    ) -> Result<()> {
        for range in self.segmentor.piece_ranges(text) {
            self.merger
                .merge_append(&self.vocab, text[range].as_bytes(), out)?;
        }
        Ok(())
    }

    /// Encode text into tokens.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `allowed` - Special words recognized as atomic tokens.
    /// * `disallowed` - Special words rejected if present in `text`;
    ///   under [`DisallowedSpecial::All`] this resolves to every special
    ///   word not in `allowed`.
    ///
    /// ## Returns
    /// The token sequence; [`TokchunkError::DisallowedSpecialToken`] if
    /// the text contains a disallowed special literal. The disallowed
    /// scan runs before any tokenization work.
    pub fn encode(
        &self,
        text: &str,
        allowed: &AllowedSpecial<'_>,
        disallowed: &DisallowedSpecial<'_>,
    ) -> Result<Vec<T>> {
        let (allowed_set, disallowed_set) = self.resolve_special_sets(allowed, disallowed);

        let disallowed_re = self.compile_disallowed(&disallowed_set)?;
        self.scan_disallowed(text, disallowed_re.as_ref())?;

        self.encode_with_sets(text, &allowed_set)
    }

    /// Encode text into tokens, recognizing every special word.
    pub fn encode_with_special_tokens(
        &self,
        text: &str,
    ) -> Result<Vec<T>> {
        self.encode(text, &AllowedSpecial::All, &DisallowedSpecial::None)
    }

    /// Resolve the policy selectors into concrete word sets.
    pub(crate) fn resolve_special_sets<'a>(
        &'a self,
        allowed: &AllowedSpecial<'a>,
        disallowed: &DisallowedSpecial<'a>,
    ) -> (TCHashSet<&'a str>, TCHashSet<&'a str>) {
        let specials = self.vocab.specials();

        let allowed_set: TCHashSet<&str> = match allowed {
            AllowedSpecial::All => specials.words().collect(),
            AllowedSpecial::None => TCHashSet::default(),
            AllowedSpecial::Set(set) => set.iter().copied().collect(),
        };

        let disallowed_set: TCHashSet<&str> = match disallowed {
            DisallowedSpecial::All => specials
                .words()
                .filter(|word| !allowed_set.contains(*word))
                .collect(),
            DisallowedSpecial::None => TCHashSet::default(),
            DisallowedSpecial::Set(set) => set.iter().copied().collect(),
        };

        (allowed_set, disallowed_set)
    }

    /// Compile the union regex for a resolved disallowed set.
    ///
    /// The full-vocabulary set reuses the precompiled regex.
    pub(crate) fn compile_disallowed(
        &self,
        disallowed: &TCHashSet<&str>,
    ) -> Result<Option<RegexWrapper>> {
        if disallowed.is_empty() {
            return Ok(None);
        }

        if disallowed.len() == self.vocab.specials().len() {
            return Ok(self.all_special_re.clone());
        }

        let words = disallowed.iter().copied().collect::<Vec<_>>();
        Ok(Some(exact_match_union_pattern(&words).compile()?))
    }

    /// Scan for the first disallowed special literal in `text`.
    pub(crate) fn scan_disallowed(
        &self,
        text: &str,
        disallowed_re: Option<&RegexWrapper>,
    ) -> Result<()> {
        if let Some(re) = disallowed_re
            && let Some(range) = re.find_ranges(text).next()
        {
            return Err(TokchunkError::DisallowedSpecialToken {
                token: text[range].to_string(),
            });
        }
        Ok(())
    }

    /// Encode with a resolved allowed-special word set.
    ///
    /// Allowed special words become atomic tokens; the surrounding
    /// ordinary text is merged piece by piece, preserving the original
    /// left-to-right interleaving.
    pub(crate) fn encode_with_sets(
        &self,
        text: &str,
        allowed: &TCHashSet<&str>,
    ) -> Result<Vec<T>> {
        let mut tokens = self.token_buffer(text.len());

        let mut rest = text;
        while let Some(range) = self.segmentor.next_allowed_special(rest, allowed) {
            self.encode_ordinary_append(&rest[..range.start], &mut tokens)?;
            tokens.push(self.vocab.lookup_special(&rest[range.clone()]).unwrap());
            rest = &rest[range.end..];
        }
        self.encode_ordinary_append(rest, &mut tokens)?;

        Ok(tokens)
    }

    /// Encode a single atomic vocabulary entry to its token.
    ///
    /// The input is not regex-split or merged; it must be a mergeable
    /// byte span, or the UTF-8 bytes of a special word.
    pub fn encode_single_token(
        &self,
        bytes: &[u8],
    ) -> Result<T> {
        if let Some(rank) = self.vocab.lookup_rank(bytes) {
            return Ok(rank);
        }

        if let Ok(word) = core::str::from_utf8(bytes)
            && let Some(token) = self.vocab.lookup_special(word)
        {
            return Ok(token);
        }

        Err(TokchunkError::UnknownToken {
            repr: format!("{:?}", String::from_utf8_lossy(bytes)),
        })
    }

    /// Encode a byte sequence without a regex pre-split.
    pub fn encode_single_piece(
        &self,
        bytes: &[u8],
    ) -> Result<Vec<T>> {
        let mut tokens = self.token_buffer(bytes.len());
        self.merger.merge_append(&self.vocab, bytes, &mut tokens)?;
        Ok(tokens)
    }

    /// Encode text into a stable token prefix plus completion candidates.
    ///
    /// The trailing token of an encoding may merge differently if more
    /// text is appended; callers holding a text *prefix* use the
    /// completion candidates to reason about the unstable tail.
    ///
    /// ## Returns
    /// ``(stable_tokens, completions)``; a text ending in an allowed
    /// special word is fully stable and gets no completions.
    pub fn encode_with_unstable(
        &self,
        text: &str,
        allowed: &AllowedSpecial<'_>,
        disallowed: &DisallowedSpecial<'_>,
    ) -> Result<(Vec<T>, Vec<Vec<T>>)> {
        let (allowed_set, disallowed_set) = self.resolve_special_sets(allowed, disallowed);

        let disallowed_re = self.compile_disallowed(&disallowed_set)?;
        self.scan_disallowed(text, disallowed_re.as_ref())?;

        let mut tokens = self.encode_with_sets(text, &allowed_set)?;

        if allowed_set.iter().any(|word| text.ends_with(word)) {
            return Ok((tokens, Vec::new()));
        }

        let Some(last) = tokens.pop() else {
            return Ok((tokens, Vec::new()));
        };

        // `last` came from the merger, so its span is a rank entry and
        // always appears in its own completion set.
        let suffix = self.vocab.token_bytes(&last).unwrap().to_vec();
        let completions = self.merger.suffix_completions(&self.vocab, &suffix);

        Ok((tokens, completions))
    }

    /// Decode tokens into bytes.
    ///
    /// Special tokens decode to their UTF-8 literal; ordinary tokens to
    /// their vocabulary byte span.
    ///
    /// ## Returns
    /// A `Result<Vec<u8>>`; [`TokchunkError::UnknownToken`] if any id has
    /// no byte mapping.
    pub fn decode_bytes(
        &self,
        tokens: &[T],
    ) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(tokens.len() * EXPECTED_BYTES_PER_TOKEN);
        for token in tokens {
            buf.extend_from_slice(self.decode_single_token_bytes(token)?);
        }
        Ok(buf)
    }

    /// Decode a single token into its byte value.
    pub fn decode_single_token_bytes(
        &self,
        token: &T,
    ) -> Result<&[u8]> {
        self.vocab
            .token_bytes(token)
            .ok_or_else(|| TokchunkError::UnknownToken {
                repr: token.to_string(),
            })
    }

    /// Decode tokens into a string.
    ///
    /// ## Arguments
    /// * `tokens` - The tokens to decode.
    /// * `mode` - The UTF-8 error policy; [`DecodeMode::Replace`]
    ///   substitutes U+FFFD and always succeeds.
    pub fn decode(
        &self,
        tokens: &[T],
        mode: DecodeMode,
    ) -> Result<String> {
        let bytes = self.decode_bytes(tokens)?;
        match mode {
            DecodeMode::Strict => String::from_utf8(bytes).map_err(|e| {
                TokchunkError::MalformedUtf8 {
                    valid_up_to: e.utf8_error().valid_up_to(),
                }
            }),
            DecodeMode::Replace => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }

    /// Decode tokens into a string plus per-token character offsets.
    ///
    /// A token whose first byte is a UTF-8 continuation byte belongs to
    /// the character run opened by its predecessor; its offset points at
    /// that shared character. Offsets are non-decreasing.
    pub fn decode_with_offsets(
        &self,
        tokens: &[T],
    ) -> Result<(String, Vec<usize>)> {
        fn is_continuation(b: u8) -> bool {
            (0x80..0xC0).contains(&b)
        }

        let mut buf = Vec::with_capacity(tokens.len() * EXPECTED_BYTES_PER_TOKEN);
        let mut offsets = Vec::with_capacity(tokens.len());
        let mut text_len: usize = 0;

        for token in tokens {
            let span = self.decode_single_token_bytes(token)?;

            if span.first().is_some_and(|&b| is_continuation(b)) {
                offsets.push(text_len.saturating_sub(1));
            } else {
                offsets.push(text_len);
            }
            text_len += span.iter().filter(|&&b| !is_continuation(b)).count();

            buf.extend_from_slice(span);
        }

        let text = String::from_utf8(buf).map_err(|e| TokchunkError::MalformedUtf8 {
            valid_up_to: e.utf8_error().valid_up_to(),
        })?;

        Ok((text, offsets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{check_is_send, check_is_sync};
    use crate::vocab::{RankVocab, SpecialVocab};

    type T = u32;

    const ENDOFTEXT: &str = "<|endoftext|>";

    fn test_codec() -> TokenCodec<T> {
        let vocab = Vocabulary::init(
            "test",
            r"\w+|\s+|[^\w\s]+",
            RankVocab::byte_ordinal().with_str_spans([
                ("he", 256),
                ("ll", 257),
                ("llo", 258),
                ("hello", 259),
                ("wo", 260),
                (" wo", 261),
            ]),
            SpecialVocab::from_words([(ENDOFTEXT, 300), ("<|fim_prefix|>", 301)]),
            None,
        )
        .unwrap();

        TokenCodec::init(Arc::new(vocab)).unwrap()
    }

    #[test]
    fn test_markers() {
        let codec = test_codec();
        check_is_send(&codec);
        check_is_sync(&codec);
    }

    #[test]
    fn test_encode_ordinary_roundtrip() {
        let codec = test_codec();

        let tokens = codec.encode_ordinary("hello world!").unwrap();
        assert_eq!(
            codec.decode(&tokens, DecodeMode::Strict).unwrap(),
            "hello world!"
        );

        // The piece pattern keeps " world" from using the " wo" merge
        // across the piece boundary.
        assert_eq!(tokens[0], 259);
    }

    #[test]
    fn test_minimal_merge_scenario() {
        // ranks {a: 0, b: 1, ab: 2}; "ab" must merge to [2].
        let vocab = Vocabulary::<T>::init(
            "mini",
            r"\w+",
            RankVocab::default().with_str_spans([("a", 0), ("b", 1), ("ab", 2)]),
            SpecialVocab::default(),
            Some(3),
        )
        .unwrap();
        let codec = TokenCodec::init(Arc::new(vocab)).unwrap();

        assert_eq!(codec.encode_ordinary("ab").unwrap(), vec![2]);
        assert_eq!(codec.decode(&[2], DecodeMode::Strict).unwrap(), "ab");
    }

    #[test]
    fn test_encode_ordinary_treats_specials_as_text() {
        let codec = test_codec();

        let tokens = codec.encode_ordinary(ENDOFTEXT).unwrap();
        assert!(!tokens.contains(&300));
        assert_eq!(
            codec.decode(&tokens, DecodeMode::Strict).unwrap(),
            ENDOFTEXT
        );
    }

    #[test]
    fn test_encode_ordinary_bytes_lossy_retry() {
        let codec = test_codec();

        // 0xFF can never appear in UTF-8.
        let tokens = codec.encode_ordinary_bytes(b"hello\xFF").unwrap();
        let text = codec.decode(&tokens, DecodeMode::Strict).unwrap();
        assert_eq!(text, "hello\u{FFFD}");
    }

    #[test]
    fn test_disallowed_special_rejected() {
        let codec = test_codec();
        let text = format!("hello {ENDOFTEXT}");

        let result = codec.encode(
            &text,
            &AllowedSpecial::default(),
            &DisallowedSpecial::default(),
        );
        match result {
            Err(TokchunkError::DisallowedSpecialToken { token }) => {
                assert_eq!(token, ENDOFTEXT);
            }
            other => panic!("expected DisallowedSpecialToken, got {other:?}"),
        }
    }

    #[test]
    fn test_allowed_special_is_atomic() {
        let codec = test_codec();
        let text = format!("hello{ENDOFTEXT} world");

        let tokens = codec
            .encode(
                &text,
                &AllowedSpecial::from_words([ENDOFTEXT]),
                &DisallowedSpecial::default(),
            )
            .unwrap();

        assert_eq!(tokens[0], 259);
        assert_eq!(tokens[1], 300);
        assert_eq!(codec.decode(&tokens, DecodeMode::Strict).unwrap(), text);
    }

    #[test]
    fn test_allowed_all_disallows_nothing() {
        let codec = test_codec();
        let text = format!("{ENDOFTEXT}<|fim_prefix|>");

        let tokens = codec.encode_with_special_tokens(&text).unwrap();
        assert_eq!(tokens, vec![300, 301]);
    }

    #[test]
    fn test_disallowed_set_resolution() {
        let codec = test_codec();

        // Allowed wins over the implicit disallow-all.
        let (allowed, disallowed) = codec.resolve_special_sets(
            &AllowedSpecial::from_words([ENDOFTEXT]),
            &DisallowedSpecial::All,
        );
        assert!(allowed.contains(ENDOFTEXT));
        assert!(!disallowed.contains(ENDOFTEXT));
        assert!(disallowed.contains("<|fim_prefix|>"));

        // An explicit disallow set is taken verbatim.
        let (_, disallowed) = codec.resolve_special_sets(
            &AllowedSpecial::None,
            &DisallowedSpecial::from_words([ENDOFTEXT]),
        );
        assert_eq!(disallowed.len(), 1);
    }

    #[test]
    fn test_encode_single_token() {
        let codec = test_codec();

        assert_eq!(codec.encode_single_token(b"hello").unwrap(), 259);
        assert_eq!(
            codec.encode_single_token(ENDOFTEXT.as_bytes()).unwrap(),
            300
        );
        assert!(matches!(
            codec.encode_single_token(b"hello world"),
            Err(TokchunkError::UnknownToken { .. })
        ));
    }

    #[test]
    fn test_encode_single_piece() {
        let codec = test_codec();

        // No regex split: the " wo" merge is reachable here.
        let tokens = codec.encode_single_piece(b"hello world").unwrap();
        assert!(tokens.contains(&261));
        assert_eq!(
            codec.decode(&tokens, DecodeMode::Strict).unwrap(),
            "hello world"
        );
    }

    #[test]
    fn test_decode_unknown_token() {
        let codec = test_codec();
        assert!(matches!(
            codec.decode_bytes(&[9999]),
            Err(TokchunkError::UnknownToken { .. })
        ));
    }

    #[test]
    fn test_decode_modes() {
        let codec = test_codec();

        // 0xC3 alone is a dangling UTF-8 lead byte.
        let tokens = vec![0xC3];
        assert!(matches!(
            codec.decode(&tokens, DecodeMode::Strict),
            Err(TokchunkError::MalformedUtf8 { .. })
        ));
        assert_eq!(
            codec.decode(&tokens, DecodeMode::Replace).unwrap(),
            "\u{FFFD}"
        );
    }

    #[test]
    fn test_decode_with_offsets() {
        let codec = test_codec();

        let tokens = codec.encode_ordinary("hello world").unwrap();
        let (text, offsets) = codec.decode_with_offsets(&tokens).unwrap();
        assert_eq!(text, "hello world");

        assert_eq!(offsets.len(), tokens.len());
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        assert!(offsets.iter().all(|&o| o <= text.chars().count()));
        assert_eq!(offsets[0], 0);
    }

    #[test]
    fn test_decode_with_offsets_multibyte() {
        let codec = test_codec();

        // "é" is 0xC3 0xA9; as two byte-tokens the continuation token
        // shares the character offset of its lead byte.
        let (text, offsets) = codec.decode_with_offsets(&[0xC3, 0xA9, b'x' as T]).unwrap();
        assert_eq!(text, "éx");
        assert_eq!(offsets, vec![0, 0, 1]);
    }

    #[test]
    fn test_encode_with_unstable() {
        let codec = test_codec();

        let (stable, completions) = codec
            .encode_with_unstable(
                "hello he",
                &AllowedSpecial::default(),
                &DisallowedSpecial::default(),
            )
            .unwrap();

        // The tail "he" is unstable: more text could extend it into
        // "hello" or another merge.
        let tail = codec.encode_ordinary("hello he").unwrap();
        assert_eq!(stable.as_slice(), &tail[..tail.len() - 1]);
        assert!(completions.contains(&vec![256]));
        assert!(completions.contains(&vec![259]));
    }

    #[test]
    fn test_encode_with_unstable_special_tail_is_stable() {
        let codec = test_codec();
        let text = format!("hello{ENDOFTEXT}");

        let (stable, completions) = codec
            .encode_with_unstable(
                &text,
                &AllowedSpecial::All,
                &DisallowedSpecial::default(),
            )
            .unwrap();

        assert_eq!(stable.last(), Some(&300));
        assert!(completions.is_empty());
    }

    #[test]
    fn test_encode_with_unstable_empty() {
        let codec = test_codec();

        let (stable, completions) = codec
            .encode_with_unstable(
                "",
                &AllowedSpecial::default(),
                &DisallowedSpecial::default(),
            )
            .unwrap();
        assert!(stable.is_empty());
        assert!(completions.is_empty());
    }
}
