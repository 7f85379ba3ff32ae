//! # Batch Codec
//!
//! Applies single-item codec operations over collections on a bounded
//! worker pool.

use core::num::NonZeroUsize;
use std::sync::Arc;

use rayon::prelude::*;

use crate::codec::{AllowedSpecial, DecodeMode, DisallowedSpecial, TokenCodec};
use crate::errors::{Result, TokchunkError};
use crate::merge::{BytePairMerger, RankScanMerger};
use crate::types::TokenType;

/// The default worker pool size for batch operations.
pub const DEFAULT_BATCH_WORKERS: usize = 8;

/// Batch-level parallel wrapper over a [`TokenCodec`].
///
/// Owns a dedicated fixed-size worker pool. Batch items are independent;
/// output order always matches input order, regardless of per-item
/// completion order. A failure in any one item fails the whole batch
/// call (fail-fast, no partial results).
pub struct BatchCodec<T: TokenType, M: BytePairMerger<T> = RankScanMerger> {
    codec: Arc<TokenCodec<T, M>>,
    pool: rayon::ThreadPool,
}

impl<T: TokenType, M: BytePairMerger<T>> BatchCodec<T, M> {
    /// Create a new batch codec.
    ///
    /// ## Arguments
    /// * `codec` - The shared single-item codec.
    /// * `workers` - The worker pool size; if None,
    ///   [`DEFAULT_BATCH_WORKERS`] is used.
    pub fn init(
        codec: Arc<TokenCodec<T, M>>,
        workers: Option<NonZeroUsize>,
    ) -> Result<Self> {
        let workers = workers.map(NonZeroUsize::get).unwrap_or(DEFAULT_BATCH_WORKERS);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| TokchunkError::WorkerPool(e.to_string()))?;

        Ok(Self { codec, pool })
    }

    /// Get the shared single-item codec.
    pub fn codec(&self) -> &Arc<TokenCodec<T, M>> {
        &self.codec
    }

    /// The worker pool size.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Encode a batch of texts, ignoring special tokens.
    pub fn encode_ordinary_batch<S>(
        &self,
        texts: &[S],
    ) -> Result<Vec<Vec<T>>>
    where
        S: AsRef<str> + Sync,
    {
        self.pool.install(|| {
            texts
                .par_iter()
                .map(|text| self.codec.encode_ordinary(text.as_ref()))
                .collect()
        })
    }

    /// Encode a batch of texts.
    ///
    /// The special-token policy is resolved once, before fan-out; the
    /// disallowed scan runs per item.
    pub fn encode_batch<S>(
        &self,
        texts: &[S],
        allowed: &AllowedSpecial<'_>,
        disallowed: &DisallowedSpecial<'_>,
    ) -> Result<Vec<Vec<T>>>
    where
        S: AsRef<str> + Sync,
    {
        let (allowed_set, disallowed_set) =
            self.codec.resolve_special_sets(allowed, disallowed);
        let disallowed_re = self.codec.compile_disallowed(&disallowed_set)?;

        self.pool.install(|| {
            texts
                .par_iter()
                .map(|text| {
                    let text = text.as_ref();
                    self.codec.scan_disallowed(text, disallowed_re.as_ref())?;
                    self.codec.encode_with_sets(text, &allowed_set)
                })
                .collect()
        })
    }

    /// Decode a batch of token sequences into strings.
    pub fn decode_batch<B>(
        &self,
        batch: &[B],
        mode: DecodeMode,
    ) -> Result<Vec<String>>
    where
        B: AsRef<[T]> + Sync,
    {
        self.pool.install(|| {
            batch
                .par_iter()
                .map(|tokens| self.codec.decode(tokens.as_ref(), mode))
                .collect()
        })
    }

    /// Decode a batch of token sequences into bytes.
    pub fn decode_bytes_batch<B>(
        &self,
        batch: &[B],
    ) -> Result<Vec<Vec<u8>>>
    where
        B: AsRef<[T]> + Sync,
    {
        self.pool.install(|| {
            batch
                .par_iter()
                .map(|tokens| self.codec.decode_bytes(tokens.as_ref()))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{RankVocab, SpecialVocab, Vocabulary};

    type T = u32;

    fn batch_codec(workers: Option<NonZeroUsize>) -> BatchCodec<T> {
        let vocab = Vocabulary::init(
            "test",
            r"\w+|\s+|[^\w\s]+",
            RankVocab::byte_ordinal().with_str_spans([("he", 256), ("ll", 257), ("llo", 258)]),
            SpecialVocab::from_words([("<|endoftext|>", 300)]),
            None,
        )
        .unwrap();

        let codec = Arc::new(TokenCodec::init(Arc::new(vocab)).unwrap());
        BatchCodec::init(codec, workers).unwrap()
    }

    fn sample_texts() -> Vec<String> {
        (0..64)
            .map(|i| format!("hello world {i}, hello again"))
            .collect()
    }

    #[test]
    fn test_default_workers() {
        let batch = batch_codec(None);
        assert_eq!(batch.workers(), DEFAULT_BATCH_WORKERS);
    }

    #[test]
    fn test_batch_order_matches_input_order() {
        let texts = sample_texts();

        for workers in [1, 8, 64] {
            let batch = batch_codec(NonZeroUsize::new(workers));

            let encoded = batch.encode_ordinary_batch(&texts).unwrap();
            assert_eq!(encoded.len(), texts.len());

            for (text, tokens) in texts.iter().zip(encoded.iter()) {
                assert_eq!(tokens, &batch.codec().encode_ordinary(text).unwrap());
            }

            let decoded = batch.decode_batch(&encoded, DecodeMode::Strict).unwrap();
            assert_eq!(&decoded, &texts);

            let byte_batch = batch.decode_bytes_batch(&encoded).unwrap();
            assert_eq!(byte_batch[0], texts[0].as_bytes());
        }
    }

    #[test]
    fn test_encode_batch_specials() {
        let batch = batch_codec(None);
        let texts = vec!["a<|endoftext|>".to_string(), "b".to_string()];

        let encoded = batch
            .encode_batch(
                &texts,
                &AllowedSpecial::All,
                &DisallowedSpecial::default(),
            )
            .unwrap();
        assert_eq!(encoded[0], vec![b'a' as T, 300]);
        assert_eq!(encoded[1], vec![b'b' as T]);
    }

    #[test]
    fn test_batch_failure_is_whole_batch() {
        let batch = batch_codec(None);
        let texts = vec!["fine".to_string(), "bad <|endoftext|>".to_string()];

        let result = batch.encode_batch(
            &texts,
            &AllowedSpecial::default(),
            &DisallowedSpecial::default(),
        );
        assert!(matches!(
            result,
            Err(TokchunkError::DisallowedSpecialToken { .. })
        ));
    }
}
