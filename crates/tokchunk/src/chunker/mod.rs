//! # Chunk Splitter
//!
//! Partitions a document's token sequence into bounded windows, and
//! round-trips each window back to text.

use core::num::NonZeroUsize;
use std::sync::Arc;

use crate::codec::{AllowedSpecial, DecodeMode, DisallowedSpecial, TokenCodec};
use crate::errors::Result;
use crate::merge::{BytePairMerger, RankScanMerger};
use crate::types::TokenType;

/// A contiguous window of an encoded document, with its decoded text.
///
/// Chunks partition the source token sequence exactly: each token
/// belongs to exactly one chunk, and chunk `i` immediately precedes
/// chunk `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk<T: TokenType> {
    /// Zero-based window index.
    pub index: usize,

    /// The token window; length <= the split's `max_tokens`.
    pub tokens: Vec<T>,

    /// The window decoded back to text.
    ///
    /// Decoded with [`DecodeMode::Replace`]: when a multi-byte UTF-8
    /// character straddles a window boundary, both sides render the
    /// partial bytes as U+FFFD. Joining chunk texts is therefore not
    /// guaranteed to reproduce the source text byte-for-byte; joining
    /// chunk *tokens* always reproduces the source tokens.
    pub text: String,
}

/// Splits documents into token-bounded [`TextChunk`]s.
pub struct ChunkSplitter<T: TokenType, M: BytePairMerger<T> = RankScanMerger> {
    codec: Arc<TokenCodec<T, M>>,
}

impl<T: TokenType, M: BytePairMerger<T>> ChunkSplitter<T, M> {
    /// Create a new chunk splitter over a codec.
    pub fn new(codec: Arc<TokenCodec<T, M>>) -> Self {
        Self { codec }
    }

    /// Get the shared codec.
    pub fn codec(&self) -> &Arc<TokenCodec<T, M>> {
        &self.codec
    }

    /// Split a document into token-bounded chunks.
    ///
    /// The document is encoded with the default special-token policy:
    /// a special literal appearing in the input text is an error, not a
    /// token.
    ///
    /// ## Arguments
    /// * `text` - The document text.
    /// * `max_tokens` - The maximum tokens per chunk.
    ///
    /// ## Returns
    /// `ceil(token_count / max_tokens)` chunks in window order; zero
    /// chunks for an empty token sequence.
    pub fn split(
        &self,
        text: &str,
        max_tokens: NonZeroUsize,
    ) -> Result<Vec<TextChunk<T>>> {
        let tokens = self.codec.encode(
            text,
            &AllowedSpecial::default(),
            &DisallowedSpecial::default(),
        )?;

        tokens
            .chunks(max_tokens.get())
            .enumerate()
            .map(|(index, window)| {
                let text = self.codec.decode(window, DecodeMode::Replace)?;
                Ok(TextChunk {
                    index,
                    tokens: window.to_vec(),
                    text,
                })
            })
            .collect()
    }
}
