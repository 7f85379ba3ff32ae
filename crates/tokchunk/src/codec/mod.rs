//! # Token Codec
//!
//! This module provides the codec between Unicode text and token-id
//! sequences:
//! * [`TokenCodec`] - encode/decode over a shared [`crate::vocab::Vocabulary`].
//! * [`AllowedSpecial`] / [`DisallowedSpecial`] - special-token policy
//!   selectors for encode calls.
//! * [`DecodeMode`] - the UTF-8 error policy for decode calls.

pub mod segmentor;
pub mod special_policy;
pub mod token_codec;

#[doc(inline)]
pub use segmentor::PieceSegmentor;
#[doc(inline)]
pub use special_policy::{AllowedSpecial, DisallowedSpecial};
#[doc(inline)]
pub use token_codec::TokenCodec;

/// Expected average bytes per token; used for buffer capacity sizing.
pub const EXPECTED_BYTES_PER_TOKEN: usize = 4;

/// The UTF-8 error policy for decode calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Fail with [`crate::errors::TokchunkError::MalformedUtf8`] on
    /// malformed UTF-8.
    Strict,

    /// Substitute U+FFFD per malformed sequence; never fails.
    #[default]
    Replace,
}
