//! # Error Types

/// Errors from tokchunk operations.
#[derive(Debug, thiserror::Error)]
pub enum TokchunkError {
    /// Text contains a special token literal the caller did not allow.
    #[error(
        "text contains disallowed special token {token:?}; \
         pass it in `allowed_special` to encode it"
    )]
    DisallowedSpecialToken {
        /// The offending special token literal.
        token: String,
    },

    /// A token id has no byte mapping, or a byte sequence is not an
    /// atomic vocabulary entry.
    #[error("unknown token: {repr}")]
    UnknownToken {
        /// Display form of the unmapped token id or byte sequence.
        repr: String,
    },

    /// Decoded bytes are not valid UTF-8 under the strict decode policy.
    #[error("decoded bytes are not valid UTF-8 after byte {valid_up_to}")]
    MalformedUtf8 {
        /// The number of leading valid UTF-8 bytes.
        valid_up_to: usize,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// Token value out of range for the target token type.
    #[error("token out of range")]
    TokenOutOfRange,

    /// No encoding is registered for the model name.
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// Worker pool construction failed.
    #[error("worker pool: {0}")]
    WorkerPool(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parse error (base64, integer, etc.)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for tokchunk operations.
pub type Result<T> = core::result::Result<T, TokchunkError>;
