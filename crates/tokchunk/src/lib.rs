//! # `tokchunk` BPE Token Codec + Chunk Splitter
//!
//! `tokchunk` maps Unicode text to BPE token-id sequences and back over a
//! pre-trained rank table, and splits long documents into token-bounded
//! text chunks.
//!
//! See:
//! * [`codec`] to encode text into tokens and decode tokens into text.
//! * [`chunker`] to split documents into token-bounded chunks.
//! * [`batch`] to run codec operations over collections in parallel.
//! * [`vocab`] to manage vocabularies and vocab io.
//! * [`pretrained`] to resolve model names to published vocabularies.
//!
//! The byte-level merge itself sits behind the narrow
//! [`merge::BytePairMerger`] seam; [`merge::RankScanMerger`] is the
//! default engine.
//!
//! ## Splitting a document
//!
//! ```rust,ignore
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! use tokchunk::chunker::ChunkSplitter;
//! use tokchunk::codec::TokenCodec;
//! use tokchunk::pretrained::vocabulary_for_model;
//!
//! let vocab = vocabulary_for_model("gpt-4o", "./vocabs")?;
//! let codec = Arc::new(TokenCodec::init(Arc::new(vocab))?);
//!
//! let splitter = ChunkSplitter::new(codec);
//! let chunks = splitter.split(&text, NonZeroUsize::new(4096).unwrap())?;
//! ```
#![warn(missing_docs, unused)]

pub mod batch;
pub mod chunker;
pub mod codec;
pub mod concurrency;
pub mod errors;
pub mod merge;
pub mod pretrained;
pub mod regex;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use batch::BatchCodec;
#[doc(inline)]
pub use chunker::{ChunkSplitter, TextChunk};
#[doc(inline)]
pub use codec::{AllowedSpecial, DecodeMode, DisallowedSpecial, TokenCodec};
#[doc(inline)]
pub use errors::{Result, TokchunkError};
#[doc(inline)]
pub use types::TokenType;
#[doc(inline)]
pub use vocab::Vocabulary;
