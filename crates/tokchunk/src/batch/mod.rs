//! # Batch Execution

pub mod batch_codec;

#[doc(inline)]
pub use batch_codec::{BatchCodec, DEFAULT_BATCH_WORKERS};
