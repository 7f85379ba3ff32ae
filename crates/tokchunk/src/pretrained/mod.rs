//! # Pretrained Vocabularies
//!
//! Model-name resolution and local-file vocabulary loading for the
//! published `OpenAI` encodings.

pub mod openai;

use std::path::Path;

use crate::errors::Result;
use crate::vocab::Vocabulary;

#[doc(inline)]
pub use openai::{OpenAiEncoding, encoding_for_model};

/// Resolve a model name and load its vocabulary from a local directory.
///
/// ## Arguments
/// * `model` - The model name, e.g. ``"gpt-4o"``.
/// * `vocab_dir` - Directory holding ``{encoding}.tiktoken`` rank files.
///
/// ## Returns
/// A `Result<Vocabulary<u32>>`;
/// [`crate::errors::TokchunkError::UnknownModel`] if no encoding is
/// registered for the model name.
pub fn vocabulary_for_model<P: AsRef<Path>>(
    model: &str,
    vocab_dir: P,
) -> Result<Vocabulary<u32>> {
    encoding_for_model(model)?.load_vocab(vocab_dir)
}
