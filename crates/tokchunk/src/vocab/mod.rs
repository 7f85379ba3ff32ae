//! # Vocabulary
//!
//! This module provides the immutable vocabulary data and its io mechanisms.
//!
//! The user-oriented type is [`Vocabulary`], which combines:
//! * `ranks` - a [`RankVocab`] ``{ Vec<u8> -> T }`` mergeable rank table,
//! * `specials` - a [`SpecialVocab`] ``{ String -> T }`` reserved-word table,
//! * `pattern` - the piece pre-split [`crate::regex::RegexPattern`].

pub mod io;

pub mod rank_vocab;
pub mod special_vocab;
pub mod vocab_types;
pub mod vocabulary;

#[doc(inline)]
pub use rank_vocab::RankVocab;
#[doc(inline)]
pub use special_vocab::SpecialVocab;
#[doc(inline)]
pub use vocab_types::{SpanTokenMap, SpecialTokenMap, TokenSpanMap};
#[doc(inline)]
pub use vocabulary::Vocabulary;
