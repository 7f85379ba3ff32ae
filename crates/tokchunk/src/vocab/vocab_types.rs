//! # Vocabulary Map Type Aliases

use crate::types::TCHashMap;

/// Map of ``{ Vec<u8> -> T }``.
pub type SpanTokenMap<T> = TCHashMap<Vec<u8>, T>;

/// Map of ``{ T -> Vec<u8> }``.
pub type TokenSpanMap<T> = TCHashMap<T, Vec<u8>>;

/// Map of ``{ String -> T }``.
pub type SpecialTokenMap<T> = TCHashMap<String, T>;
