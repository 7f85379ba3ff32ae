//! # Regex Support
//!
//! This module provides mechanisms to mix `regex` and `fancy_regex` types.
//!
//! The OpenAI piece-split patterns require backtracking features
//! (`fancy_regex`); the special-token union patterns compile on the
//! faster `regex` crate. [`RegexWrapper`] papers over the difference.

pub mod exact_match_union;
pub mod regex_wrapper;

#[doc(inline)]
pub use exact_match_union::exact_match_union_pattern;
#[doc(inline)]
pub use regex_wrapper::{ConstRegexPattern, RegexPattern, RegexWrapper};

/// A macro to concatenate multiple string literals with a specified separator.
///
/// # Examples
///
/// ```rust
/// use tokchunk::join_strs;
///
/// let result = join_strs!(",", ("Hello", "World", "Rust"));
/// assert_eq!(result, "Hello,World,Rust");
/// ```
#[macro_export]
macro_rules! join_strs {
    ($sep:literal, ($first:literal $(, $rest:literal)* $(,)?)) => {
        concat!($first $(, $sep, $rest)*)
    };
}

/// An extension of [`join_strs!()`] which uses the "|" as the seperator.
#[macro_export]
macro_rules! join_patterns {
    ($($e:expr),* $(,)?) => { $crate::join_strs!("|", ($($e),*)) };
}

#[cfg(test)]
mod tests {

    #[test]
    fn test_join_patterns() {
        assert_eq!(join_patterns!("a", "b", "c"), "a|b|c");
    }

    #[test]
    fn test_join_strs() {
        assert_eq!(join_strs!("-", ("A", "B", "C")), "A-B-C");
        assert_eq!(join_strs!(";", ("OnlyOne")), "OnlyOne");
    }
}
