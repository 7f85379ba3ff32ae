//! # Special-Token Encode Policy

use crate::types::TCHashSet;

/// Which special token literals an encode call recognizes as tokens.
///
/// Defaults to [`AllowedSpecial::None`]: plain text gets no special
/// interpretation.
#[derive(Debug, Clone, Default)]
pub enum AllowedSpecial<'a> {
    /// Allow every special token in the vocabulary.
    All,

    /// Allow no special tokens.
    #[default]
    None,

    /// Allow exactly this set of special token literals.
    Set(TCHashSet<&'a str>),
}

impl<'a> AllowedSpecial<'a> {
    /// Build a [`AllowedSpecial::Set`] from an iterator of words.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::Set(words.into_iter().collect())
    }
}

/// Which special token literals an encode call rejects when they appear
/// in the input text.
///
/// Defaults to [`DisallowedSpecial::All`]: every special token not
/// explicitly allowed is an error. This is the safe default; a special
/// literal in plain input text is usually an injection, not an intent.
#[derive(Debug, Clone, Default)]
pub enum DisallowedSpecial<'a> {
    /// Disallow every special token not explicitly allowed.
    #[default]
    All,

    /// Disallow no special tokens.
    None,

    /// Disallow exactly this set of special token literals.
    Set(TCHashSet<&'a str>),
}

impl<'a> DisallowedSpecial<'a> {
    /// Build a [`DisallowedSpecial::Set`] from an iterator of words.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::Set(words.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert!(matches!(AllowedSpecial::default(), AllowedSpecial::None));
        assert!(matches!(DisallowedSpecial::default(), DisallowedSpecial::All));
    }

    #[test]
    fn test_from_words() {
        let allowed = AllowedSpecial::from_words(["<|a|>", "<|b|>"]);
        match allowed {
            AllowedSpecial::Set(set) => {
                assert_eq!(set.len(), 2);
                assert!(set.contains("<|a|>"));
            }
            _ => panic!("expected Set"),
        }
    }
}
