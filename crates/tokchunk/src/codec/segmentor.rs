//! # Piece Segmentor

use core::num::NonZeroUsize;
use core::ops::Range;

use crate::concurrency::ShardPool;
use crate::errors::Result;
use crate::regex::RegexWrapper;
use crate::types::{TCHashSet, TokenType};
use crate::vocab::Vocabulary;

/// Piece-split + special-word segmentor.
///
/// Holds thread-sharded pools of the compiled piece-split regex and the
/// special-word union regex, so concurrent batch workers never share a
/// regex instance.
#[derive(Debug, Clone)]
pub struct PieceSegmentor {
    /// Regex pool for splitting pieces.
    piece_re: ShardPool<RegexWrapper>,

    /// Regex pool matching any special word.
    special_re: Option<ShardPool<RegexWrapper>>,
}

impl PieceSegmentor {
    /// Create a new segmentor from a vocabulary.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary supplying the piece pattern and specials.
    /// * `max_pool` - The maximum regex pool size; if None, lib defaults are used.
    ///
    /// ## Returns
    /// A `Result<PieceSegmentor>`, with pattern compile failures surfaced.
    pub fn from_vocab<T: TokenType>(
        vocab: &Vocabulary<T>,
        max_pool: Option<NonZeroUsize>,
    ) -> Result<Self> {
        let piece_re = vocab.pattern().compile()?;

        let special_re = match vocab.specials().special_pattern() {
            Some(pattern) => Some(pattern.compile()?),
            None => None,
        };

        Ok(Self::init(piece_re, special_re, max_pool))
    }

    /// Create a new segmentor from compiled regexes.
    pub fn init(
        piece_re: RegexWrapper,
        special_re: Option<RegexWrapper>,
        max_pool: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            piece_re: ShardPool::init(piece_re, max_pool),
            special_re: special_re.map(|re| ShardPool::init(re, max_pool)),
        }
    }

    /// Get the current thread's piece-split regex.
    pub fn piece_regex(&self) -> &RegexWrapper {
        self.piece_re.get()
    }

    /// Get the current thread's special-word regex.
    pub fn special_regex(&self) -> Option<&RegexWrapper> {
        self.special_re.as_ref().map(|pool| pool.get())
    }

    /// Iterate over the piece ranges of ordinary text.
    pub fn piece_ranges<'s, 'h>(
        &'s self,
        text: &'h str,
    ) -> impl Iterator<Item = Range<usize>> {
        self.piece_regex().find_ranges(text)
    }

    /// Find the first occurrence of an *allowed* special word in `text`.
    ///
    /// Special words outside `allowed` are passed over; they read as
    /// ordinary text.
    ///
    /// ## Returns
    /// * `Some(Range<usize>)` of the match,
    /// * `None` otherwise.
    pub fn next_allowed_special(
        &self,
        text: &str,
        allowed: &TCHashSet<&str>,
    ) -> Option<Range<usize>> {
        if allowed.is_empty() {
            return None;
        }

        let re = self.special_regex()?;
        re.find_ranges(text)
            .find(|range| allowed.contains(&text[range.clone()]))
    }
}
