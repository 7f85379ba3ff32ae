//! # Byte-Pair Merge Engine
//!
//! The merge engine is a narrow seam: a handful of pure functions over a
//! byte buffer and the rank table. Any implementation satisfying
//! [`BytePairMerger`] is substitutable under the codec.

pub mod rank_scan;

#[doc(inline)]
pub use rank_scan::RankScanMerger;

use crate::errors::Result;
use crate::types::TokenType;
use crate::vocab::Vocabulary;

/// A strategy for byte-pair merging single pieces.
pub trait BytePairMerger<T: TokenType>: Send + Sync {
    /// BPE-merge one piece, appending its ranks to `out`.
    ///
    /// Repeatedly merges the adjacent byte-group pair whose concatenation
    /// has the numerically lowest rank, until no legal merge remains; then
    /// maps each remaining group to its rank.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary with the rank table.
    /// * `piece` - The byte piece to merge.
    /// * `out` - The target token buffer to append to.
    ///
    /// ## Returns
    /// An [`crate::errors::TokchunkError::UnknownToken`] error if a final
    /// group has no rank; a well-formed vocabulary covers every single
    /// byte, so this only fires on malformed tables.
    fn merge_append(
        &self,
        vocab: &Vocabulary<T>,
        piece: &[u8],
        out: &mut Vec<T>,
    ) -> Result<()>;

    /// Candidate token sequences that could extend or replace an unstable
    /// trailing byte suffix if more text were appended.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary with the rank table.
    /// * `suffix` - The unstable trailing bytes.
    fn suffix_completions(
        &self,
        vocab: &Vocabulary<T>,
        suffix: &[u8],
    ) -> Vec<Vec<T>>;
}
