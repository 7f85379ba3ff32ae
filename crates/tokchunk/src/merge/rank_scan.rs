//! # Rank Scan Merger
//!
//! Incrementally re-scans for the best available merge,
//! iterates until no more merges remain.

use crate::errors::{Result, TokchunkError};
use crate::merge::BytePairMerger;
use crate::types::TokenType;
use crate::vocab::Vocabulary;

/// A [`BytePairMerger`] which incrementally scans for merges.
///
/// Each round finds the lowest-ranked concatenation among all adjacent
/// group pairs and merges it; ties are impossible because ranks are
/// unique.
#[derive(Default, Debug, Clone, Copy)]
pub struct RankScanMerger;

impl RankScanMerger {
    fn unknown_span_error(span: &[u8]) -> TokchunkError {
        TokchunkError::UnknownToken {
            repr: format!("{:?}", String::from_utf8_lossy(span)),
        }
    }
}

impl<T: TokenType> BytePairMerger<T> for RankScanMerger {
    fn merge_append(
        &self,
        vocab: &Vocabulary<T>,
        piece: &[u8],
        out: &mut Vec<T>,
    ) -> Result<()> {
        if piece.is_empty() {
            return Ok(());
        }

        // Whole-piece hit; also covers single bytes.
        if let Some(rank) = vocab.lookup_rank(piece) {
            out.push(rank);
            return Ok(());
        }

        // Group boundaries; group `i` is `piece[bounds[i]..bounds[i + 1]]`.
        let mut bounds: Vec<usize> = (0..=piece.len()).collect();

        loop {
            // Find the lowest ranked merge available.
            // Merging groups `i` and `i+1` yields `piece[w[0]..w[2]]`.
            let best = bounds
                .windows(3)
                .enumerate()
                .filter_map(|(i, w)| {
                    vocab.lookup_rank(&piece[w[0]..w[2]]).map(|rank| (rank, i))
                })
                .min();

            match best {
                Some((_, i)) => {
                    bounds.remove(i + 1);
                }
                None => break,
            }
        }

        out.reserve(bounds.len() - 1);
        for w in bounds.windows(2) {
            let span = &piece[w[0]..w[1]];
            let rank = vocab
                .lookup_rank(span)
                .ok_or_else(|| Self::unknown_span_error(span))?;
            out.push(rank);
        }

        Ok(())
    }

    fn suffix_completions(
        &self,
        vocab: &Vocabulary<T>,
        suffix: &[u8],
    ) -> Vec<Vec<T>> {
        if suffix.is_empty() {
            return Vec::new();
        }

        // All vocabulary spans with `suffix` as a prefix, in span order.
        let spans = vocab.sorted_spans();
        let start = spans.partition_point(|s| s.as_slice() < suffix);

        let mut completions: Vec<Vec<T>> = spans[start..]
            .iter()
            .take_while(|span| span.starts_with(suffix))
            .map(|span| vec![vocab.lookup_rank(span).unwrap()])
            .collect();

        // The suffix may also stand alone as a multi-token sequence.
        let mut exact = Vec::new();
        if self.merge_append(vocab, suffix, &mut exact).is_ok() && exact.len() > 1 {
            completions.push(exact);
        }

        completions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{RankVocab, SpecialVocab};

    fn merge_vocab() -> Vocabulary<u32> {
        Vocabulary::init(
            "test",
            r"\S+|\s+",
            RankVocab::byte_ordinal().with_str_spans([
                ("he", 256),
                ("ll", 257),
                ("llo", 258),
                ("hello", 259),
            ]),
            SpecialVocab::default(),
            None,
        )
        .unwrap()
    }

    fn merge(
        vocab: &Vocabulary<u32>,
        piece: &[u8],
    ) -> Vec<u32> {
        let mut out = Vec::new();
        RankScanMerger.merge_append(vocab, piece, &mut out).unwrap();
        out
    }

    #[test]
    fn test_whole_piece_hit() {
        let vocab = merge_vocab();
        assert_eq!(merge(&vocab, b"hello"), vec![259]);
        assert_eq!(merge(&vocab, b"h"), vec![b'h' as u32]);
        assert_eq!(merge(&vocab, b""), Vec::<u32>::new());
    }

    #[test]
    fn test_lowest_rank_merges_first() {
        let vocab = merge_vocab();

        // "hell" -> "he" (256) merges before "ll" (257); no further merges.
        assert_eq!(merge(&vocab, b"hell"), vec![256, 257]);

        // "llop": "ll" -> then "llo"; "p" stays a byte.
        assert_eq!(merge(&vocab, b"llop"), vec![258, b'p' as u32]);
    }

    #[test]
    fn test_unmergeable_bytes_pass_through() {
        let vocab = merge_vocab();
        assert_eq!(
            merge(&vocab, b"xy"),
            vec![b'x' as u32, b'y' as u32]
        );
    }

    #[test]
    fn test_missing_byte_rank_is_an_error() {
        // A deliberately malformed vocabulary with no single-byte ranks.
        let vocab = Vocabulary::<u32>::init(
            "broken",
            r"\S+",
            RankVocab::default().with_str_spans([("ab", 0)]),
            SpecialVocab::default(),
            None,
        )
        .unwrap();

        let mut out = Vec::new();
        let result = RankScanMerger.merge_append(&vocab, b"abc", &mut out);
        assert!(matches!(
            result,
            Err(TokchunkError::UnknownToken { .. })
        ));
    }

    #[test]
    fn test_suffix_completions() {
        let vocab = merge_vocab();
        let merger = RankScanMerger;

        let completions = merger.suffix_completions(&vocab, b"hel");
        // "hello" extends "hel"; "hel" itself re-encodes as ["he", "l"].
        assert!(completions.contains(&vec![259]));
        assert!(completions.contains(&vec![256, b'l' as u32]));

        // A single-token suffix is its own candidate.
        let completions = merger.suffix_completions(&vocab, b"he");
        assert!(completions.contains(&vec![256]));

        assert!(merger.suffix_completions(&vocab, b"").is_empty());
    }
}
