//! The sliding-window maximizer.
//!
//! Generates every fixed-width k-mer of a context sequence, scores each,
//! and keeps the first window achieving the strict maximum. The comparison
//! is `>`: on an exact score tie the earlier frame wins. That tie-break is
//! load-bearing for reference-comparison reporting and is pinned by tests.

use crate::constants::{ACCEPTOR_WIDTH, DONOR_WIDTH};
use crate::scoring::SpliceScorer;
use crate::types::{KmerHit, SpliceError};

/// All contiguous width-sized substrings of `seq`, left to right.
///
/// Yields exactly `max(0, len − width + 1)` windows; window *i* starts at
/// byte position *i*. Empty when `width` is zero or exceeds the sequence.
///
/// # Examples
///
/// ```rust
/// use maxsplice_core::window::sliding_windows;
///
/// let windows: Vec<&str> = sliding_windows("ACGTA", 3).collect();
/// assert_eq!(windows, ["ACG", "CGT", "GTA"]);
/// assert_eq!(sliding_windows("AC", 3).count(), 0);
/// ```
pub fn sliding_windows(seq: &str, width: usize) -> impl Iterator<Item = &str> {
    let count = if width == 0 || width > seq.len() {
        0
    } else {
        seq.len() - width + 1
    };
    (0..count).map(move |i| &seq[i..i + width])
}

/// Finds the best-scoring 9-base donor k-mer in `seq`.
///
/// Returns `None` when the sequence yields zero windows. The frame is the
/// 1-based start offset of the winning window.
///
/// # Errors
///
/// Propagates fatal scoring errors ([`SpliceError::TableMiss`],
/// [`SpliceError::InvalidSequence`]); callers validate the context sequence
/// beforehand so only table corruption surfaces here.
pub fn best_donor(scorer: &SpliceScorer, seq: &str) -> Result<Option<KmerHit>, SpliceError> {
    best_site(seq, DONOR_WIDTH, |window| scorer.score5(window))
}

/// Finds the best-scoring 23-base acceptor k-mer in `seq`.
///
/// # Errors
///
/// As for [`best_donor`].
pub fn best_acceptor(scorer: &SpliceScorer, seq: &str) -> Result<Option<KmerHit>, SpliceError> {
    best_site(seq, ACCEPTOR_WIDTH, |window| scorer.score3(window))
}

fn best_site(
    seq: &str,
    width: usize,
    mut score: impl FnMut(&str) -> Result<f64, SpliceError>,
) -> Result<Option<KmerHit>, SpliceError> {
    let mut best: Option<KmerHit> = None;
    for (i, window) in sliding_windows(seq, width).enumerate() {
        let window_score = score(window)?;
        let replaces = match &best {
            None => true,
            // Strict comparison: an exact tie keeps the earlier frame.
            Some(hit) => window_score > hit.score,
        };
        if replaces {
            best = Some(KmerHit {
                kmer: window.to_string(),
                frame: i + 1,
                score: window_score,
            });
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sliding_windows_count_and_content() {
        let seq = "ACGTACGTACGT";
        for width in 1..=seq.len() {
            let windows: Vec<&str> = sliding_windows(seq, width).collect();
            assert_eq!(windows.len(), seq.len() - width + 1);
            for (i, window) in windows.iter().enumerate() {
                assert_eq!(window.len(), width);
                assert_eq!(*window, &seq[i..i + width]);
            }
        }
    }

    #[test]
    fn test_sliding_windows_degenerate() {
        assert_eq!(sliding_windows("ACG", 4).count(), 0);
        assert_eq!(sliding_windows("", 1).count(), 0);
        assert_eq!(sliding_windows("ACG", 0).count(), 0);
        assert_eq!(sliding_windows("ACG", 3).count(), 1);
    }

    #[test]
    fn test_best_site_returns_maximum() {
        let scores = [1.0, 4.0, 2.0, 4.0, 3.0];
        let seq = "AAAAAAA"; // 5 windows of width 3
        let mut calls = 0;
        let best = best_site(seq, 3, |_| {
            let s = scores[calls];
            calls += 1;
            Ok(s)
        })
        .unwrap()
        .unwrap();

        assert_eq!(best.score, 4.0);
        // Frames 2 and 4 tie; strict comparison keeps the earlier one.
        assert_eq!(best.frame, 2);
    }

    #[test]
    fn test_best_site_zero_windows_is_none() {
        let best = best_site("AC", 9, |_| Ok(1.0)).unwrap();
        assert!(best.is_none());
    }

    #[test]
    fn test_best_site_single_window() {
        let best = best_site("ACG", 3, |_| Ok(-2.5)).unwrap().unwrap();
        assert_eq!(best.kmer, "ACG");
        assert_eq!(best.frame, 1);
        assert_eq!(best.score, -2.5);
    }

    #[test]
    fn test_best_site_propagates_errors() {
        let result = best_site("AAAA", 3, |_| {
            Err(SpliceError::TableMiss {
                table: "me2x5",
                key: "0".to_string(),
            })
        });
        assert!(result.is_err());
    }
}
