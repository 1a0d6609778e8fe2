//! The splice-site scoring engine.
//!
//! Both scoring functions combine two parts: a consensus ratio over the
//! near-invariant dinucleotide (GT for donors, AG for acceptors), computed
//! from fixed position-specific probabilities against genomic background
//! frequencies, and a maximum-entropy table value looked up over the
//! remaining positions. The final score is the log2 of their product.
//!
//! [`SpliceScorer`] is the explicit context object owning the immutable
//! model tables and the two memoization caches; one instance is shared by
//! reference across every scoring call, with no process-wide state.

use std::sync::{Mutex, PoisonError};

use crate::cache::ScoreCache;
use crate::constants::{
    ACCEPTOR_CONSENSUS_P19, ACCEPTOR_CONSENSUS_P20, ACCEPTOR_CONSENSUS_POSITIONS,
    ACCEPTOR_NUMERATOR_TABLES, ACCEPTOR_SUBSTRINGS, ACCEPTOR_WIDTH, BACKGROUND_FREQUENCIES,
    CACHE_CAPACITY, DONOR_CONSENSUS_P4, DONOR_CONSENSUS_P5, DONOR_CONSENSUS_POSITIONS,
    DONOR_WIDTH,
};
use crate::model::MaxEntModel;
use crate::sequence::{base4_index, is_acgt, nucleotide_ordinal};
use crate::types::SpliceError;

/// Scoring context: immutable model tables plus the two result caches.
///
/// The model is read-only after construction and the caches serialize their
/// mutations behind a mutex each, so a single scorer can be shared across
/// worker threads (see [`crate::engine::SpliceAnalyzer::annotate_batch`]).
#[derive(Debug)]
pub struct SpliceScorer {
    model: MaxEntModel,
    donor_cache: Mutex<ScoreCache>,
    acceptor_cache: Mutex<ScoreCache>,
}

impl SpliceScorer {
    /// Wraps a loaded model with fresh caches.
    #[must_use]
    pub fn new(model: MaxEntModel) -> Self {
        Self {
            model,
            donor_cache: Mutex::new(ScoreCache::new(CACHE_CAPACITY)),
            acceptor_cache: Mutex::new(ScoreCache::new(CACHE_CAPACITY)),
        }
    }

    /// The model tables backing this scorer.
    #[must_use]
    pub fn model(&self) -> &MaxEntModel {
        &self.model
    }

    /// Scores a 9-base donor (5') splice site sequence.
    ///
    /// The input must be exactly 9 uppercase ACGT bases: 3 exonic, the GT
    /// consensus dinucleotide, and 4 further intronic bases. Callers filter
    /// anything else out before reaching this function.
    ///
    /// # Errors
    ///
    /// [`SpliceError::InvalidSequence`] on a width or alphabet violation,
    /// [`SpliceError::TableMiss`] when the loaded model cannot resolve the
    /// sequence (corrupt or mismatched model files).
    pub fn score5(&self, seq: &str) -> Result<f64, SpliceError> {
        validate_width(seq, DONOR_WIDTH)?;
        if let Some(score) = lock(&self.donor_cache).get(seq) {
            return Ok(score);
        }
        let score = self.score5_uncached(seq)?;
        lock(&self.donor_cache).insert(seq.to_string(), score);
        Ok(score)
    }

    /// Scores a 23-base acceptor (3') splice site sequence.
    ///
    /// The input must be exactly 23 uppercase ACGT bases: 18 intronic, the
    /// AG consensus dinucleotide, and 3 exonic bases.
    ///
    /// # Errors
    ///
    /// As for [`SpliceScorer::score5`].
    pub fn score3(&self, seq: &str) -> Result<f64, SpliceError> {
        validate_width(seq, ACCEPTOR_WIDTH)?;
        if let Some(score) = lock(&self.acceptor_cache).get(seq) {
            return Ok(score);
        }
        let score = self.score3_uncached(seq)?;
        lock(&self.acceptor_cache).insert(seq.to_string(), score);
        Ok(score)
    }

    fn score5_uncached(&self, seq: &str) -> Result<f64, SpliceError> {
        let consensus = consensus_ratio(
            seq,
            DONOR_CONSENSUS_POSITIONS,
            &DONOR_CONSENSUS_P4,
            &DONOR_CONSENSUS_P5,
        )?;
        let rest = donor_rest(seq);
        let table_value = self.model.donor_table_score(&rest)?;
        Ok((consensus * table_value).log2())
    }

    fn score3_uncached(&self, seq: &str) -> Result<f64, SpliceError> {
        let consensus = consensus_ratio(
            seq,
            ACCEPTOR_CONSENSUS_POSITIONS,
            &ACCEPTOR_CONSENSUS_P19,
            &ACCEPTOR_CONSENSUS_P20,
        )?;
        let rest = acceptor_rest(seq);

        let mut numerator = 1.0;
        let mut denominator = 1.0;
        for (table_number, &(start, length)) in ACCEPTOR_SUBSTRINGS.iter().enumerate() {
            let fragment = &rest[start..start + length];
            let key = base4_index(fragment)
                .ok_or_else(|| SpliceError::InvalidSequence(fragment.to_string(), length))?;
            let value = self.model.acceptor_table_score(table_number, key)?;
            if table_number < ACCEPTOR_NUMERATOR_TABLES {
                numerator *= value;
            } else {
                denominator *= value;
            }
        }

        Ok((consensus * numerator / denominator).log2())
    }

    /// Whether a donor sequence is currently memoized.
    #[must_use]
    pub fn donor_cached(&self, seq: &str) -> bool {
        lock(&self.donor_cache).contains(seq)
    }

    /// Whether an acceptor sequence is currently memoized.
    #[must_use]
    pub fn acceptor_cached(&self, seq: &str) -> bool {
        lock(&self.acceptor_cache).contains(seq)
    }

    /// Number of memoized donor scores.
    #[must_use]
    pub fn donor_cache_len(&self) -> usize {
        lock(&self.donor_cache).len()
    }

    /// Number of memoized acceptor scores.
    #[must_use]
    pub fn acceptor_cache_len(&self) -> usize {
        lock(&self.acceptor_cache).len()
    }
}

fn lock(cache: &Mutex<ScoreCache>) -> std::sync::MutexGuard<'_, ScoreCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

fn validate_width(seq: &str, width: usize) -> Result<(), SpliceError> {
    if seq.len() != width || !is_acgt(seq) {
        return Err(SpliceError::InvalidSequence(seq.to_string(), width));
    }
    Ok(())
}

/// Probability ratio over the two consensus positions against background.
fn consensus_ratio(
    seq: &str,
    positions: [usize; 2],
    first_table: &[f64; 4],
    second_table: &[f64; 4],
) -> Result<f64, SpliceError> {
    let bytes = seq.as_bytes();
    let first = ordinal_at(bytes, positions[0])?;
    let second = ordinal_at(bytes, positions[1])?;
    Ok(first_table[first] * second_table[second]
        / (BACKGROUND_FREQUENCIES[first] * BACKGROUND_FREQUENCIES[second]))
}

fn ordinal_at(bytes: &[u8], position: usize) -> Result<usize, SpliceError> {
    bytes
        .get(position)
        .and_then(|&b| nucleotide_ordinal(b))
        .ok_or_else(|| {
            SpliceError::InvalidSequence(String::from_utf8_lossy(bytes).into_owned(), bytes.len())
        })
}

/// Donor rest sequence: positions 0..3 and 5..9, the consensus GT dropped.
fn donor_rest(seq: &str) -> String {
    format!("{}{}", &seq[..3], &seq[5..])
}

/// Acceptor rest sequence: the first 18 and last 3 bases, the consensus AG dropped.
fn acceptor_rest(seq: &str) -> String {
    format!("{}{}", &seq[..18], &seq[20..])
}
