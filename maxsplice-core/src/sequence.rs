//! Sequence validation, base-4 indexing, and the genome access seam.
//!
//! Every sequence the scoring engine touches is a short uppercase ACGT
//! string (9 or 23 bases). This module provides the validation predicate
//! used to refuse anything else, the positional base-4 encoding the 3'
//! model keys its sub-tables with, and the [`SequenceSource`] trait through
//! which the host pipeline supplies genomic sequence.

use bio::bio_types::strand::Strand;

/// Converts a nucleotide byte to its ordinal for table indexing.
///
/// # Encoding
///
/// - A: 0
/// - C: 1
/// - G: 2
/// - T: 3
/// - Other (including lowercase): `None`
///
/// # Examples
///
/// ```rust
/// use maxsplice_core::sequence::nucleotide_ordinal;
///
/// assert_eq!(nucleotide_ordinal(b'A'), Some(0));
/// assert_eq!(nucleotide_ordinal(b'T'), Some(3));
/// assert_eq!(nucleotide_ordinal(b'N'), None);
/// assert_eq!(nucleotide_ordinal(b'a'), None);
/// ```
#[must_use]
pub const fn nucleotide_ordinal(base: u8) -> Option<usize> {
    match base {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Tests whether a sequence is non-empty, uppercase ACGT only.
///
/// Anything failing this predicate must never reach the scoring functions;
/// callers skip the affected window instead.
#[must_use]
pub fn is_acgt(seq: &str) -> bool {
    !seq.is_empty() && seq.bytes().all(|b| nucleotide_ordinal(b).is_some())
}

/// Maps an ACGT string of length L to Σ ordinal(base\[i\]) · 4^(L−1−i).
///
/// This is the key function for the nine 3' sub-tables, applied to fixed
/// sub-strings of length 7, 3, or 4. Returns `None` when the sequence
/// contains a byte outside uppercase ACGT.
///
/// # Examples
///
/// ```rust
/// use maxsplice_core::sequence::base4_index;
///
/// assert_eq!(base4_index("AAAA"), Some(0));
/// assert_eq!(base4_index("ACGT"), Some(0 * 64 + 1 * 16 + 2 * 4 + 3));
/// assert_eq!(base4_index("TTT"), Some(63));
/// assert_eq!(base4_index("ANT"), None);
/// ```
#[must_use]
pub fn base4_index(seq: &str) -> Option<usize> {
    seq.bytes()
        .try_fold(0usize, |acc, b| Some(acc * 4 + nucleotide_ordinal(b)?))
}

/// Reverse-complements an ACGT sequence.
///
/// Bytes outside ACGT are passed through unchanged, mirroring how ambiguous
/// bases travel through genome slices before validation rejects them.
#[must_use]
pub fn reverse_complement(seq: &str) -> String {
    seq.bytes()
        .rev()
        .map(|b| {
            let complement = match b {
                b'A' => b'T',
                b'T' => b'A',
                b'C' => b'G',
                b'G' => b'C',
                other => other,
            };
            complement as char
        })
        .collect()
}

/// Splices an alternate allele into a reference window.
///
/// Replaces `ref_len` bases starting at `offset` (0-based within the window)
/// with `allele`. Returns `None` when the replaced range does not fit inside
/// the window. The result length differs from the input for any allele shape
/// other than a like-for-like substitution; callers enforce width afterwards.
#[must_use]
pub fn substitute_allele(window: &str, offset: usize, ref_len: usize, allele: &str) -> Option<String> {
    let tail_start = offset.checked_add(ref_len)?;
    if tail_start > window.len() {
        return None;
    }
    let mut out = String::with_capacity(window.len() - ref_len + allele.len());
    out.push_str(&window[..offset]);
    out.push_str(allele);
    out.push_str(&window[tail_start..]);
    Some(out)
}

/// Genome sequence access, supplied by the host pipeline.
///
/// Coordinates are 1-based inclusive on the forward strand of the parent
/// slice. For [`Strand::Reverse`] the implementation returns the
/// reverse-complemented slice so that every sequence handed to the scoring
/// engine reads 5' to 3' on the transcript strand. A return of `None`
/// (position out of range, assembly gap) is an expected per-variant
/// condition, never an error.
pub trait SequenceSource {
    /// Fetches the bases covering `start..=end`, oriented by `strand`.
    fn subsequence(&self, start: u64, end: u64, strand: Strand) -> Option<String>;
}
