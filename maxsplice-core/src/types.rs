use std::fmt;
use std::path::PathBuf;

use bio::bio_types::strand::Strand;
use thiserror::Error;

/// An exon of a transcript, in 1-based inclusive genomic coordinates.
///
/// Exons are consumed as opaque data from the host annotation pipeline;
/// the list a [`Transcript`] carries is ordered in transcript orientation
/// (exon 1 is the 5'-most exon of the transcript, which on the reverse
/// strand has the highest genomic coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exon {
    /// Genomic start position (1-based, inclusive)
    pub start: u64,
    /// Genomic end position (1-based, inclusive)
    pub end: u64,
}

/// An intron of a transcript, in 1-based inclusive genomic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intron {
    /// Genomic start position (1-based, inclusive)
    pub start: u64,
    /// Genomic end position (1-based, inclusive)
    pub end: u64,
}

/// Transcript structure as supplied by the host pipeline.
///
/// Exon and intron lists are ordered in transcript orientation. Intron *j*
/// separates exon *j* from exon *j+1*. Strand follows the convention of the
/// parent sequence slice; [`Strand::Unknown`] is treated as forward.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Ordered exon list
    pub exons: Vec<Exon>,
    /// Ordered intron list
    pub introns: Vec<Intron>,
    /// Strand the transcript is transcribed from
    pub strand: Strand,
}

/// Shape of a variant allele pair, decided once at construction.
///
/// The sliding-window reference-comparison rule differs between true
/// single-nucleotide substitutions and every other allele shape, so the
/// distinction is tagged here rather than re-derived at each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantShape {
    /// One reference base substituted by one alternate base
    SingleNucleotide,
    /// Any other shape: insertion, deletion, multi-base substitution
    Other,
}

/// A variant allele pair in genomic coordinates.
///
/// The alternate allele is expressed on the transcript strand, matching the
/// orientation of every sequence returned by a [`SequenceSource`]; an empty
/// alternate allele denotes a deletion.
///
/// [`SequenceSource`]: crate::sequence::SequenceSource
///
/// # Examples
///
/// ```rust
/// use maxsplice_core::types::{Variant, VariantShape};
///
/// let snv = Variant::new(1200, 1200, 1, "C");
/// assert_eq!(snv.shape, VariantShape::SingleNucleotide);
///
/// let deletion = Variant::new(1200, 1202, 3, "");
/// assert_eq!(deletion.shape, VariantShape::Other);
/// ```
#[derive(Debug, Clone)]
pub struct Variant {
    /// Genomic start position (1-based, inclusive)
    pub start: u64,
    /// Genomic end position (1-based, inclusive)
    pub end: u64,
    /// Number of reference bases replaced by the alternate allele
    pub ref_len: u64,
    /// Alternate allele on the transcript strand; empty for a deletion
    pub alt_allele: String,
    /// Allele shape, decided once here and carried downstream
    pub shape: VariantShape,
}

impl Variant {
    /// Builds a variant and tags its shape.
    ///
    /// The shape is [`VariantShape::SingleNucleotide`] only when exactly one
    /// reference base is replaced by exactly one alternate base.
    #[must_use]
    pub fn new(start: u64, end: u64, ref_len: u64, alt_allele: impl Into<String>) -> Self {
        let alt_allele = alt_allele.into();
        let shape = if start == end && ref_len == 1 && alt_allele.len() == 1 {
            VariantShape::SingleNucleotide
        } else {
            VariantShape::Other
        };
        Self {
            start,
            end,
            ref_len,
            alt_allele,
            shape,
        }
    }
}

/// Kind of transcript feature a variant falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// The variant lies inside an exon
    Exon,
    /// The variant lies inside an intron
    Intron,
}

/// Location of the transcript feature containing a variant.
///
/// Host pipelines report exon/intron positions in the 1-based
/// "current/total" shape (e.g. `3/7`); [`FeatureLocation::from_numbering`]
/// converts that into the 0-based index used internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLocation {
    /// Whether the feature is an exon or an intron
    pub kind: FeatureKind,
    /// Zero-based index into the transcript's exon or intron list
    pub index: usize,
}

impl FeatureLocation {
    /// Converts 1-based `number`/`total` feature numbering into a location.
    ///
    /// Returns `None` when the numbering is out of range (`number` of zero or
    /// greater than `total`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use maxsplice_core::types::{FeatureKind, FeatureLocation};
    ///
    /// let location = FeatureLocation::from_numbering(FeatureKind::Exon, 3, 7).unwrap();
    /// assert_eq!(location.index, 2);
    ///
    /// assert!(FeatureLocation::from_numbering(FeatureKind::Intron, 8, 7).is_none());
    /// ```
    #[must_use]
    pub fn from_numbering(kind: FeatureKind, number: usize, total: usize) -> Option<Self> {
        if number == 0 || number > total {
            return None;
        }
        Some(Self {
            kind,
            index: number - 1,
        })
    }
}

/// Which side of an intron a splice site sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceSiteKind {
    /// Exon-to-intron junction (5' end of the intron)
    Donor,
    /// Intron-to-exon junction (3' end of the intron)
    Acceptor,
}

impl fmt::Display for SpliceSiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Donor => write!(f, "donor"),
            Self::Acceptor => write!(f, "acceptor"),
        }
    }
}

/// A scored k-mer found by the sliding-window maximizer.
#[derive(Debug, Clone, PartialEq)]
pub struct KmerHit {
    /// The k-mer sequence
    pub kmer: String,
    /// 1-based start offset of the k-mer within its parent sequence
    pub frame: usize,
    /// Maximum-entropy score of the k-mer
    pub score: f64,
}

/// Errors raised by the scoring core.
///
/// Only configuration-level failures surface as errors: a missing model file
/// or a lookup miss against a loaded table, both of which mean the model set
/// is corrupt and no trustworthy score can be produced. Per-variant
/// conditions (non-ACGT windows, unavailable slices, boundary exons) are
/// expected and reported as absent fields instead.
#[derive(Error, Debug)]
pub enum SpliceError {
    /// A model file is missing or unreadable
    #[error("failed to read model file {path:?}: {source}")]
    ModelLoad {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// A loaded table has no entry for a key it should cover
    #[error("model table {table} has no entry for key {key}")]
    TableMiss {
        /// Name of the table that missed
        table: &'static str,
        /// The key that was looked up
        key: String,
    },
    /// A sequence of the wrong width or alphabet reached a scoring function
    #[error("invalid scoring sequence {0:?} (expected {1} uppercase ACGT bases)")]
    InvalidSequence(String, usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_shape_single_nucleotide() {
        let variant = Variant::new(100, 100, 1, "G");
        assert_eq!(variant.shape, VariantShape::SingleNucleotide);
    }

    #[test]
    fn test_variant_shape_multi_base() {
        assert_eq!(Variant::new(100, 102, 3, "G").shape, VariantShape::Other);
        assert_eq!(Variant::new(100, 100, 1, "GT").shape, VariantShape::Other);
        assert_eq!(Variant::new(100, 100, 1, "").shape, VariantShape::Other);
    }

    #[test]
    fn test_feature_location_numbering() {
        let first = FeatureLocation::from_numbering(FeatureKind::Exon, 1, 7).unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.kind, FeatureKind::Exon);

        let last = FeatureLocation::from_numbering(FeatureKind::Intron, 6, 6).unwrap();
        assert_eq!(last.index, 5);

        assert!(FeatureLocation::from_numbering(FeatureKind::Exon, 0, 7).is_none());
        assert!(FeatureLocation::from_numbering(FeatureKind::Exon, 8, 7).is_none());
    }

    #[test]
    fn test_splice_site_kind_display() {
        assert_eq!(SpliceSiteKind::Donor.to_string(), "donor");
        assert_eq!(SpliceSiteKind::Acceptor.to_string(), "acceptor");
    }
}
