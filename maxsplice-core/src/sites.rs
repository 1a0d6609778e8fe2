//! The nearest-canonical-splice-site locator.
//!
//! Given the exon or intron a variant falls in, this module walks the
//! transcript's adjacency structure to the nearest real splice boundaries
//! on each side and scores their fixed-width windows. A boundary that does
//! not exist (first/last feature) or whose window cannot be fetched or
//! contains non-ACGT bases yields an absent site, never an error.
//!
//! Window offsets are relative to the boundary on the plus strand; on the
//! minus strand the boundary mirrors to the opposite coordinate and the
//! offsets negate, so the fetched (reverse-complemented) sequence always
//! reads 5' to 3' across the junction.

use bio::bio_types::strand::Strand;
use log::debug;

use crate::constants::{
    ACCEPTOR_EXON_BASES, ACCEPTOR_INTRON_BASES, ACCEPTOR_WIDTH, DONOR_EXON_BASES,
    DONOR_INTRON_BASES, DONOR_WIDTH,
};
use crate::scoring::SpliceScorer;
use crate::sequence::{is_acgt, SequenceSource};
use crate::types::{Exon, FeatureKind, FeatureLocation, Intron, SpliceError, Transcript};

/// A scored canonical splice site window.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteScore {
    /// The window sequence, 5' to 3' on the transcript strand
    pub sequence: String,
    /// Maximum-entropy score of the window
    pub score: f64,
}

/// Scores of the canonical splice sites nearest to a variant's feature.
///
/// Sites that do not exist (no adjacent neighbor) or could not be scored
/// (unavailable or non-ACGT sequence) are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearestSites {
    /// Donor of the nearest upstream junction
    pub upstream_donor: Option<SiteScore>,
    /// Acceptor of the nearest upstream junction
    pub upstream_acceptor: Option<SiteScore>,
    /// Donor of the nearest downstream junction
    pub downstream_donor: Option<SiteScore>,
    /// Acceptor of the nearest downstream junction
    pub downstream_acceptor: Option<SiteScore>,
}

/// Donor window anchored on an exon's trailing boundary.
///
/// Plus strand: `[end − 2, end + 6]`; minus strand mirrors to
/// `[start − 6, start + 2]`. `None` when the window would underflow the
/// sequence origin.
#[must_use]
pub fn donor_window_from_exon(exon: &Exon, strand: Strand) -> Option<(u64, u64)> {
    match strand {
        Strand::Reverse => Some((exon.start.checked_sub(DONOR_INTRON_BASES)?, exon.start + DONOR_EXON_BASES - 1)),
        _ => Some((exon.end.checked_sub(DONOR_EXON_BASES - 1)?, exon.end + DONOR_INTRON_BASES)),
    }
}

/// Acceptor window anchored on an exon's leading boundary.
///
/// Plus strand: `[start − 20, start + 2]`; minus strand mirrors to
/// `[end − 2, end + 20]`.
#[must_use]
pub fn acceptor_window_from_exon(exon: &Exon, strand: Strand) -> Option<(u64, u64)> {
    match strand {
        Strand::Reverse => Some((exon.end.checked_sub(ACCEPTOR_EXON_BASES - 1)?, exon.end + ACCEPTOR_INTRON_BASES)),
        _ => Some((exon.start.checked_sub(ACCEPTOR_INTRON_BASES)?, exon.start + ACCEPTOR_EXON_BASES - 1)),
    }
}

/// Donor window anchored on an intron's leading boundary.
///
/// Plus strand: `[start − 3, start + 5]`; minus strand mirrors to
/// `[end − 5, end + 3]`.
#[must_use]
pub fn donor_window_from_intron(intron: &Intron, strand: Strand) -> Option<(u64, u64)> {
    match strand {
        Strand::Reverse => Some((intron.end.checked_sub(DONOR_INTRON_BASES - 1)?, intron.end + DONOR_EXON_BASES)),
        _ => Some((intron.start.checked_sub(DONOR_EXON_BASES)?, intron.start + DONOR_INTRON_BASES - 1)),
    }
}

/// Acceptor window anchored on an intron's trailing boundary.
///
/// Plus strand: `[end − 19, end + 3]`; minus strand mirrors to
/// `[start − 3, start + 19]`.
#[must_use]
pub fn acceptor_window_from_intron(intron: &Intron, strand: Strand) -> Option<(u64, u64)> {
    match strand {
        Strand::Reverse => Some((intron.start.checked_sub(ACCEPTOR_EXON_BASES)?, intron.start + ACCEPTOR_INTRON_BASES - 1)),
        _ => Some((intron.end.checked_sub(ACCEPTOR_INTRON_BASES - 1)?, intron.end + ACCEPTOR_EXON_BASES)),
    }
}

/// Locates and scores the canonical splice sites around a variant's feature.
///
/// # Errors
///
/// Propagates only fatal table misses from the scorer; every per-site
/// condition results in an absent entry instead.
pub fn nearest_sites<S: SequenceSource + ?Sized>(
    scorer: &SpliceScorer,
    transcript: &Transcript,
    feature: FeatureLocation,
    source: &S,
) -> Result<NearestSites, SpliceError> {
    let strand = transcript.strand;
    let mut sites = NearestSites::default();

    match feature.kind {
        FeatureKind::Exon => {
            let exons = &transcript.exons;
            let Some(exon) = exons.get(feature.index) else {
                debug!(
                    "exon index {} outside transcript with {} exons",
                    feature.index,
                    exons.len()
                );
                return Ok(sites);
            };
            if feature.index > 0 {
                let previous = &exons[feature.index - 1];
                sites.upstream_donor = score_donor(
                    scorer,
                    source,
                    donor_window_from_exon(previous, strand),
                    strand,
                )?;
                sites.upstream_acceptor = score_acceptor(
                    scorer,
                    source,
                    acceptor_window_from_exon(exon, strand),
                    strand,
                )?;
            }
            if let Some(next) = exons.get(feature.index + 1) {
                sites.downstream_donor =
                    score_donor(scorer, source, donor_window_from_exon(exon, strand), strand)?;
                sites.downstream_acceptor = score_acceptor(
                    scorer,
                    source,
                    acceptor_window_from_exon(next, strand),
                    strand,
                )?;
            }
        }
        FeatureKind::Intron => {
            let introns = &transcript.introns;
            let Some(intron) = introns.get(feature.index) else {
                debug!(
                    "intron index {} outside transcript with {} introns",
                    feature.index,
                    introns.len()
                );
                return Ok(sites);
            };
            sites.upstream_donor = score_donor(
                scorer,
                source,
                donor_window_from_intron(intron, strand),
                strand,
            )?;
            sites.downstream_acceptor = score_acceptor(
                scorer,
                source,
                acceptor_window_from_intron(intron, strand),
                strand,
            )?;
            if feature.index > 0 {
                let previous = &introns[feature.index - 1];
                sites.upstream_acceptor = score_acceptor(
                    scorer,
                    source,
                    acceptor_window_from_intron(previous, strand),
                    strand,
                )?;
            }
            if let Some(next) = introns.get(feature.index + 1) {
                sites.downstream_donor = score_donor(
                    scorer,
                    source,
                    donor_window_from_intron(next, strand),
                    strand,
                )?;
            }
        }
    }

    Ok(sites)
}

fn score_donor<S: SequenceSource + ?Sized>(
    scorer: &SpliceScorer,
    source: &S,
    window: Option<(u64, u64)>,
    strand: Strand,
) -> Result<Option<SiteScore>, SpliceError> {
    score_window(source, window, strand, DONOR_WIDTH, |seq| scorer.score5(seq))
}

fn score_acceptor<S: SequenceSource + ?Sized>(
    scorer: &SpliceScorer,
    source: &S,
    window: Option<(u64, u64)>,
    strand: Strand,
) -> Result<Option<SiteScore>, SpliceError> {
    score_window(source, window, strand, ACCEPTOR_WIDTH, |seq| {
        scorer.score3(seq)
    })
}

fn score_window<S: SequenceSource + ?Sized>(
    source: &S,
    window: Option<(u64, u64)>,
    strand: Strand,
    width: usize,
    score: impl FnOnce(&str) -> Result<f64, SpliceError>,
) -> Result<Option<SiteScore>, SpliceError> {
    let Some((start, end)) = window else {
        return Ok(None);
    };
    let Some(sequence) = source.subsequence(start, end, strand) else {
        debug!("splice window {start}..={end} unavailable from sequence source");
        return Ok(None);
    };
    if sequence.len() != width || !is_acgt(&sequence) {
        debug!("splice window {start}..={end} is not scoreable: {sequence:?}");
        return Ok(None);
    }
    let score = score(&sequence)?;
    Ok(Some(SiteScore { sequence, score }))
}
