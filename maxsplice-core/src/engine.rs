//! The variant scoring orchestrator.
//!
//! [`SpliceAnalyzer`] owns the configuration and the scoring context, and
//! turns one variant/transcript pair into an annotation: it finds the
//! intron whose splice windows the variant can touch, scores the overlapped
//! window with reference and alternate alleles, and optionally drives the
//! sliding-window maximizer and the nearest-canonical-splice-site locator.
//!
//! Per-variant conditions (no nearby intron, unavailable slice, non-ACGT
//! bases, allele shapes that break the fixed window width) silently shrink
//! the result; only a corrupt model set surfaces as an error.

use log::debug;
use rayon::prelude::*;

use crate::config::MaxSpliceConfig;
use crate::constants::{
    ACCEPTOR_CONTEXT_FLANK, ACCEPTOR_WIDTH, DONOR_CONTEXT_FLANK, DONOR_WIDTH,
    SPLICE_REGION_MARGIN,
};
use crate::model::MaxEntModel;
use crate::results::{JunctionScores, SpliceAnnotation, SwaScores, SwaSiteScores};
use crate::scoring::SpliceScorer;
use crate::sequence::{is_acgt, substitute_allele, SequenceSource};
use crate::sites::{acceptor_window_from_intron, donor_window_from_intron, nearest_sites};
use crate::types::{
    FeatureLocation, Intron, KmerHit, SpliceError, SpliceSiteKind, Transcript, Variant,
    VariantShape,
};
use crate::window::{best_acceptor, best_donor};

use bio::bio_types::strand::Strand;

/// One unit of batch annotation work.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationJob<'a> {
    /// The variant to score
    pub variant: &'a Variant,
    /// The transcript it is annotated against
    pub transcript: &'a Transcript,
    /// The variant's enclosing feature, when the host knows it
    pub feature: Option<FeatureLocation>,
}

/// Main analysis facade: configuration plus the scoring context.
///
/// An analyzer is built once per process, after which it is read-only and
/// can be shared across worker threads; the score caches serialize their
/// own mutations.
///
/// # Examples
///
/// ```rust,no_run
/// use maxsplice_core::config::MaxSpliceConfig;
/// use maxsplice_core::SpliceAnalyzer;
///
/// let config = MaxSpliceConfig {
///     model_dir: "/data/splicemodels".into(),
///     sliding_window: true,
///     ..Default::default()
/// };
/// let analyzer = SpliceAnalyzer::new(config)?;
/// # Ok::<(), maxsplice_core::types::SpliceError>(())
/// ```
#[derive(Debug)]
pub struct SpliceAnalyzer {
    /// Configuration resolved at startup
    pub config: MaxSpliceConfig,
    scorer: SpliceScorer,
}

impl SpliceAnalyzer {
    /// Builds an analyzer, loading the model tables from
    /// [`MaxSpliceConfig::model_dir`].
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::ModelLoad`] when the model directory or any
    /// table file is missing or unreadable.
    pub fn new(config: MaxSpliceConfig) -> Result<Self, SpliceError> {
        let model = MaxEntModel::from_dir(&config.model_dir)?;
        Ok(Self::with_model(config, model))
    }

    /// Builds an analyzer around already-loaded model tables.
    #[must_use]
    pub fn with_model(config: MaxSpliceConfig, model: MaxEntModel) -> Self {
        Self {
            config,
            scorer: SpliceScorer::new(model),
        }
    }

    /// The scoring context backing this analyzer.
    #[must_use]
    pub fn scorer(&self) -> &SpliceScorer {
        &self.scorer
    }

    /// Annotates one variant against one transcript.
    ///
    /// Returns a partial or empty annotation for every per-variant
    /// condition; see the module documentation for the failure policy.
    ///
    /// # Errors
    ///
    /// Only fatal scoring errors ([`SpliceError::TableMiss`]) escape, and
    /// only once a window actually reaches the scoring engine.
    pub fn annotate<S: SequenceSource + ?Sized>(
        &self,
        variant: &Variant,
        transcript: &Transcript,
        source: &S,
        feature: Option<FeatureLocation>,
    ) -> Result<SpliceAnnotation, SpliceError> {
        let mut annotation = SpliceAnnotation::new(self.config.emit_sequences);
        let strand = transcript.strand;

        let Some(intron) = find_splice_intron(variant, transcript) else {
            debug!(
                "variant {}..={} is outside every splice region of the transcript",
                variant.start, variant.end
            );
            return Ok(annotation);
        };

        annotation.junction = self.junction_scores(variant, intron, strand, source)?;

        if self.config.sliding_window {
            annotation.swa = self.swa_scores(variant, strand, source)?;
        }

        if self.config.nearest_sites {
            if let Some(feature) = feature {
                annotation.ncss = Some(nearest_sites(&self.scorer, transcript, feature, source)?);
            }
        }

        Ok(annotation)
    }

    /// Annotates independent variant/transcript pairs in parallel.
    ///
    /// The model tables are shared read-only across workers; cache
    /// mutations serialize behind their per-cache locks.
    ///
    /// # Errors
    ///
    /// As for [`SpliceAnalyzer::annotate`]; the first fatal error aborts
    /// the batch.
    pub fn annotate_batch<S>(
        &self,
        jobs: &[AnnotationJob<'_>],
        source: &S,
    ) -> Result<Vec<SpliceAnnotation>, SpliceError>
    where
        S: SequenceSource + Sync,
    {
        jobs.par_iter()
            .map(|job| self.annotate(job.variant, job.transcript, source, job.feature))
            .collect()
    }

    /// Scores the first splice window the variant overlaps, donor first.
    fn junction_scores<S: SequenceSource + ?Sized>(
        &self,
        variant: &Variant,
        intron: &Intron,
        strand: Strand,
        source: &S,
    ) -> Result<Option<JunctionScores>, SpliceError> {
        let candidates = [
            (
                SpliceSiteKind::Donor,
                donor_window_from_intron(intron, strand),
                DONOR_WIDTH,
            ),
            (
                SpliceSiteKind::Acceptor,
                acceptor_window_from_intron(intron, strand),
                ACCEPTOR_WIDTH,
            ),
        ];

        for (site, window, width) in candidates {
            let Some((window_start, window_end)) = window else {
                continue;
            };
            if variant.start > window_end || variant.end < window_start {
                continue;
            }
            return self.score_junction(
                site,
                window_start,
                window_end,
                width,
                variant,
                strand,
                source,
            );
        }
        Ok(None)
    }

    #[allow(clippy::too_many_arguments)]
    fn score_junction<S: SequenceSource + ?Sized>(
        &self,
        site: SpliceSiteKind,
        window_start: u64,
        window_end: u64,
        width: usize,
        variant: &Variant,
        strand: Strand,
        source: &S,
    ) -> Result<Option<JunctionScores>, SpliceError> {
        let Some(ref_sequence) = source.subsequence(window_start, window_end, strand) else {
            debug!("{site} window {window_start}..={window_end} unavailable");
            return Ok(None);
        };
        if ref_sequence.len() != width || !is_acgt(&ref_sequence) {
            debug!("{site} window {window_start}..={window_end} is not scoreable");
            return Ok(None);
        }

        let offset = match strand {
            Strand::Reverse => window_end.checked_sub(variant.end),
            _ => variant.start.checked_sub(window_start),
        };
        let Some(offset) = offset else {
            debug!("variant extends past the {site} window boundary");
            return Ok(None);
        };
        let Some(alt_sequence) = substitute_allele(
            &ref_sequence,
            offset as usize,
            variant.ref_len as usize,
            &variant.alt_allele,
        ) else {
            debug!("variant alleles do not fit the {site} window");
            return Ok(None);
        };
        if alt_sequence.len() != width || !is_acgt(&alt_sequence) {
            debug!("alternate {site} window is not scoreable");
            return Ok(None);
        }

        let (ref_score, alt_score) = match site {
            SpliceSiteKind::Donor => (
                self.scorer.score5(&ref_sequence)?,
                self.scorer.score5(&alt_sequence)?,
            ),
            SpliceSiteKind::Acceptor => (
                self.scorer.score3(&ref_sequence)?,
                self.scorer.score3(&alt_sequence)?,
            ),
        };

        let emit = self.config.emit_sequences;
        Ok(Some(JunctionScores {
            site,
            ref_score,
            alt_score,
            diff: ref_score - alt_score,
            ref_sequence: emit.then_some(ref_sequence),
            alt_sequence: emit.then_some(alt_sequence),
        }))
    }

    fn swa_scores<S: SequenceSource + ?Sized>(
        &self,
        variant: &Variant,
        strand: Strand,
        source: &S,
    ) -> Result<Option<SwaScores>, SpliceError> {
        let donor = self.swa_site(variant, strand, source, SpliceSiteKind::Donor)?;
        let acceptor = self.swa_site(variant, strand, source, SpliceSiteKind::Acceptor)?;
        if donor.is_none() && acceptor.is_none() {
            return Ok(None);
        }
        Ok(Some(SwaScores { donor, acceptor }))
    }

    /// Scans the context around the variant for the best-scoring k-mer of
    /// one site kind, in both reference and alternate sequences.
    fn swa_site<S: SequenceSource + ?Sized>(
        &self,
        variant: &Variant,
        strand: Strand,
        source: &S,
        site: SpliceSiteKind,
    ) -> Result<Option<SwaSiteScores>, SpliceError> {
        let (width, flank) = match site {
            SpliceSiteKind::Donor => (DONOR_WIDTH, DONOR_CONTEXT_FLANK),
            SpliceSiteKind::Acceptor => (ACCEPTOR_WIDTH, ACCEPTOR_CONTEXT_FLANK),
        };

        let Some(context_start) = variant.start.checked_sub(flank) else {
            return Ok(None);
        };
        let context_end = variant.end + flank;
        let Some(ref_context) = source.subsequence(context_start, context_end, strand) else {
            debug!("{site} scan context {context_start}..={context_end} unavailable");
            return Ok(None);
        };
        if !is_acgt(&ref_context) {
            debug!("{site} scan context contains non-ACGT bases");
            return Ok(None);
        }

        // The variant sits `flank` bases into the context on either strand.
        let Some(alt_context) = substitute_allele(
            &ref_context,
            flank as usize,
            variant.ref_len as usize,
            &variant.alt_allele,
        ) else {
            return Ok(None);
        };
        if !is_acgt(&alt_context) {
            debug!("alternate {site} scan context contains non-ACGT bases");
            return Ok(None);
        }

        let scan = |seq: &str| match site {
            SpliceSiteKind::Donor => best_donor(&self.scorer, seq),
            SpliceSiteKind::Acceptor => best_acceptor(&self.scorer, seq),
        };
        let (Some(reference), Some(alternate)) = (scan(&ref_context)?, scan(&alt_context)?) else {
            return Ok(None);
        };

        let comparison = match variant.shape {
            VariantShape::SingleNucleotide => {
                // Reference bases read in the frame of the best alternate k-mer.
                let start = alternate.frame - 1;
                let Some(kmer) = ref_context.get(start..start + width) else {
                    return Ok(None);
                };
                let score = match site {
                    SpliceSiteKind::Donor => self.scorer.score5(kmer)?,
                    SpliceSiteKind::Acceptor => self.scorer.score3(kmer)?,
                };
                KmerHit {
                    kmer: kmer.to_string(),
                    frame: alternate.frame,
                    score,
                }
            }
            VariantShape::Other => reference.clone(),
        };

        let diff = comparison.score - alternate.score;
        Ok(Some(SwaSiteScores {
            reference,
            alternate,
            comparison,
            diff,
        }))
    }
}

/// First intron whose splice region (boundaries ± the search margin)
/// overlaps the variant.
fn find_splice_intron<'t>(variant: &Variant, transcript: &'t Transcript) -> Option<&'t Intron> {
    transcript.introns.iter().find(|intron| {
        let region_start = intron.start.saturating_sub(SPLICE_REGION_MARGIN);
        let region_end = intron.end + SPLICE_REGION_MARGIN;
        variant.start <= region_end && variant.end >= region_start
    })
}
