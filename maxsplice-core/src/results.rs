//! Annotation payload produced by the orchestrator.
//!
//! Results are typed sub-structures internally; [`SpliceAnnotation::fields`]
//! flattens them into the named scalar fields the host pipeline serializes.
//! Field presence is conditional: sub-results absent for a variant simply
//! contribute no fields, and sequence fields appear only when the analyzer
//! was configured to emit intermediate sequences.

use std::collections::BTreeMap;
use std::fmt;

use crate::sites::NearestSites;
use crate::types::{KmerHit, SpliceSiteKind};

/// A single named output value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A maximum-entropy score or score difference
    Score(f64),
    /// A 1-based k-mer frame position
    Frame(usize),
    /// An intermediate sequence
    Sequence(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Score(score) => write!(f, "{score:.3}"),
            Self::Frame(frame) => write!(f, "{frame}"),
            Self::Sequence(sequence) => write!(f, "{sequence}"),
        }
    }
}

/// Reference/alternate scores for the splice window a variant overlaps.
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionScores {
    /// Which kind of splice window matched
    pub site: SpliceSiteKind,
    /// Score of the reference window
    pub ref_score: f64,
    /// Score of the window with the alternate allele substituted
    pub alt_score: f64,
    /// `ref_score − alt_score`
    pub diff: f64,
    /// The reference window sequence, when sequence emission is enabled
    pub ref_sequence: Option<String>,
    /// The alternate window sequence, when sequence emission is enabled
    pub alt_sequence: Option<String>,
}

/// Sliding-window results for one site kind (donor or acceptor).
#[derive(Debug, Clone, PartialEq)]
pub struct SwaSiteScores {
    /// Best-scoring k-mer in the reference context
    pub reference: KmerHit,
    /// Best-scoring k-mer in the alternate context
    pub alternate: KmerHit,
    /// Reference comparison k-mer: the reference read in the best
    /// alternate frame for a single-nucleotide variant, the independently
    /// best reference k-mer otherwise
    pub comparison: KmerHit,
    /// `comparison.score − alternate.score`
    pub diff: f64,
}

/// Sliding-window results for both site kinds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwaScores {
    /// Donor-site scan, when the donor context was scoreable
    pub donor: Option<SwaSiteScores>,
    /// Acceptor-site scan, when the acceptor context was scoreable
    pub acceptor: Option<SwaSiteScores>,
}

/// Complete annotation for one variant/transcript pair.
///
/// Every sub-result is optional: a variant outside all splice windows, an
/// unavailable genome slice, or a disabled switch leaves the corresponding
/// entry `None` and the flattened field set smaller, never an error.
#[derive(Debug, Default)]
pub struct SpliceAnnotation {
    /// Scores for the overlapped splice window, if any
    pub junction: Option<JunctionScores>,
    /// Sliding-window maximizer results, when enabled
    pub swa: Option<SwaScores>,
    /// Nearest-canonical-splice-site results, when enabled
    pub ncss: Option<NearestSites>,
    emit_sequences: bool,
}

impl SpliceAnnotation {
    /// Creates an empty annotation.
    ///
    /// `emit_sequences` controls whether [`SpliceAnnotation::fields`]
    /// includes intermediate sequences alongside scores.
    #[must_use]
    pub fn new(emit_sequences: bool) -> Self {
        Self {
            emit_sequences,
            ..Self::default()
        }
    }

    /// Whether any sub-result is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.junction.is_none() && self.swa.is_none() && self.ncss.is_none()
    }

    /// Flattens the annotation into named fields for the host pipeline.
    pub fn fields(&self) -> BTreeMap<&'static str, FieldValue> {
        let mut fields = BTreeMap::new();

        if let Some(junction) = &self.junction {
            fields.insert("maxent_ref", FieldValue::Score(junction.ref_score));
            fields.insert("maxent_alt", FieldValue::Score(junction.alt_score));
            fields.insert("maxent_diff", FieldValue::Score(junction.diff));
            if self.emit_sequences {
                if let Some(seq) = &junction.ref_sequence {
                    fields.insert("maxent_ref_seq", FieldValue::Sequence(seq.clone()));
                }
                if let Some(seq) = &junction.alt_sequence {
                    fields.insert("maxent_alt_seq", FieldValue::Sequence(seq.clone()));
                }
            }
        }

        if let Some(swa) = &self.swa {
            if let Some(donor) = &swa.donor {
                self.insert_swa_site(&mut fields, donor, SWA_DONOR_FIELDS);
            }
            if let Some(acceptor) = &swa.acceptor {
                self.insert_swa_site(&mut fields, acceptor, SWA_ACCEPTOR_FIELDS);
            }
        }

        if let Some(ncss) = &self.ncss {
            self.insert_ncss_site(&mut fields, ncss.upstream_donor.as_ref(), NCSS_UPSTREAM_DONOR);
            self.insert_ncss_site(
                &mut fields,
                ncss.upstream_acceptor.as_ref(),
                NCSS_UPSTREAM_ACCEPTOR,
            );
            self.insert_ncss_site(
                &mut fields,
                ncss.downstream_donor.as_ref(),
                NCSS_DOWNSTREAM_DONOR,
            );
            self.insert_ncss_site(
                &mut fields,
                ncss.downstream_acceptor.as_ref(),
                NCSS_DOWNSTREAM_ACCEPTOR,
            );
        }

        fields
    }

    fn insert_swa_site(
        &self,
        fields: &mut BTreeMap<&'static str, FieldValue>,
        site: &SwaSiteScores,
        names: SwaFieldNames,
    ) {
        fields.insert(names.ref_score, FieldValue::Score(site.reference.score));
        fields.insert(names.alt_score, FieldValue::Score(site.alternate.score));
        fields.insert(names.comp_score, FieldValue::Score(site.comparison.score));
        fields.insert(names.diff, FieldValue::Score(site.diff));
        fields.insert(names.alt_frame, FieldValue::Frame(site.alternate.frame));
        if self.emit_sequences {
            fields.insert(
                names.ref_seq,
                FieldValue::Sequence(site.reference.kmer.clone()),
            );
            fields.insert(
                names.alt_seq,
                FieldValue::Sequence(site.alternate.kmer.clone()),
            );
            fields.insert(
                names.comp_seq,
                FieldValue::Sequence(site.comparison.kmer.clone()),
            );
        }
    }

    fn insert_ncss_site(
        &self,
        fields: &mut BTreeMap<&'static str, FieldValue>,
        site: Option<&crate::sites::SiteScore>,
        names: NcssFieldNames,
    ) {
        let Some(site) = site else { return };
        fields.insert(names.score, FieldValue::Score(site.score));
        if self.emit_sequences {
            fields.insert(names.seq, FieldValue::Sequence(site.sequence.clone()));
        }
    }
}

struct SwaFieldNames {
    ref_score: &'static str,
    alt_score: &'static str,
    comp_score: &'static str,
    diff: &'static str,
    alt_frame: &'static str,
    ref_seq: &'static str,
    alt_seq: &'static str,
    comp_seq: &'static str,
}

const SWA_DONOR_FIELDS: SwaFieldNames = SwaFieldNames {
    ref_score: "swa_donor_ref",
    alt_score: "swa_donor_alt",
    comp_score: "swa_donor_ref_comp",
    diff: "swa_donor_diff",
    alt_frame: "swa_donor_alt_frame",
    ref_seq: "swa_donor_ref_seq",
    alt_seq: "swa_donor_alt_seq",
    comp_seq: "swa_donor_comp_seq",
};

const SWA_ACCEPTOR_FIELDS: SwaFieldNames = SwaFieldNames {
    ref_score: "swa_acceptor_ref",
    alt_score: "swa_acceptor_alt",
    comp_score: "swa_acceptor_ref_comp",
    diff: "swa_acceptor_diff",
    alt_frame: "swa_acceptor_alt_frame",
    ref_seq: "swa_acceptor_ref_seq",
    alt_seq: "swa_acceptor_alt_seq",
    comp_seq: "swa_acceptor_comp_seq",
};

struct NcssFieldNames {
    score: &'static str,
    seq: &'static str,
}

const NCSS_UPSTREAM_DONOR: NcssFieldNames = NcssFieldNames {
    score: "ncss_upstream_donor",
    seq: "ncss_upstream_donor_seq",
};

const NCSS_UPSTREAM_ACCEPTOR: NcssFieldNames = NcssFieldNames {
    score: "ncss_upstream_acceptor",
    seq: "ncss_upstream_acceptor_seq",
};

const NCSS_DOWNSTREAM_DONOR: NcssFieldNames = NcssFieldNames {
    score: "ncss_downstream_donor",
    seq: "ncss_downstream_donor_seq",
};

const NCSS_DOWNSTREAM_ACCEPTOR: NcssFieldNames = NcssFieldNames {
    score: "ncss_downstream_acceptor",
    seq: "ncss_downstream_acceptor_seq",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::SiteScore;

    fn kmer(seq: &str, frame: usize, score: f64) -> KmerHit {
        KmerHit {
            kmer: seq.to_string(),
            frame,
            score,
        }
    }

    #[test]
    fn test_empty_annotation_has_no_fields() {
        let annotation = SpliceAnnotation::new(true);
        assert!(annotation.is_empty());
        assert!(annotation.fields().is_empty());
    }

    #[test]
    fn test_junction_fields_gate_sequences() {
        let junction = JunctionScores {
            site: SpliceSiteKind::Donor,
            ref_score: 8.5,
            alt_score: 1.25,
            diff: 7.25,
            ref_sequence: Some("AAGGTAAGT".to_string()),
            alt_sequence: Some("ACGGTAAGT".to_string()),
        };

        let mut quiet = SpliceAnnotation::new(false);
        quiet.junction = Some(junction.clone());
        let fields = quiet.fields();
        assert_eq!(fields.get("maxent_ref"), Some(&FieldValue::Score(8.5)));
        assert_eq!(fields.get("maxent_diff"), Some(&FieldValue::Score(7.25)));
        assert!(!fields.contains_key("maxent_ref_seq"));

        let mut verbose = SpliceAnnotation::new(true);
        verbose.junction = Some(junction);
        let fields = verbose.fields();
        assert_eq!(
            fields.get("maxent_alt_seq"),
            Some(&FieldValue::Sequence("ACGGTAAGT".to_string()))
        );
    }

    #[test]
    fn test_swa_fields() {
        let mut annotation = SpliceAnnotation::new(false);
        annotation.swa = Some(SwaScores {
            donor: Some(SwaSiteScores {
                reference: kmer("AAGGTAAGT", 3, 7.0),
                alternate: kmer("ACGGTAAGT", 5, 2.0),
                comparison: kmer("AAGGTAAGT", 5, 6.5),
                diff: 4.5,
            }),
            acceptor: None,
        });

        let fields = annotation.fields();
        assert_eq!(fields.get("swa_donor_ref"), Some(&FieldValue::Score(7.0)));
        assert_eq!(
            fields.get("swa_donor_alt_frame"),
            Some(&FieldValue::Frame(5))
        );
        assert_eq!(
            fields.get("swa_donor_ref_comp"),
            Some(&FieldValue::Score(6.5))
        );
        assert!(!fields.contains_key("swa_acceptor_ref"));
        assert!(!fields.contains_key("swa_donor_ref_seq"));
    }

    #[test]
    fn test_ncss_fields_only_present_sites() {
        let mut annotation = SpliceAnnotation::new(true);
        annotation.ncss = Some(NearestSites {
            upstream_donor: Some(SiteScore {
                sequence: "CAGGTAAGT".to_string(),
                score: 10.1,
            }),
            ..NearestSites::default()
        });

        let fields = annotation.fields();
        assert_eq!(
            fields.get("ncss_upstream_donor"),
            Some(&FieldValue::Score(10.1))
        );
        assert_eq!(
            fields.get("ncss_upstream_donor_seq"),
            Some(&FieldValue::Sequence("CAGGTAAGT".to_string()))
        );
        assert!(!fields.contains_key("ncss_downstream_donor"));
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Score(7.25).to_string(), "7.250");
        assert_eq!(FieldValue::Frame(5).to_string(), "5");
        assert_eq!(
            FieldValue::Sequence("ACGT".to_string()).to_string(),
            "ACGT"
        );
    }
}
