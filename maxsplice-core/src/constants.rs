// =============================================================================
// =============================================================================

/// Width of a donor (5') splice site sequence in bases
pub const DONOR_WIDTH: usize = 9;

/// Width of an acceptor (3') splice site sequence in bases
pub const ACCEPTOR_WIDTH: usize = 23;

/// Number of exonic bases in a donor site window
pub const DONOR_EXON_BASES: u64 = 3;

/// Number of intronic bases in a donor site window
pub const DONOR_INTRON_BASES: u64 = 6;

/// Number of intronic bases in an acceptor site window
pub const ACCEPTOR_INTRON_BASES: u64 = 20;

/// Number of exonic bases in an acceptor site window
pub const ACCEPTOR_EXON_BASES: u64 = 3;

/// Length of the donor "rest" sequence once consensus positions are removed
pub const DONOR_REST_LEN: usize = 7;

/// Length of the acceptor "rest" sequence once consensus positions are removed
pub const ACCEPTOR_REST_LEN: usize = 21;

/// Zero-based consensus dinucleotide positions within a donor sequence
pub const DONOR_CONSENSUS_POSITIONS: [usize; 2] = [3, 4];

/// Zero-based consensus dinucleotide positions within an acceptor sequence
pub const ACCEPTOR_CONSENSUS_POSITIONS: [usize; 2] = [18, 19];

// =============================================================================
// =============================================================================

/// Genomic background nucleotide frequencies, indexed A, C, G, T
pub const BACKGROUND_FREQUENCIES: [f64; 4] = [0.27, 0.23, 0.23, 0.27];

/// Donor consensus probabilities at position 4 (the first intronic base)
pub const DONOR_CONSENSUS_P4: [f64; 4] = [0.004, 0.0032, 0.9896, 0.0032];

/// Donor consensus probabilities at position 5
pub const DONOR_CONSENSUS_P5: [f64; 4] = [0.0034, 0.0039, 0.0042, 0.9884];

/// Acceptor consensus probabilities at position 19
pub const ACCEPTOR_CONSENSUS_P19: [f64; 4] = [0.9903, 0.0032, 0.0034, 0.0030];

/// Acceptor consensus probabilities at position 20
pub const ACCEPTOR_CONSENSUS_P20: [f64; 4] = [0.0027, 0.0037, 0.9905, 0.0030];

/// The nine (start, length) sub-sequences of the 21-base acceptor rest string
/// used by the maximum-entropy combination. The first five feed the numerator,
/// the remaining four the denominator.
pub const ACCEPTOR_SUBSTRINGS: [(usize, usize); 9] = [
    (0, 7),
    (7, 7),
    (14, 7),
    (4, 7),
    (11, 7),
    (4, 3),
    (7, 4),
    (11, 3),
    (14, 4),
];

/// Number of acceptor sub-tables contributing to the numerator product
pub const ACCEPTOR_NUMERATOR_TABLES: usize = 5;

/// Total number of acceptor sub-tables
pub const ACCEPTOR_TABLE_COUNT: usize = 9;

// =============================================================================
// =============================================================================

/// Capacity of each score memoization cache
pub const CACHE_CAPACITY: usize = 50;

/// Search margin around an intron within which a variant can touch a splice window
pub const SPLICE_REGION_MARGIN: u64 = 21;

/// Flank width of the sliding-window context around a variant for donor scans
pub const DONOR_CONTEXT_FLANK: u64 = 8;

/// Flank width of the sliding-window context around a variant for acceptor scans
pub const ACCEPTOR_CONTEXT_FLANK: u64 = 22;

// =============================================================================
// =============================================================================

/// File holding the 5' maximum-entropy score matrix, one value per line
pub const SCORE5_MATRIX_FILE: &str = "me2x5";

/// File holding the 5' sequence matrix, one 7-base key per line
pub const SCORE5_SEQUENCE_FILE: &str = "splice5sequences";

/// File name prefix of the nine 3' sub-table files (suffixed 1 through 9)
pub const SCORE3_TABLE_PREFIX: &str = "me2x3acc";
