use std::path::PathBuf;

/// Configuration for splice-site annotation.
///
/// Every switch is an explicit named field, resolved once when the
/// analyzer is built; nothing downstream re-inspects option maps.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use maxsplice_core::config::MaxSpliceConfig;
///
/// let config = MaxSpliceConfig::default();
/// assert!(!config.sliding_window);
/// ```
///
/// ## Full annotation with sequences
///
/// ```rust
/// use maxsplice_core::config::MaxSpliceConfig;
///
/// let config = MaxSpliceConfig {
///     model_dir: "/data/splicemodels".into(),
///     sliding_window: true,
///     nearest_sites: true,
///     emit_sequences: true,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct MaxSpliceConfig {
    /// Directory holding the model table files.
    ///
    /// Must contain `me2x5`, `splice5sequences`, and `me2x3acc1` through
    /// `me2x3acc9`.
    ///
    /// **Default**: `splicemodels`
    pub model_dir: PathBuf,

    /// Run the sliding-window maximizer around each variant.
    ///
    /// Scans ±8 bases of context for the best donor k-mer and ±22 for the
    /// best acceptor k-mer, in both reference and alternate sequences.
    ///
    /// **Default**: `false`
    pub sliding_window: bool,

    /// Score the canonical splice sites nearest to each variant.
    ///
    /// Requires the host to supply the variant's enclosing exon or intron
    /// location; skipped silently otherwise.
    ///
    /// **Default**: `false`
    pub nearest_sites: bool,

    /// Include intermediate sequences in the flattened field output.
    ///
    /// When `false` only scores and frame positions are emitted.
    ///
    /// **Default**: `false`
    pub emit_sequences: bool,
}

impl Default for MaxSpliceConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("splicemodels"),
            sliding_window: false,
            nearest_sites: false,
            emit_sequences: false,
        }
    }
}
