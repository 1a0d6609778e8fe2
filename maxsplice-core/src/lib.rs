//! # MaxSplice - Maximum-Entropy Splice Site Scoring
//!
//! A scoring core for assessing the effect of genetic variants on mRNA
//! splicing, built on a maximum-entropy probabilistic model of donor (5')
//! and acceptor (3') splice sites.
//!
//! ## Overview
//!
//! The crate scores how strongly a short genomic sequence resembles a
//! canonical splice site: 9 bases spanning an exon/intron junction for
//! donors, 23 bases spanning an intron/exon junction for acceptors. That
//! primitive drives three higher-level analyses for a variant annotation
//! pipeline:
//!
//! - **Junction scoring**: reference vs. alternate scores for the splice
//!   window a variant overlaps, and their difference
//! - **Sliding-window scan**: the best-scoring donor/acceptor k-mer in the
//!   sequence context around a variant, for both alleles
//! - **Nearest canonical sites**: scores of the real splice boundaries
//!   adjacent to the variant's exon or intron
//!
//! The host pipeline supplies transcript structure, variant alleles, and
//! genome sequence access (via the [`sequence::SequenceSource`] trait);
//! this crate owns only the model and the scoring algorithms.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maxsplice_core::config::MaxSpliceConfig;
//! use maxsplice_core::SpliceAnalyzer;
//!
//! let config = MaxSpliceConfig {
//!     model_dir: "/data/splicemodels".into(),
//!     sliding_window: true,
//!     nearest_sites: true,
//!     ..Default::default()
//! };
//!
//! let analyzer = SpliceAnalyzer::new(config)?;
//! let score = analyzer.scorer().score5("CAGGTAAGT")?;
//! println!("donor score: {score:.2}");
//! # Ok::<(), maxsplice_core::types::SpliceError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Analysis switches and the model directory
//! - [`engine`]: The variant scoring orchestrator
//! - [`scoring`]: The `score5`/`score3` scoring engine
//! - [`model`]: Model table loading
//! - [`cache`]: Bounded FIFO score memoization
//! - [`window`]: Sliding-window k-mer maximizer
//! - [`sites`]: Nearest-canonical-splice-site locator
//! - [`sequence`]: Validation, base-4 indexing, genome access seam
//! - [`results`]: Annotation payload and field flattening
//! - [`types`]: Input data types and errors
//! - [`constants`]: Fixed model geometry and probability tables
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, SpliceError>`](types::SpliceError).
//! Errors are reserved for configuration-level failures (missing model
//! files, lookup misses against loaded tables); expected per-variant
//! conditions produce partial or empty annotations instead.
//!
//! ## Concurrency
//!
//! Model tables are immutable after load and every analyzer method takes
//! `&self`, so one [`SpliceAnalyzer`] can serve multiple worker threads;
//! the score caches serialize their own mutations. See
//! [`engine::SpliceAnalyzer::annotate_batch`] for the built-in parallel
//! path.

pub mod cache;
pub mod config;
pub mod constants;
pub mod engine;
pub mod model;
pub mod results;
pub mod scoring;
pub mod sequence;
pub mod sites;
pub mod types;
pub mod window;

#[cfg(test)]
pub(crate) mod testutil;

pub use engine::SpliceAnalyzer;
