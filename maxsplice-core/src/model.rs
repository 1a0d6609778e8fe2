//! Maximum-entropy model tables and their on-disk loader.
//!
//! The model ships as plain text files, one record per line, with no header
//! or version marker. Line order is load-bearing: line *i* of the 5'
//! sequence matrix names the 7-base key whose score sits on line *i* of the
//! 5' score matrix. That correspondence exists only at load time and is
//! preserved here verbatim.
//!
//! Beyond file readability no validation is performed. A malformed numeric
//! line is stored as NaN and surfaces through the scores it contaminates,
//! matching the behavior of an untyped table lookup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::constants::{
    ACCEPTOR_TABLE_COUNT, SCORE3_TABLE_PREFIX, SCORE5_MATRIX_FILE, SCORE5_SEQUENCE_FILE,
};
use crate::types::SpliceError;

/// Immutable maximum-entropy lookup tables.
///
/// Built once at startup from a model directory (or directly from in-memory
/// tables via [`MaxEntModel::from_tables`]) and read-only for the process
/// lifetime, so the model is freely shared across concurrent callers.
#[derive(Debug)]
pub struct MaxEntModel {
    /// 5' score matrix: index (file line order) to score
    donor_scores: Vec<f64>,
    /// 5' sequence matrix: 7-base key to score matrix index
    donor_index: HashMap<String, usize>,
    /// The nine 3' sub-tables, keyed by base-4 sequence index
    acceptor_tables: [Vec<f64>; ACCEPTOR_TABLE_COUNT],
}

impl MaxEntModel {
    /// Loads the model from a directory holding the fixed-format table files.
    ///
    /// Expects `me2x5`, `splice5sequences`, and `me2x3acc1` through
    /// `me2x3acc9` directly under `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::ModelLoad`] when any file is missing or
    /// unreadable. Malformed content is not detected here; it propagates as
    /// NaN scores or lookup misses later.
    pub fn from_dir(dir: &Path) -> Result<Self, SpliceError> {
        let donor_scores = read_score_lines(&dir.join(SCORE5_MATRIX_FILE))?;
        let donor_index = read_sequence_lines(&dir.join(SCORE5_SEQUENCE_FILE))?;

        let mut acceptor_tables: [Vec<f64>; ACCEPTOR_TABLE_COUNT] = Default::default();
        for (table_number, table) in acceptor_tables.iter_mut().enumerate() {
            let file_name = format!("{}{}", SCORE3_TABLE_PREFIX, table_number + 1);
            *table = read_score_lines(&dir.join(file_name))?;
        }

        Ok(Self {
            donor_scores,
            donor_index,
            acceptor_tables,
        })
    }

    /// Builds a model from already-materialized tables.
    ///
    /// `donor_sequences` is consumed in order, so entry *i* keys
    /// `donor_scores[i]`, the same correspondence the file loader preserves.
    #[must_use]
    pub fn from_tables(
        donor_scores: Vec<f64>,
        donor_sequences: Vec<String>,
        acceptor_tables: [Vec<f64>; ACCEPTOR_TABLE_COUNT],
    ) -> Self {
        let donor_index = donor_sequences
            .into_iter()
            .enumerate()
            .map(|(index, key)| (key, index))
            .collect();
        Self {
            donor_scores,
            donor_index,
            acceptor_tables,
        }
    }

    /// Looks up the 5' table score for a 7-base rest sequence.
    ///
    /// # Errors
    ///
    /// [`SpliceError::TableMiss`] when the key is absent from the sequence
    /// matrix or its index falls outside the score matrix; either indicates
    /// a corrupt or mismatched model file set.
    pub fn donor_table_score(&self, rest: &str) -> Result<f64, SpliceError> {
        let index = *self
            .donor_index
            .get(rest)
            .ok_or_else(|| SpliceError::TableMiss {
                table: SCORE5_SEQUENCE_FILE,
                key: rest.to_string(),
            })?;
        self.donor_scores
            .get(index)
            .copied()
            .ok_or_else(|| SpliceError::TableMiss {
                table: SCORE5_MATRIX_FILE,
                key: index.to_string(),
            })
    }

    /// Looks up one of the nine 3' sub-tables by base-4 key.
    ///
    /// # Errors
    ///
    /// [`SpliceError::TableMiss`] when the key falls outside the table.
    pub fn acceptor_table_score(&self, table_number: usize, key: usize) -> Result<f64, SpliceError> {
        self.acceptor_tables
            .get(table_number)
            .and_then(|table| table.get(key))
            .copied()
            .ok_or_else(|| SpliceError::TableMiss {
                table: SCORE3_TABLE_PREFIX,
                key: format!("{}:{}", table_number + 1, key),
            })
    }

    /// Number of entries in the 5' score matrix.
    #[must_use]
    pub fn donor_score_count(&self) -> usize {
        self.donor_scores.len()
    }

    /// Number of keys in the 5' sequence matrix.
    #[must_use]
    pub fn donor_sequence_count(&self) -> usize {
        self.donor_index.len()
    }
}

/// Reads one f64 per line, preserving line order; unparseable lines load as NaN.
fn read_score_lines(path: &Path) -> Result<Vec<f64>, SpliceError> {
    let contents = fs::read_to_string(path).map_err(|source| SpliceError::ModelLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(|line| line.trim().parse().unwrap_or(f64::NAN))
        .collect())
}

/// Reads one sequence key per line; line number becomes the key's index.
fn read_sequence_lines(path: &Path) -> Result<HashMap<String, usize>, SpliceError> {
    let contents = fs::read_to_string(path).map_err(|source| SpliceError::ModelLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .enumerate()
        .map(|(index, line)| (line.trim().to_string(), index))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_model_dir(donor_scores: &[&str], donor_sequences: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        let mut matrix = File::create(dir.path().join(SCORE5_MATRIX_FILE)).unwrap();
        for line in donor_scores {
            writeln!(matrix, "{line}").unwrap();
        }
        let mut sequences = File::create(dir.path().join(SCORE5_SEQUENCE_FILE)).unwrap();
        for line in donor_sequences {
            writeln!(sequences, "{line}").unwrap();
        }
        for table_number in 1..=ACCEPTOR_TABLE_COUNT {
            let mut table =
                File::create(dir.path().join(format!("{SCORE3_TABLE_PREFIX}{table_number}")))
                    .unwrap();
            writeln!(table, "1.0").unwrap();
            writeln!(table, "2.0").unwrap();
        }
        dir
    }

    #[test]
    fn test_from_dir_preserves_line_order() {
        let dir = write_model_dir(&["0.5", "2.0", "8.0"], &["AAAAAAA", "CAGAAGT", "TTTTTTT"]);
        let model = MaxEntModel::from_dir(dir.path()).unwrap();

        assert_eq!(model.donor_score_count(), 3);
        assert_eq!(model.donor_sequence_count(), 3);
        assert_eq!(model.donor_table_score("AAAAAAA").unwrap(), 0.5);
        assert_eq!(model.donor_table_score("CAGAAGT").unwrap(), 2.0);
        assert_eq!(model.donor_table_score("TTTTTTT").unwrap(), 8.0);
    }

    #[test]
    fn test_from_dir_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = MaxEntModel::from_dir(dir.path());
        assert!(matches!(result, Err(SpliceError::ModelLoad { .. })));
    }

    #[test]
    fn test_malformed_line_loads_as_nan() {
        let dir = write_model_dir(&["0.5", "not-a-number"], &["AAAAAAA", "CCCCCCC"]);
        let model = MaxEntModel::from_dir(dir.path()).unwrap();
        assert!(model.donor_table_score("CCCCCCC").unwrap().is_nan());
    }

    #[test]
    fn test_table_miss_on_unknown_key() {
        let dir = write_model_dir(&["0.5"], &["AAAAAAA"]);
        let model = MaxEntModel::from_dir(dir.path()).unwrap();
        let result = model.donor_table_score("GGGGGGG");
        assert!(matches!(result, Err(SpliceError::TableMiss { .. })));
    }

    #[test]
    fn test_mismatched_matrices_miss_on_score_side() {
        // Sequence matrix longer than score matrix: key resolves, index does not.
        let dir = write_model_dir(&["0.5"], &["AAAAAAA", "CCCCCCC"]);
        let model = MaxEntModel::from_dir(dir.path()).unwrap();
        assert!(matches!(
            model.donor_table_score("CCCCCCC"),
            Err(SpliceError::TableMiss { .. })
        ));
    }

    #[test]
    fn test_acceptor_table_lookup() {
        let dir = write_model_dir(&["0.5"], &["AAAAAAA"]);
        let model = MaxEntModel::from_dir(dir.path()).unwrap();
        assert_eq!(model.acceptor_table_score(0, 1).unwrap(), 2.0);
        assert!(matches!(
            model.acceptor_table_score(0, 2),
            Err(SpliceError::TableMiss { .. })
        ));
        assert!(matches!(
            model.acceptor_table_score(9, 0),
            Err(SpliceError::TableMiss { .. })
        ));
    }
}
