//! Shared fixtures for unit tests.

use bio::bio_types::strand::Strand;

use crate::constants::{ACCEPTOR_SUBSTRINGS, ACCEPTOR_TABLE_COUNT};
use crate::model::MaxEntModel;
use crate::sequence::{reverse_complement, SequenceSource};

/// Decodes a base-4 index back into an ACGT string of the given length.
pub(crate) fn decode_base4(mut index: usize, length: usize) -> String {
    let mut bases = vec![b'A'; length];
    for slot in bases.iter_mut().rev() {
        *slot = b"ACGT"[index % 4];
        index /= 4;
    }
    String::from_utf8(bases).unwrap()
}

/// A full synthetic model: every 7-base donor rest sequence present with a
/// distinct deterministic score, acceptor sub-tables sized to their
/// fragment lengths.
pub(crate) fn synthetic_model() -> MaxEntModel {
    let count = 4usize.pow(7);
    let donor_scores: Vec<f64> = (0..count).map(|i| 0.25 + (i % 97) as f64 / 13.0).collect();
    let donor_sequences: Vec<String> = (0..count).map(|i| decode_base4(i, 7)).collect();

    let mut acceptor_tables: [Vec<f64>; ACCEPTOR_TABLE_COUNT] = Default::default();
    for (table_number, table) in acceptor_tables.iter_mut().enumerate() {
        let (_, length) = ACCEPTOR_SUBSTRINGS[table_number];
        let size = 4usize.pow(length as u32);
        *table = (0..size).map(|i| 0.5 + (i % 31) as f64 / 7.0).collect();
    }

    MaxEntModel::from_tables(donor_scores, donor_sequences, acceptor_tables)
}

/// An in-memory genome slice covering positions `1..=len`.
pub(crate) struct TestGenome {
    bases: Vec<u8>,
}

impl TestGenome {
    /// All-A genome of the given length.
    pub(crate) fn filled(len: usize) -> Self {
        Self {
            bases: vec![b'A'; len],
        }
    }

    /// Overwrites the bases starting at 1-based position `start`.
    pub(crate) fn write(&mut self, start: u64, seq: &str) {
        let offset = (start - 1) as usize;
        self.bases[offset..offset + seq.len()].copy_from_slice(seq.as_bytes());
    }
}

impl SequenceSource for TestGenome {
    fn subsequence(&self, start: u64, end: u64, strand: Strand) -> Option<String> {
        if start == 0 || end < start || end as usize > self.bases.len() {
            return None;
        }
        let slice = &self.bases[(start - 1) as usize..end as usize];
        let forward = String::from_utf8(slice.to_vec()).ok()?;
        match strand {
            Strand::Reverse => Some(reverse_complement(&forward)),
            _ => Some(forward),
        }
    }
}
