#![allow(dead_code)]

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bio::bio_types::strand::Strand;
use maxsplice_core::constants::{
    ACCEPTOR_SUBSTRINGS, ACCEPTOR_TABLE_COUNT, SCORE3_TABLE_PREFIX, SCORE5_MATRIX_FILE,
    SCORE5_SEQUENCE_FILE,
};
use maxsplice_core::sequence::{reverse_complement, SequenceSource};

/// Decodes a base-4 index back into an ACGT string of the given length.
pub fn decode_base4(mut index: usize, length: usize) -> String {
    let mut bases = vec![b'A'; length];
    for slot in bases.iter_mut().rev() {
        *slot = b"ACGT"[index % 4];
        index /= 4;
    }
    String::from_utf8(bases).unwrap()
}

/// Deterministic synthetic donor table value for entry `i`.
pub fn donor_table_value(i: usize) -> f64 {
    0.25 + (i % 97) as f64 / 13.0
}

/// Deterministic synthetic acceptor table value for entry `i`.
pub fn acceptor_table_value(i: usize) -> f64 {
    0.5 + (i % 31) as f64 / 7.0
}

/// Writes a complete synthetic model file set into `dir`.
///
/// Every 7-base donor rest sequence is present, in base-4 order, with a
/// distinct deterministic score; the nine acceptor sub-tables are sized to
/// their fragment lengths. `Display` output of f64 round-trips exactly
/// through parsing, so the loaded model matches these values bit for bit.
pub fn write_model_dir(dir: &Path) {
    let count = 4usize.pow(7);

    let mut matrix =
        BufWriter::new(File::create(dir.join(SCORE5_MATRIX_FILE)).unwrap());
    for i in 0..count {
        writeln!(matrix, "{}", donor_table_value(i)).unwrap();
    }

    let mut sequences =
        BufWriter::new(File::create(dir.join(SCORE5_SEQUENCE_FILE)).unwrap());
    for i in 0..count {
        writeln!(sequences, "{}", decode_base4(i, 7)).unwrap();
    }

    for table_number in 0..ACCEPTOR_TABLE_COUNT {
        let (_, length) = ACCEPTOR_SUBSTRINGS[table_number];
        let size = 4usize.pow(length as u32);
        let path = dir.join(format!("{}{}", SCORE3_TABLE_PREFIX, table_number + 1));
        let mut table = BufWriter::new(File::create(path).unwrap());
        for i in 0..size {
            writeln!(table, "{}", acceptor_table_value(i)).unwrap();
        }
    }
}

/// An in-memory genome slice covering positions `1..=len`.
pub struct TestGenome {
    bases: Vec<u8>,
}

impl TestGenome {
    /// All-A genome of the given length.
    pub fn filled(len: usize) -> Self {
        Self {
            bases: vec![b'A'; len],
        }
    }

    /// Overwrites the bases starting at 1-based position `start`.
    pub fn write(&mut self, start: u64, seq: &str) {
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
