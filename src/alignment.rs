use crate::nucleic_sequence::NucleicSequence;
use bio::io::fasta;
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt,
    fs::File,
    path::{Path, PathBuf},
    process::Command,
    sync::mpsc,
    thread,
};

pub const GAP: char = '-';
const MIN_SEQUENCES: usize = 2;

/// Why one alignment attempt ended without a result. Terminal for the
/// attempt, not for the session: rows stay editable and a new attempt can
/// be triggered.
#[derive(Debug)]
pub enum AlignmentError {
    InsufficientSequences,
    AlignerMissing(PathBuf),
    AlignerFailed(String),
    Io(std::io::Error),
}

impl fmt::Display for AlignmentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlignmentError::InsufficientSequences => write!(f, "insufficient sequences"),
            AlignmentError::AlignerMissing(path) => {
                write!(f, "external aligner not found: {}", path.display())
            }
            AlignmentError::AlignerFailed(diagnostic) => {
                write!(f, "external aligner error: {diagnostic}")
            }
            AlignmentError::Io(e) => write!(f, "alignment I/O error: {e}"),
        }
    }
}

impl Error for AlignmentError {}

impl From<std::io::Error> for AlignmentError {
    fn from(err: std::io::Error) -> Self {
        AlignmentError::Io(err)
    }
}

/// One aligned record as returned by the external tool, in output order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub label: String,
    pub sequence: String,
}

/// The padded alignment matrix plus per-column consensus flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult {
    rows: Vec<AlignedRow>,
    consensus: Vec<bool>,
}

impl AlignmentResult {
    /// Pads every row with the gap symbol to the widest row, then derives
    /// the consensus flag for each column (all rows identical,
    /// case-insensitive; gaps compare like any other character).
    fn from_rows(mut rows: Vec<AlignedRow>) -> Self {
        let width = rows.iter().map(|row| row.sequence.len()).max().unwrap_or(0);
        for row in &mut rows {
            let missing = width - row.sequence.len();
            if missing > 0 {
                row.sequence.extend(std::iter::repeat(GAP).take(missing));
            }
        }
        let consensus = (0..width)
            .map(|i| {
                let mut column = rows
                    .iter()
                    .map(|row| row.sequence.as_bytes()[i].to_ascii_uppercase());
                match column.next() {
                    Some(first) => column.all(|c| c == first),
                    None => true,
                }
            })
            .collect();
        Self { rows, consensus }
    }

    pub fn rows(&self) -> &Vec<AlignedRow> {
        &self.rows
    }

    pub fn consensus(&self) -> &Vec<bool> {
        &self.consensus
    }

    pub fn width(&self) -> usize {
        self.consensus.len()
    }
}

/// Collects candidate sequences and drives one external alignment attempt
/// at a time. Rows are ordered; removal always drops the most recently
/// added row, and the count never falls below two.
#[derive(Clone, Debug)]
pub struct AlignmentSession {
    rows: Vec<String>,
}

impl Default for AlignmentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AlignmentSession {
    pub fn new() -> Self {
        Self {
            rows: vec![String::new(), String::new()],
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(String::new());
    }

    pub fn remove_last_row(&mut self) -> bool {
        if self.rows.len() > MIN_SEQUENCES {
            self.rows.pop();
            true
        } else {
            false
        }
    }

    pub fn set_row(&mut self, index: usize, text: &str) {
        if let Some(row) = self.rows.get_mut(index) {
            *row = text.to_string();
        }
    }

    pub fn rows(&self) -> &Vec<String> {
        &self.rows
    }

    /// The rows after cleaning, in input order, rows that clean to empty
    /// dropped.
    pub fn cleaned_sequences(&self) -> Vec<NucleicSequence> {
        self.rows
            .iter()
            .map(|row| NucleicSequence::normalize(row).0)
            .filter(|seq| !seq.is_empty())
            .collect()
    }

    /// One blocking alignment attempt: validate, hand the sequences to the
    /// external aligner through temporary FASTA files, parse its output and
    /// derive the padded, consensus-annotated result. The temporary
    /// directory lives exactly as long as the attempt.
    pub fn align(&self, aligner: &Path) -> Result<AlignmentResult, AlignmentError> {
        let sequences = self.cleaned_sequences();
        if sequences.len() < MIN_SEQUENCES {
            return Err(AlignmentError::InsufficientSequences);
        }
        if !aligner.exists() {
            return Err(AlignmentError::AlignerMissing(aligner.to_path_buf()));
        }

        let workdir = tempfile::tempdir()?;
        let input_path = workdir.path().join("input.fasta");
        let output_path = workdir.path().join("aligned.fasta");
        write_aligner_input(&input_path, &sequences)?;

        let output = Command::new(aligner)
            .arg("-align")
            .arg(&input_path)
            .arg("-output")
            .arg(&output_path)
            .output()?;
        if !output.status.success() {
            let mut diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if diagnostic.is_empty() {
                diagnostic = output.status.to_string();
            }
            return Err(AlignmentError::AlignerFailed(diagnostic));
        }

        let rows = read_aligner_output(&output_path)?;
        Ok(AlignmentResult::from_rows(rows))
    }

    /// Submits the blocking attempt to a worker thread; the caller receives
    /// the state transition on the returned channel instead of stalling.
    pub fn align_in_background(
        &self,
        aligner: PathBuf,
    ) -> mpsc::Receiver<Result<AlignmentResult, AlignmentError>> {
        let (tx, rx) = mpsc::channel();
        let session = self.clone();
        thread::spawn(move || {
            let _ = tx.send(session.align(&aligner));
        });
        rx
    }
}

/// Serializes the sequences with synthetic labels Seq1, Seq2, ... in input
/// order.
fn write_aligner_input(
    path: &Path,
    sequences: &[NucleicSequence],
) -> Result<(), AlignmentError> {
    let file = File::create(path)?;
    let mut writer = fasta::Writer::new(file);
    for (i, seq) in sequences.iter().enumerate() {
        writer.write(&format!("Seq{}", i + 1), None, seq.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads the aligner's FASTA output, concatenating data lines per record
/// and preserving the file's record order.
fn read_aligner_output(path: &Path) -> Result<Vec<AlignedRow>, AlignmentError> {
    let file = File::open(path)?;
    fasta::Reader::new(file)
        .records()
        .map(|record| {
            let record = record?;
            Ok(AlignedRow {
                label: record.id().to_string(),
                sequence: String::from_utf8_lossy(record.seq()).into_owned(),
            })
        })
        .collect()
}
