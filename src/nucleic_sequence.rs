use crate::FACILITY;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized nucleotide sequence. Storage is always the DNA alphabet
/// {A,C,G,T}; RNA input is recorded via the `is_rna` flag and rendered back
/// with A:U pairing at the presentation edge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucleicSequence {
    seq: Vec<u8>,
    is_rna: bool,
}

/// Advisory findings from normalization. Never blocks processing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub rna_detected: bool,
    pub invalid_chars: Vec<char>,
}

impl NormalizationReport {
    pub fn is_clean(&self) -> bool {
        !self.rna_detected && self.invalid_chars.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut messages = vec![];
        if self.rna_detected {
            messages.push("RNA detected, using A:U base pairing.".to_string());
        }
        if !self.invalid_chars.is_empty() {
            let chars: String = self.invalid_chars.iter().collect();
            messages.push(format!("Invalid characters removed: {chars}"));
        }
        messages.join(" | ")
    }
}

impl NucleicSequence {
    /// Cleans raw user text into a canonical sequence. Uppercases, drops
    /// everything outside {A,C,G,T,U}, stores U as T. Invalid characters are
    /// reported (deduplicated, first-seen order) rather than rejected; empty
    /// input yields an empty sequence.
    pub fn normalize(raw: &str) -> (Self, NormalizationReport) {
        let upper = raw.to_uppercase();
        let is_rna = upper.contains('U');
        let mut seq = Vec::with_capacity(upper.len());
        let mut invalid_chars: Vec<char> = vec![];
        for c in upper.chars() {
            match c {
                'A' | 'C' | 'G' | 'T' => seq.push(c as u8),
                'U' => seq.push(b'T'),
                other => {
                    if !invalid_chars.contains(&other) {
                        invalid_chars.push(other);
                    }
                }
            }
        }
        (
            Self { seq, is_rna },
            NormalizationReport {
                rna_detected: is_rna,
                invalid_chars,
            },
        )
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn is_rna(&self) -> bool {
        self.is_rna
    }

    /// Positional base complement over the stored DNA alphabet. An involution
    /// regardless of the RNA flag; the flag only changes how the result is
    /// rendered.
    pub fn complement(&self) -> Self {
        Self {
            seq: self.seq.iter().map(|&b| FACILITY.complement(b)).collect(),
            is_rna: self.is_rna,
        }
    }

    pub fn reverse(&self) -> Self {
        Self {
            seq: self.seq.iter().rev().copied().collect(),
            is_rna: self.is_rna,
        }
    }

    pub fn reverse_complement(&self) -> Self {
        Self {
            seq: self
                .seq
                .iter()
                .rev()
                .map(|&b| FACILITY.complement(b))
                .collect(),
            is_rna: self.is_rna,
        }
    }

    /// Complement strand as display text, paired A:U when the input was RNA.
    pub fn complement_string(&self) -> String {
        self.seq
            .iter()
            .map(|&b| FACILITY.pairing_complement(b, self.is_rna) as char)
            .collect()
    }

    pub fn reverse_string(&self) -> String {
        self.seq.iter().rev().map(|&b| b as char).collect()
    }

    pub fn reverse_complement_string(&self) -> String {
        self.seq
            .iter()
            .rev()
            .map(|&b| FACILITY.pairing_complement(b, self.is_rna) as char)
            .collect()
    }

    /// 1-based start positions of non-overlapping occurrences of `pattern`
    /// (uppercased) in the sequence. Scanning resumes after each match end.
    pub fn find_subsequence(&self, pattern: &str) -> Vec<usize> {
        let pattern = pattern.to_uppercase().into_bytes();
        if pattern.is_empty() || self.seq.len() < pattern.len() {
            return vec![];
        }
        let mut ret = vec![];
        let mut start = 0;
        while start + pattern.len() <= self.seq.len() {
            if self.seq[start..start + pattern.len()] == pattern[..] {
                ret.push(start + 1);
                start += pattern.len();
            } else {
                start += 1;
            }
        }
        ret
    }
}

impl fmt::Display for NucleicSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.seq))
    }
}
