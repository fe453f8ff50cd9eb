use crate::{FACILITY, nucleic_sequence::NucleicSequence};

/// Translates one reading frame (0, 1 or 2): drops the first `frame` bases,
/// splits the rest into non-overlapping triplets and maps each through the
/// codon catalog. A trailing incomplete codon produces no symbol; stop
/// codons emit `*` without truncating.
pub fn translate(seq: &NucleicSequence, frame: usize) -> String {
    translate_bytes(seq.as_bytes(), frame)
}

fn translate_bytes(seq: &[u8], frame: usize) -> String {
    seq.get(frame..)
        .unwrap_or_default()
        .chunks_exact(3)
        .map(|codon| FACILITY.amino_acid(codon))
        .collect()
}

/// The six standard translations: frames 0..3 of the forward sequence, then
/// frames 0..3 of its reverse complement, in that fixed order.
pub fn six_frames(seq: &NucleicSequence) -> [String; 6] {
    let revcomp = seq.reverse_complement();
    [
        translate(seq, 0),
        translate(seq, 1),
        translate(seq, 2),
        translate(&revcomp, 0),
        translate(&revcomp, 1),
        translate(&revcomp, 2),
    ]
}
