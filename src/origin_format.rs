use anyhow::Result;
use itertools::Itertools;
use std::{fs::File, io::Write};

pub const ORIGIN_LINE_LENGTH: usize = 60;
pub const ORIGIN_GROUP_SIZE: usize = 10;

/// Renders a sequence as an ORIGIN-style block: `line_length` bases per
/// line in space-separated groups of `group_size`, each line prefixed with
/// its 1-based start position right-justified to width 9. The input is
/// forced to the DNA alphabet first (uppercased, U stored as T), so raw
/// strings are safe to pass. No trailing newline.
pub fn format_origin(raw: &str, line_length: usize, group_size: usize) -> String {
    let seq: Vec<u8> = raw
        .to_uppercase()
        .bytes()
        .map(|b| if b == b'U' { b'T' } else { b })
        .collect();
    seq.chunks(line_length)
        .enumerate()
        .map(|(i, chunk)| {
            let grouped = chunk
                .chunks(group_size)
                .map(|group| String::from_utf8_lossy(group).into_owned())
                .join(" ");
            format!("{:>9} {}", i * line_length + 1, grouped)
        })
        .join("\n")
}

pub fn format_origin_default(raw: &str) -> String {
    format_origin(raw, ORIGIN_LINE_LENGTH, ORIGIN_GROUP_SIZE)
}

/// Writes the sequence as a FASTA file: a `>sequence_1` header, the origin
/// block, then the `//` sentinel on its own line.
pub fn write_fasta_file(path: &str, raw: &str) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, ">sequence_1")?;
    write!(file, "{}\n//", format_origin_default(raw))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_origin_positions_and_groups() {
        let formatted = format_origin("ATGCATGCATGCATGCATGCATGC", 10, 5);
        let lines: Vec<&str> = formatted.split('\n').collect();
        assert_eq!(
            lines,
            vec![
                "        1 ATGCA TGCAT",
                "       11 GCATG CATGC",
                "       21 ATGC",
            ]
        );
    }

    #[test]
    fn test_format_origin_default_widths() {
        let raw = "A".repeat(70);
        let formatted = format_origin_default(&raw);
        let lines: Vec<&str> = formatted.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("        1 "));
        assert!(lines[1].starts_with("       61 "));
        // 60 bases in groups of 10 -> 6 groups, 5 separating spaces
        assert_eq!(lines[0].len(), 10 + 60 + 5);
    }

    #[test]
    fn test_format_origin_normalizes_raw_input() {
        assert_eq!(format_origin("augc", 10, 5), "        1 ATGC");
    }

    #[test]
    fn test_format_origin_empty() {
        assert_eq!(format_origin("", 60, 10), "");
    }

    #[test]
    fn test_format_origin_idempotent() {
        let raw = "ATGCATGCATGCATGCATGCATGCATGCATGCATGCATGCATGCATGCATGCATGCATGCATGGC";
        let formatted = format_origin_default(raw);
        let stripped: String = formatted
            .split('\n')
            .map(|line| line[10..].replace(' ', ""))
            .collect();
        assert_eq!(stripped, raw);
        assert_eq!(format_origin_default(&stripped), formatted);
    }

    #[test]
    fn test_write_fasta_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.fasta");
        write_fasta_file(path.to_str().unwrap(), "ATGCATGCAT").unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, ">sequence_1\n        1 ATGCATGCAT\n//");
    }
}
