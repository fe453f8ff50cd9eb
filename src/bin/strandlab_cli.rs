use std::{env, fs, path::Path};
use strandlab::{
    ENZYMES,
    alignment::AlignmentSession,
    nucleic_sequence::NucleicSequence,
    origin_format, remote_lookup, translation,
};

fn usage() {
    eprintln!(
        "Usage:\n  \
  strandlab_cli --version\n  \
  strandlab_cli analyze SEQ\n  \
  strandlab_cli translate SEQ\n  \
  strandlab_cli sites SEQ [FILTER...]\n  \
  strandlab_cli origin SEQ\n  \
  strandlab_cli save-fasta SEQ OUTPUT.fasta\n  \
  strandlab_cli blast-url SEQ\n  \
  strandlab_cli align ALIGNER_PATH SEQ SEQ [SEQ...]\n\n  \
  Tip: pass @file.txt instead of an inline sequence"
    );
}

fn load_seq_arg(value: &str) -> Result<String, String> {
    if let Some(path) = value.strip_prefix('@') {
        fs::read_to_string(path).map_err(|e| format!("Could not read sequence file '{path}': {e}"))
    } else {
        Ok(value.to_string())
    }
}

fn normalize_arg(value: &str) -> Result<NucleicSequence, String> {
    let raw = load_seq_arg(value)?;
    let (seq, report) = NucleicSequence::normalize(&raw);
    let summary = report.summary();
    if !summary.is_empty() {
        eprintln!("{summary}");
    }
    Ok(seq)
}

fn analyze(value: &str) -> Result<(), String> {
    let seq = normalize_arg(value)?;
    println!("Sequence ({} bp): {seq}", seq.len());
    println!("Complement:         {}", seq.complement_string());
    println!("Reverse:            {}", seq.reverse_string());
    println!("Reverse-Complement: {}", seq.reverse_complement_string());
    Ok(())
}

fn translate(value: &str) -> Result<(), String> {
    let seq = normalize_arg(value)?;
    for (i, frame) in translation::six_frames(&seq).iter().enumerate() {
        println!("Frame {}: {frame}", i + 1);
    }
    Ok(())
}

fn sites(value: &str, filters: &[String]) -> Result<(), String> {
    let seq = normalize_arg(value)?;
    let hits = ENZYMES.scan(&seq, filters);
    if hits.is_empty() {
        println!("No restriction sites found");
        return Ok(());
    }
    for hit in hits {
        println!("{hit}");
    }
    Ok(())
}

fn align(aligner: &str, row_args: &[String]) -> Result<(), String> {
    let mut session = AlignmentSession::new();
    while session.rows().len() < row_args.len() {
        session.add_row();
    }
    for (i, arg) in row_args.iter().enumerate() {
        session.set_row(i, &load_seq_arg(arg)?);
    }
    let result = session
        .align(Path::new(aligner))
        .map_err(|e| e.to_string())?;
    for row in result.rows() {
        println!("{:<10} {}", row.label, row.sequence);
    }
    let marks: String = result
        .consensus()
        .iter()
        .map(|&same| if same { '*' } else { ' ' })
        .collect();
    println!("{:<10} {marks}", "");
    Ok(())
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1) else {
        usage();
        return Err("No command given".to_string());
    };
    match (command.as_str(), args.len()) {
        ("--version", _) => {
            println!("strandlab {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        ("analyze", 3) => analyze(&args[2]),
        ("translate", 3) => translate(&args[2]),
        ("sites", n) if n >= 3 => sites(&args[2], &args[3..]),
        ("origin", 3) => {
            let raw = load_seq_arg(&args[2])?;
            println!("{}", origin_format::format_origin_default(&raw));
            Ok(())
        }
        ("save-fasta", 4) => {
            let raw = load_seq_arg(&args[2])?;
            origin_format::write_fasta_file(&args[3], &raw).map_err(|e| e.to_string())
        }
        ("blast-url", 3) => {
            let seq = normalize_arg(&args[2])?;
            println!("{}", remote_lookup::blast_url(&seq));
            Ok(())
        }
        ("align", n) if n >= 5 => align(&args[2], &args[3..]),
        _ => {
            usage();
            Err(format!("Unknown or malformed command '{command}'"))
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
