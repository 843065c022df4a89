//! Text output formatter

use tagcomplete_core::CandidateRecord;

pub fn output_text(candidates: &[CandidateRecord]) {
    for candidate in candidates {
        println!("{}", format_line(candidate));
    }
}

/// One candidate per line: word, kind and menu, tab separated.
fn format_line(candidate: &CandidateRecord) -> String {
    format!("{}\t{}\t{}", candidate.word, candidate.kind, candidate.menu)
}
