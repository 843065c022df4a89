//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use tagcomplete_core::CandidateRecord;

pub fn output_json(candidates: &[CandidateRecord]) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(candidates).into_diagnostic()?
    );
    Ok(())
}
