//! Output formatting module

mod json;
mod text;

use miette::Result;
use tagcomplete_core::CandidateRecord;

use crate::cli::OutputFormat;

pub fn output_candidates(candidates: &[CandidateRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_json(candidates)?,
        OutputFormat::Text => text::output_text(candidates),
    }

    Ok(())
}
