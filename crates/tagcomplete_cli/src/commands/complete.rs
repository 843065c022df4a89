//! Complete command implementation

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tagcomplete_core::{
    CompletionConfig, CompletionContext, ConfiguredDiscovery, TagCompletionSource, TracingLog,
};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::output::output_candidates;

/// Prints the candidates matching `pattern`.
///
/// Returns `true` when nothing matched and `fail_on_empty` is set.
pub fn run_complete(
    mut config: CompletionConfig,
    pattern: &str,
    tags: &[PathBuf],
    file: Option<&Path>,
    format: OutputFormat,
    fail_on_empty: bool,
) -> Result<bool> {
    // `--tags` paths are relative to the working directory, not the config file.
    for tag in tags {
        config
            .tag_files
            .push(std::path::absolute(tag).into_diagnostic()?);
    }
    debug!("Tag files: {:?}", config.tag_files);

    let discovery = ConfiguredDiscovery::from_config(&config);

    let mut context = CompletionContext::new(pattern);
    if let Some(file) = file {
        context = context.with_current_file(std::path::absolute(file).into_diagnostic()?);
    }

    let mut source = TagCompletionSource::new(config, discovery, TracingLog);
    let candidates = source.gather_candidates(&context).into_diagnostic()?;

    output_candidates(&candidates, format)?;

    Ok(fail_on_empty && candidates.is_empty())
}
