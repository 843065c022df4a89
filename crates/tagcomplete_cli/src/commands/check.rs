//! Check command implementation

use std::path::PathBuf;

use miette::Result;
use tagcomplete_core::{CtagsLoader, TagFileLoader};
use tracing::error;

/// Parses each tag file and prints its record count.
///
/// Returns `true` if any file failed to load.
pub fn run_check(files: &[PathBuf]) -> Result<bool> {
    let loader = CtagsLoader::new();
    let mut has_failures = false;

    for path in files {
        match loader.load(path) {
            Ok(candidates) => println!("{}: {} tags", path.display(), candidates.len()),
            Err(e) => {
                error!("{}", e);
                has_failures = true;
            }
        }
    }

    Ok(has_failures)
}
