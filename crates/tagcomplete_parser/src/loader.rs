//! Whole-file tag loading.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{CandidateRecord, LoadError, parse_line};

/// Trait for turning a tag file on disk into candidate records.
///
/// The freshness cache calls this only for files it has not seen yet or
/// whose modification time changed, so implementations are free to do the
/// full read every time.
pub trait TagFileLoader {
    /// Loads every candidate in `path`, in file order.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the file cannot be read or any line fails
    /// to parse. No partial result is produced.
    fn load(&self, path: &Path) -> Result<Vec<CandidateRecord>, LoadError>;
}

/// The default loader for ctags-style tag files.
///
/// Invalid UTF-8 is replaced with U+FFFD instead of failing the read.
#[derive(Debug, Clone, Copy, Default)]
pub struct CtagsLoader;

impl CtagsLoader {
    /// Creates a new loader.
    pub fn new() -> Self {
        Self
    }
}

impl TagFileLoader for CtagsLoader {
    fn load(&self, path: &Path) -> Result<Vec<CandidateRecord>, LoadError> {
        let bytes = fs::read(path).map_err(|e| LoadError::io(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        let tags = parse_tags(path, &text)?;
        debug!("Parsed {} tags from {}", tags.len(), path.display());
        Ok(tags)
    }
}

/// Parses the full text of a tag file.
///
/// `path` is only used to label errors.
pub fn parse_tags(path: &Path, text: &str) -> Result<Vec<CandidateRecord>, LoadError> {
    let mut tags = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(record) = parse_line(line).map_err(|e| LoadError::parse(path, index + 1, e))? {
            tags.push(record);
        }
    }
    Ok(tags)
}
