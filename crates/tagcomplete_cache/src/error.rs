//! Cache error types.

use std::path::{Path, PathBuf};

use tagcomplete_parser::LoadError;
use thiserror::Error;

use crate::RefreshReport;

/// Errors that can occur while refreshing the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A stale or new tag file failed to load.
    ///
    /// Files refreshed earlier in the same batch are recorded in `partial`.
    #[error("Failed to load tag file: {source}")]
    Load {
        /// The tag file that failed.
        path: PathBuf,
        /// The loader failure.
        #[source]
        source: LoadError,
        /// What the batch did before the failure.
        partial: Box<RefreshReport>,
    },
}

impl CacheError {
    /// Creates a load error for `path` with no prior progress.
    pub fn load(path: impl Into<PathBuf>, source: LoadError) -> Self {
        Self::Load {
            path: path.into(),
            source,
            partial: Box::default(),
        }
    }

    /// Attaches the progress made before the failure.
    pub fn with_partial(mut self, report: RefreshReport) -> Self {
        match &mut self {
            Self::Load { partial, .. } => **partial = report,
        }
        self
    }

    /// The refresh work completed before the failure.
    pub fn partial(&self) -> &RefreshReport {
        match self {
            Self::Load { partial, .. } => partial,
        }
    }

    /// Returns the tag file that caused the error.
    pub fn path(&self) -> &Path {
        match self {
            Self::Load { path, .. } => path,
        }
    }
}
