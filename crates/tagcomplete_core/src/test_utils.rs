//! Shared helpers for unit tests.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};

use tagcomplete_parser::{CandidateRecord, CtagsLoader, LoadError, TagFileLoader};
use tempfile::TempDir;

/// Ctags loader that counts its invocations.
#[derive(Debug, Default)]
pub struct CountingLoader {
    calls: AtomicUsize,
}

impl CountingLoader {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TagFileLoader for CountingLoader {
    fn load(&self, path: &Path) -> Result<Vec<CandidateRecord>, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CtagsLoader.load(path)
    }
}

/// Writes a tag file and pins its mtime to `mtime_secs` after the epoch.
pub fn write_tags(dir: &TempDir, name: &str, content: &str, mtime_secs: u64) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs))
        .unwrap();
    path
}
