//! Cache entry types.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tagcomplete_parser::CandidateRecord;

/// Parsed state of one tag file.
///
/// Entries are never mutated after construction. A refresh builds a new
/// entry and replaces the old one as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFileEntry {
    path: PathBuf,
    modified: SystemTime,
    candidates: Vec<CandidateRecord>,
}

impl TagFileEntry {
    /// Creates a new cache entry.
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime, candidates: Vec<CandidateRecord>) -> Self {
        Self {
            path: path.into(),
            modified,
            candidates,
        }
    }

    /// Path of the tag file, also the cache key.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time observed when the file was loaded.
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Candidates in file order.
    pub fn candidates(&self) -> &[CandidateRecord] {
        &self.candidates
    }

    /// Checks if this entry still matches the file's current mtime.
    pub fn is_fresh(&self, modified: SystemTime) -> bool {
        self.modified == modified
    }
}

/// A read-only view of the cache at one point in time.
///
/// Holding a snapshot does not block refreshes; entries replaced afterwards
/// stay alive in the snapshot until it is dropped.
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    entries: Vec<Arc<TagFileEntry>>,
}

impl CacheSnapshot {
    pub(crate) fn new(entries: Vec<Arc<TagFileEntry>>) -> Self {
        Self { entries }
    }

    /// Entries in cache order.
    pub fn entries(&self) -> &[Arc<TagFileEntry>] {
        &self.entries
    }

    /// Iterates every candidate, entry by entry, in file order.
    pub fn candidates(&self) -> impl Iterator<Item = &CandidateRecord> {
        self.entries.iter().flat_map(|entry| entry.candidates().iter())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn record(word: &str) -> CandidateRecord {
        CandidateRecord::new(word, "f", "Base", word, "")
    }

    #[test]
    fn test_entry_is_fresh() {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let entry = TagFileEntry::new("/tmp/tags", modified, vec![record("foo")]);

        assert!(entry.is_fresh(modified));
        assert!(!entry.is_fresh(modified + Duration::from_nanos(1)));
        assert!(!entry.is_fresh(modified - Duration::from_secs(1)));
    }

    #[test]
    fn test_entry_accessors() {
        let modified = SystemTime::UNIX_EPOCH;
        let entry = TagFileEntry::new("/tmp/tags", modified, vec![record("a"), record("b")]);

        assert_eq!(entry.path(), Path::new("/tmp/tags"));
        assert_eq!(entry.modified(), modified);
        assert_eq!(entry.candidates().len(), 2);
    }

    #[test]
    fn test_snapshot_candidates_follow_entry_order() {
        let modified = SystemTime::UNIX_EPOCH;
        let snapshot = CacheSnapshot::new(vec![
            Arc::new(TagFileEntry::new("/a", modified, vec![record("a1"), record("a2")])),
            Arc::new(TagFileEntry::new("/b", modified, vec![record("b1")])),
        ]);

        let words: Vec<&str> = snapshot.candidates().map(|c| c.word.as_str()).collect();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(words, vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn test_default_snapshot_is_empty() {
        let snapshot = CacheSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.candidates().count(), 0);
    }
}
