//! Thread-safe handle around a [`TagCache`].

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tagcomplete_parser::{CtagsLoader, TagFileLoader};

use crate::{CacheError, CacheSnapshot, RefreshReport, TagCache};

/// A cache shared between concurrent callers.
///
/// Refreshes hold the lock for the whole check-then-replace sequence, so two
/// callers never both decide that the same entry is stale. Readers take a
/// snapshot under the lock and query it after releasing it.
#[derive(Debug)]
pub struct SharedTagCache<L = CtagsLoader> {
    inner: Arc<Mutex<TagCache<L>>>,
}

impl<L> Clone for SharedTagCache<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: TagFileLoader> SharedTagCache<L> {
    /// Wraps an existing cache.
    pub fn new(cache: TagCache<L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// See [`TagCache::ensure_fresh`].
    pub fn ensure_fresh<I, P>(&self, paths: I) -> Result<RefreshReport, CacheError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.inner.lock().ensure_fresh(paths)
    }

    /// Takes a snapshot; the lock is released before returning.
    pub fn snapshot(&self) -> CacheSnapshot {
        self.inner.lock().snapshot()
    }

    /// Runs `f` with exclusive access to the cache.
    pub fn with<R>(&self, f: impl FnOnce(&mut TagCache<L>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Default for SharedTagCache<CtagsLoader> {
    fn default() -> Self {
        Self::new(TagCache::new())
    }
}
