//! Cache manager for tag files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tagcomplete_parser::{CtagsLoader, TagFileLoader};
use tracing::{debug, info};

use crate::{CacheError, CacheSnapshot, TagFileEntry};

/// What to do with entries whose path stops being relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Keep every entry for the lifetime of the cache.
    #[default]
    Retain,

    /// Drop an entry once its path has been missing from this many
    /// consecutive refresh lists. Zero is treated as one.
    IdleRefreshes(u32),
}

/// Outcome of one [`TagCache::ensure_fresh`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Files that were (re)loaded, with their tag counts.
    pub loaded: Vec<(PathBuf, usize)>,
    /// Number of listed paths whose entry was already current.
    pub unchanged: usize,
    /// Listed paths that could not be stat'ed.
    pub skipped: Vec<PathBuf>,
    /// Entries dropped by the eviction policy.
    pub evicted: Vec<PathBuf>,
}

#[derive(Debug)]
struct Slot {
    entry: Arc<TagFileEntry>,
    last_seen: u64,
}

/// Manages parsed tag files keyed by path.
#[derive(Debug)]
pub struct TagCache<L = CtagsLoader> {
    /// Loader used for missing or stale files.
    loader: L,
    /// Cache entries with their last-seen refresh generation.
    slots: HashMap<PathBuf, Slot>,
    /// Paths in first-insertion order.
    order: Vec<PathBuf>,
    policy: EvictionPolicy,
    /// Incremented on every refresh.
    generation: u64,
}

impl TagCache<CtagsLoader> {
    /// Creates an empty cache using the default ctags loader.
    pub fn new() -> Self {
        Self::with_loader(CtagsLoader::new())
    }
}

impl Default for TagCache<CtagsLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: TagFileLoader> TagCache<L> {
    /// Creates an empty cache that loads files through `loader`.
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            slots: HashMap::new(),
            order: Vec::new(),
            policy: EvictionPolicy::default(),
            generation: 0,
        }
    }

    /// Sets the eviction policy.
    pub fn with_policy(mut self, policy: EvictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the eviction policy.
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Returns the loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Makes sure every listed tag file is loaded and current.
    ///
    /// For each path the file is stat'ed; paths that cannot be stat'ed are
    /// skipped. A path with no entry, or with an entry whose mtime differs
    /// from the file's, is loaded and its entry replaced as a whole. Current
    /// entries are left alone. Order and duplicates in `paths` do not matter.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Load`] for the first file that fails to load.
    /// Files refreshed before it keep their new entries and are listed in
    /// [`CacheError::partial`]; the failing file keeps whatever entry it had.
    pub fn ensure_fresh<I, P>(&mut self, paths: I) -> Result<RefreshReport, CacheError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths: Vec<PathBuf> = paths
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();

        self.generation += 1;
        for path in &paths {
            if let Some(slot) = self.slots.get_mut(path) {
                slot.last_seen = self.generation;
            }
        }

        let mut report = RefreshReport::default();
        for path in &paths {
            let modified = match modified_time(path) {
                Ok(modified) => modified,
                Err(e) => {
                    debug!("Skipping tag file {}: {}", path.display(), e);
                    report.skipped.push(path.clone());
                    continue;
                }
            };

            if self
                .slots
                .get(path)
                .is_some_and(|slot| slot.entry.is_fresh(modified))
            {
                report.unchanged += 1;
                continue;
            }

            let candidates = match self.loader.load(path) {
                Ok(candidates) => candidates,
                Err(e) => return Err(CacheError::load(path.clone(), e).with_partial(report)),
            };

            debug!("Loaded {} with {} tags", path.display(), candidates.len());
            report.loaded.push((path.clone(), candidates.len()));
            self.insert(TagFileEntry::new(path.clone(), modified, candidates));
        }

        report.evicted = self.evict_idle();

        info!(
            "Refreshed tag cache: {} loaded, {} unchanged, {} skipped, {} evicted",
            report.loaded.len(),
            report.unchanged,
            report.skipped.len(),
            report.evicted.len()
        );

        Ok(report)
    }

    /// Returns a read-only view of all current entries.
    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot::new(
            self.order
                .iter()
                .filter_map(|path| self.slots.get(path))
                .map(|slot| Arc::clone(&slot.entry))
                .collect(),
        )
    }

    /// Stores an entry, replacing any previous entry for the same path.
    pub fn insert(&mut self, entry: TagFileEntry) {
        let path = entry.path().to_path_buf();
        let slot = Slot {
            entry: Arc::new(entry),
            last_seen: self.generation,
        };
        if self.slots.insert(path.clone(), slot).is_none() {
            self.order.push(path);
        }
    }

    /// Gets the entry for a path.
    pub fn get(&self, path: &Path) -> Option<&Arc<TagFileEntry>> {
        self.slots.get(path).map(|slot| &slot.entry)
    }

    /// Returns true if the path has an entry.
    pub fn contains(&self, path: &Path) -> bool {
        self.slots.contains_key(path)
    }

    /// Removes an entry.
    pub fn remove(&mut self, path: &Path) -> Option<Arc<TagFileEntry>> {
        let slot = self.slots.remove(path)?;
        self.order.retain(|p| p != path);
        Some(slot.entry)
    }

    /// Clears all cache entries.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }

    /// Cached paths in first-insertion order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.order
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total number of candidates over all entries.
    pub fn total_candidates(&self) -> usize {
        self.slots
            .values()
            .map(|slot| slot.entry.candidates().len())
            .sum()
    }

    fn evict_idle(&mut self) -> Vec<PathBuf> {
        let EvictionPolicy::IdleRefreshes(limit) = self.policy else {
            return Vec::new();
        };
        let limit = u64::from(limit.max(1));
        let generation = self.generation;

        let expired: Vec<PathBuf> = self
            .order
            .iter()
            .filter(|path| {
                self.slots
                    .get(*path)
                    .is_some_and(|slot| generation - slot.last_seen >= limit)
            })
            .cloned()
            .collect();

        for path in &expired {
            debug!("Evicting idle tag file {}", path.display());
            self.remove(path);
        }
        expired
    }
}

fn modified_time(path: &Path) -> std::io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}
