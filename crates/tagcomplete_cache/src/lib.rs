//! # tagcomplete_cache
//!
//! Freshness cache for parsed tag files.
//!
//! ## Cache Strategy
//!
//! 1. **Keyed by path**: one entry per tag file
//! 2. **Modification time**: a file is reloaded only when its mtime differs
//!    from the one recorded at the last successful load
//! 3. **Whole-entry replacement**: entries are immutable and swapped
//!    atomically, so snapshots never see a half-built entry
//!
//! Nothing is persisted; the cache lives as long as its owner.

mod entry;
mod error;
mod manager;
mod shared;

pub use entry::{CacheSnapshot, TagFileEntry};
pub use error::CacheError;
pub use manager::{EvictionPolicy, RefreshReport, TagCache};
pub use shared::SharedTagCache;
