//! # tagcomplete_core
//!
//! Completion engine for tagcomplete.
//!
//! This crate provides:
//! - The `TagCompletionSource` orchestrator
//! - Configuration loading
//! - Tag file discovery, including an external tagger
//! - Candidate queries over a cache snapshot
//!
//! ## Example
//!
//! ```rust,ignore
//! use tagcomplete_core::{
//!     CompletionConfig, CompletionContext, ConfiguredDiscovery, TagCompletionSource, TracingLog,
//! };
//!
//! let config = CompletionConfig::from_file(".tagcomplete.jsonc")?;
//! let discovery = ConfiguredDiscovery::from_config(&config);
//! let mut source = TagCompletionSource::new(config, discovery, TracingLog);
//!
//! for candidate in source.gather_candidates(&CompletionContext::new("push"))? {
//!     println!("{}\t{}", candidate.word, candidate.menu);
//! }
//! ```

mod config;
mod discovery;
mod error;
mod log;
mod query;
mod source;
mod tagger;

#[cfg(test)]
mod test_utils;

pub use config::{CompletionConfig, EvictionConfig, TaggerConfig};
pub use discovery::{ConfiguredDiscovery, IncludeTagFiles, StaticTagFiles, TagFileDiscovery};
pub use error::CompletionError;
pub use log::{CompletionLog, MemoryLog, TracingLog};
pub use query::{CandidateIndex, KeywordPattern, QueryError, gather_candidates};
pub use source::{CompletionContext, EventContext, TagCompletionSource};
pub use tagger::{ExternalTagger, TaggerOutput};

pub use tagcomplete_cache::{CacheError, CacheSnapshot, EvictionPolicy, RefreshReport, TagCache};
pub use tagcomplete_parser::{CandidateRecord, CtagsLoader, LoadError, ParseError, TagFileLoader};
