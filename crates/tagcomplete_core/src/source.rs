//! The completion source: one editor-facing plugin instance.

use std::path::{Path, PathBuf};

use tagcomplete_cache::{RefreshReport, TagCache};
use tagcomplete_parser::{CandidateRecord, CtagsLoader, TagFileLoader};
use tracing::debug;

use crate::query::{KeywordPattern, gather_candidates};
use crate::{CompletionConfig, CompletionError, CompletionLog, TagFileDiscovery};

/// Editor event that may trigger a cache refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    /// Absolute path of the current buffer, if any.
    pub current_file: Option<PathBuf>,
    /// Names of the completion sources active for the buffer.
    pub sources: Vec<String>,
}

/// A completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionContext {
    /// Absolute path of the current buffer, if any.
    pub current_file: Option<PathBuf>,
    /// Regular expression for the keyword being typed.
    pub keyword_pattern: String,
}

impl CompletionContext {
    /// Creates a request for `keyword_pattern` with no current buffer.
    pub fn new(keyword_pattern: impl Into<String>) -> Self {
        Self {
            current_file: None,
            keyword_pattern: keyword_pattern.into(),
        }
    }

    /// Sets the current buffer.
    pub fn with_current_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.current_file = Some(path.into());
        self
    }
}

/// Serves completion candidates from tag files.
///
/// Owns the tag cache for its whole lifetime; dropping the source drops the
/// cache.
pub struct TagCompletionSource<D, L = CtagsLoader> {
    config: CompletionConfig,
    discovery: D,
    cache: TagCache<L>,
    log: Box<dyn CompletionLog>,
}

impl<D: TagFileDiscovery> TagCompletionSource<D, CtagsLoader> {
    /// Creates a source using the default ctags loader.
    pub fn new(config: CompletionConfig, discovery: D, log: impl CompletionLog + 'static) -> Self {
        Self::with_loader(config, discovery, CtagsLoader::new(), log)
    }
}

impl<D: TagFileDiscovery, L: TagFileLoader> TagCompletionSource<D, L> {
    /// Creates a source with a custom loader.
    pub fn with_loader(
        config: CompletionConfig,
        discovery: D,
        loader: L,
        log: impl CompletionLog + 'static,
    ) -> Self {
        let cache = TagCache::with_loader(loader).with_policy(config.eviction_policy());
        log.log("initialised");
        Self {
            config,
            discovery,
            cache,
            log: Box::new(log),
        }
    }

    /// Source name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Mark shown next to candidates.
    pub fn mark(&self) -> &str {
        &self.config.mark
    }

    /// Filetypes served by this source.
    pub fn filetypes(&self) -> &[String] {
        &self.config.filetypes
    }

    /// Returns true if this source serves buffers of `filetype`.
    pub fn handles_filetype(&self, filetype: &str) -> bool {
        self.config.filetypes.iter().any(|ft| ft == filetype)
    }

    /// The configuration this source was built with.
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Read access to the tag cache.
    pub fn cache(&self) -> &TagCache<L> {
        &self.cache
    }

    /// Handles an editor event by refreshing the cache.
    ///
    /// Logs a warning first if a conflicting source is active.
    pub fn on_event(&mut self, event: &EventContext) -> Result<RefreshReport, CompletionError> {
        for conflicting in &self.config.conflicting_sources {
            if event.sources.iter().any(|s| s == conflicting) {
                self.log.log(&format!(
                    "Warning: source '{}' and '{}' probably should not mix.",
                    conflicting, self.config.name
                ));
            }
        }
        self.make_cache(event.current_file.as_deref())
    }

    /// Brings every relevant tag file into the cache.
    pub fn make_cache(&mut self, current_file: Option<&Path>) -> Result<RefreshReport, CompletionError> {
        let paths = self
            .discovery
            .relevant_tag_files(current_file, self.log.as_ref());
        debug!("{} relevant tag files", paths.len());

        let report = match self.cache.ensure_fresh(&paths) {
            Ok(report) => report,
            Err(e) => {
                // Files loaded before the failure stay cached.
                self.log_loaded(e.partial());
                return Err(e.into());
            }
        };
        self.log_loaded(&report);
        self.log.log("Cache made");

        Ok(report)
    }

    fn log_loaded(&self, report: &RefreshReport) {
        for (path, count) in &report.loaded {
            self.log
                .log(&format!("{}, with {} tags", path.display(), count));
        }
    }

    /// Returns the candidates matching the request's keyword pattern.
    ///
    /// The cache is built first if it is empty; otherwise it is used as is
    /// and only refreshed by [`Self::on_event`] or [`Self::make_cache`].
    pub fn gather_candidates(
        &mut self,
        context: &CompletionContext,
    ) -> Result<Vec<CandidateRecord>, CompletionError> {
        if self.cache.is_empty() {
            self.make_cache(context.current_file.as_deref())?;
        }

        let pattern = KeywordPattern::new(&context.keyword_pattern)?;
        Ok(gather_candidates(&self.cache.snapshot(), &pattern))
    }
}

impl<D: std::fmt::Debug, L: std::fmt::Debug> std::fmt::Debug for TagCompletionSource<D, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagCompletionSource")
            .field("config", &self.config)
            .field("discovery", &self.discovery)
            .field("cache", &self.cache)
            .field("log", &"<dyn CompletionLog>")
            .finish()
    }
}
