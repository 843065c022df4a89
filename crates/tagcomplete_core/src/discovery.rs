//! Relevant tag file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{CompletionConfig, CompletionLog, ExternalTagger};

/// Produces the tag files relevant to the current buffer.
///
/// Returned paths may not exist and may repeat; the cache copes with both.
pub trait TagFileDiscovery {
    /// Lists the relevant tag files.
    fn relevant_tag_files(&self, current_file: Option<&Path>, log: &dyn CompletionLog) -> Vec<PathBuf>;
}

impl<F> TagFileDiscovery for F
where
    F: Fn(Option<&Path>) -> Vec<PathBuf>,
{
    fn relevant_tag_files(&self, current_file: Option<&Path>, _log: &dyn CompletionLog) -> Vec<PathBuf> {
        self(current_file)
    }
}

/// Supplies extra tag files for included sources.
pub trait IncludeTagFiles {
    /// Lists the include tag files.
    fn include_tag_files(&self) -> Vec<PathBuf>;
}

/// A fixed list of tag files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticTagFiles {
    paths: Vec<PathBuf>,
}

impl StaticTagFiles {
    /// Creates a discovery that always returns `paths`.
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl TagFileDiscovery for StaticTagFiles {
    fn relevant_tag_files(&self, _current_file: Option<&Path>, _log: &dyn CompletionLog) -> Vec<PathBuf> {
        self.paths.clone()
    }
}

/// Configured tag files, then include tag files, then tagger output.
///
/// Every path is made absolute against the working directory.
#[derive(Default)]
pub struct ConfiguredDiscovery {
    tag_files: Vec<PathBuf>,
    include: Option<Box<dyn IncludeTagFiles>>,
    tagger: Option<ExternalTagger>,
}

impl ConfiguredDiscovery {
    /// Creates a discovery over a fixed list of tag files.
    pub fn new(tag_files: Vec<PathBuf>) -> Self {
        Self {
            tag_files,
            include: None,
            tagger: None,
        }
    }

    /// Creates a discovery from the tag files and tagger in `config`.
    pub fn from_config(config: &CompletionConfig) -> Self {
        let discovery = Self::new(config.resolved_tag_files());
        match &config.tagger {
            Some(tagger) => discovery.with_tagger(ExternalTagger::from_config(tagger)),
            None => discovery,
        }
    }

    /// Adds an include tag file provider.
    pub fn with_include(mut self, include: impl IncludeTagFiles + 'static) -> Self {
        self.include = Some(Box::new(include));
        self
    }

    /// Adds an external tagger.
    pub fn with_tagger(mut self, tagger: ExternalTagger) -> Self {
        self.tagger = Some(tagger);
        self
    }
}

impl std::fmt::Debug for ConfiguredDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredDiscovery")
            .field("tag_files", &self.tag_files)
            .field("include", &self.include.as_ref().map(|_| "<IncludeTagFiles>"))
            .field("tagger", &self.tagger)
            .finish()
    }
}

impl TagFileDiscovery for ConfiguredDiscovery {
    fn relevant_tag_files(&self, current_file: Option<&Path>, log: &dyn CompletionLog) -> Vec<PathBuf> {
        let mut paths = self.tag_files.clone();

        if let Some(include) = &self.include {
            paths.extend(include.include_tag_files());
        }

        if let Some(tagger) = &self.tagger {
            match current_file {
                Some(file) => paths.extend(tagger.refer(file, log)),
                None => debug!("No current file, skipping tagger {}", tagger.program()),
            }
        }

        paths.into_iter().map(|path| absolutize(&path)).collect()
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
