//! External tagger invocation.
//!
//! The tagger is a separate program that, given the current buffer, prints
//! the tag files relevant to it on stdout (one path per line) and any
//! diagnostics on stderr.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::CompletionLog;
use crate::config::TaggerConfig;

/// Output of one tagger run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggerOutput {
    /// Tag file paths printed on stdout.
    pub tag_files: Vec<PathBuf>,
    /// Lines printed on stderr.
    pub diagnostics: Vec<String>,
    /// Whether the process exited successfully.
    pub success: bool,
}

/// A synchronous external tagger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTagger {
    program: String,
    args: Vec<String>,
}

impl ExternalTagger {
    /// Creates a tagger running `program args... <current file>`.
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a tagger from its configuration.
    pub fn from_config(config: &TaggerConfig) -> Self {
        Self::new(config.program.clone(), config.args.iter().cloned())
    }

    /// Program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs the tagger for `current_file` and collects its output.
    ///
    /// # Errors
    ///
    /// Returns an I/O error only if the process cannot be started. A non-zero
    /// exit status is reported through [`TaggerOutput::success`].
    pub fn run(&self, current_file: &Path) -> std::io::Result<TaggerOutput> {
        debug!("Running tagger {} for {}", self.program, current_file.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(current_file)
            .stdin(Stdio::null())
            .output()?;

        let tag_files = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();
        let diagnostics = String::from_utf8_lossy(&output.stderr)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(TaggerOutput {
            tag_files,
            diagnostics,
            success: output.status.success(),
        })
    }

    /// Runs the tagger and returns the tag files it names.
    ///
    /// Diagnostics are forwarded to `log` as `Tagger: <line>`. Nothing here is
    /// fatal: a tagger that cannot be started contributes no files, and one
    /// that exits unsuccessfully still contributes whatever it printed.
    pub fn refer(&self, current_file: &Path, log: &dyn CompletionLog) -> Vec<PathBuf> {
        match self.run(current_file) {
            Ok(output) => {
                for line in &output.diagnostics {
                    log.log(&format!("Tagger: {line}"));
                }
                if !output.success {
                    warn!("Tagger {} exited unsuccessfully", self.program);
                }
                output.tag_files
            }
            Err(e) => {
                warn!("Failed to run tagger {}: {}", self.program, e);
                log.log(&format!("Tagger: failed to run {}: {e}", self.program));
                Vec::new()
            }
        }
    }
}
