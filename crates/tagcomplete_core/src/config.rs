//! Completion source configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use tagcomplete_cache::EvictionPolicy;

use crate::CompletionError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration for a tag completion source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionConfig {
    /// Source name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Mark shown next to candidates.
    #[serde(default = "default_mark")]
    pub mark: String,

    /// Buffer filetypes served by this source.
    #[serde(default = "default_filetypes")]
    pub filetypes: Vec<String>,

    /// Tag files that are always relevant.
    #[serde(default)]
    pub tag_files: Vec<PathBuf>,

    /// External tagger printing the tag files for the current buffer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagger: Option<TaggerConfig>,

    /// Sources that should not be enabled together with this one.
    #[serde(default = "default_conflicting_sources")]
    pub conflicting_sources: Vec<String>,

    /// What to do with tag files that stop being relevant.
    #[serde(default)]
    pub eviction: EvictionConfig,

    /// Base directory for resolving relative tag file paths.
    /// This is usually the directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_name() -> String {
    "julia".to_string()
}

fn default_mark() -> String {
    "[J]".to_string()
}

fn default_filetypes() -> Vec<String> {
    vec!["julia".to_string()]
}

fn default_conflicting_sources() -> Vec<String> {
    vec!["tag".to_string()]
}

/// External tagger invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaggerConfig {
    /// Program to run.
    pub program: String,

    /// Arguments placed before the current file path.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Eviction setting as written in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum EvictionConfig {
    /// Keep entries forever.
    #[default]
    Retain,
    /// Drop entries missing from this many consecutive refreshes.
    Idle { refreshes: u32 },
}

impl From<EvictionConfig> for EvictionPolicy {
    fn from(config: EvictionConfig) -> Self {
        match config {
            EvictionConfig::Retain => EvictionPolicy::Retain,
            EvictionConfig::Idle { refreshes } => EvictionPolicy::IdleRefreshes(refreshes),
        }
    }
}

impl CompletionConfig {
    /// Config file names looked up by [`CompletionConfig::discover`], in order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".tagcomplete.jsonc", ".tagcomplete.json"];

    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            name: default_name(),
            mark: default_mark(),
            filetypes: default_filetypes(),
            tag_files: Vec::new(),
            tagger: None,
            conflicting_sources: default_conflicting_sources(),
            eviction: EvictionConfig::default(),
            base_dir: None,
        }
    }

    /// Finds the first config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.tagcomplete.jsonc` and `.tagcomplete.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CompletionError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CompletionError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from a JSON (or JSONC) string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, CompletionError> {
        let value: serde_json::Value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| CompletionError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(CompletionError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| CompletionError::config(format!("Invalid config: {}", e)))
    }

    /// Configured tag files, with relative paths joined onto `base_dir`.
    pub fn resolved_tag_files(&self) -> Vec<PathBuf> {
        self.tag_files
            .iter()
            .map(|path| match &self.base_dir {
                Some(base) if path.is_relative() => base.join(path),
                _ => path.clone(),
            })
            .collect()
    }

    /// The cache eviction policy.
    pub fn eviction_policy(&self) -> EvictionPolicy {
        self.eviction.into()
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self::new()
    }
}
