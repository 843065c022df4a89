//! Init command implementation
//!
//! Writes a `.tagcomplete.jsonc` whose `tagFiles` lists the tag files found
//! under the working directory.

use std::fs;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tagcomplete_core::CompletionConfig;
use tracing::{info, warn};
use walkdir::WalkDir;

/// How deep below the working directory tag files are looked for.
const SEARCH_DEPTH: usize = 3;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CompletionConfig::CONFIG_FILES[0]);

    if config_path.exists() && !force {
        return Err(miette::miette!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        ));
    }

    let tag_files = find_tag_files(Path::new("."));
    if tag_files.is_empty() {
        warn!("No tag files found; add them to tagFiles by hand");
    }

    let content = render_config(tag_files).into_diagnostic()?;
    fs::write(&config_path, content).into_diagnostic()?;

    info!("Created {}", config_path.display());
    Ok(())
}

/// Tag files below `dir`, relative to it and sorted.
///
/// A tag file is named `tags` or has the `.tags` extension. Hidden
/// directories are not entered.
fn find_tag_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(SEARCH_DEPTH)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()))
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_tag_file(entry.path()))
        .filter_map(|entry| entry.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect();

    files.sort();
    files
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|name| name.starts_with('.'))
}

fn is_tag_file(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "tags")
        || path.extension().is_some_and(|ext| ext == "tags")
}

fn render_config(tag_files: Vec<PathBuf>) -> serde_json::Result<String> {
    let config = CompletionConfig {
        tag_files,
        ..CompletionConfig::new()
    };
    let mut content = serde_json::to_string_pretty(&config)?;
    content.push('\n');
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    #[test]
    fn test_find_tag_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("julia/stdlib")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("tags"), "").unwrap();
        fs::write(dir.path().join("julia/Base.tags"), "").unwrap();
        fs::write(dir.path().join("julia/stdlib/LinearAlgebra.tags"), "").unwrap();
        fs::write(dir.path().join("julia/notes.txt"), "").unwrap();
        fs::write(dir.path().join(".git/tags"), "").unwrap();

        let files = find_tag_files(dir.path());

        assert_eq!(
            files,
            vec![
                PathBuf::from("julia/Base.tags"),
                PathBuf::from("julia/stdlib/LinearAlgebra.tags"),
                PathBuf::from("tags"),
            ]
        );
    }

    #[test]
    fn test_rendered_config_round_trips() {
        let content = render_config(vec![PathBuf::from("julia/Base.tags")]).unwrap();

        let config = CompletionConfig::from_json(&content).unwrap();

        assert_eq!(config.tag_files, vec![PathBuf::from("julia/Base.tags")]);
        assert_eq!(config.name, "julia");
        assert_eq!(config.eviction, tagcomplete_core::EvictionConfig::Retain);
    }
}
