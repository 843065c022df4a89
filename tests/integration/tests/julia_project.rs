//! Integration tests over a Julia fixture project
//!
//! Loads the fixture configuration, discovers its tag files and runs
//! completions through the full pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::rstest;
use tagcomplete_core::{
    CandidateRecord, CompletionConfig, CompletionContext, ConfiguredDiscovery, EventContext,
    MemoryLog, TagCompletionSource,
};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_source() -> (TagCompletionSource<ConfiguredDiscovery>, MemoryLog) {
    let config_path = CompletionConfig::discover(fixtures_dir()).expect("fixture config");
    let config = CompletionConfig::from_file(&config_path).unwrap();
    let discovery = ConfiguredDiscovery::from_config(&config);
    let log = MemoryLog::new();
    let source = TagCompletionSource::new(config, discovery, log.clone());
    (source, log)
}

fn complete(source: &mut TagCompletionSource<ConfiguredDiscovery>, pattern: &str) -> Vec<CandidateRecord> {
    source
        .gather_candidates(&CompletionContext::new(pattern))
        .unwrap()
}

mod fixture_project {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_configured_tag_files_and_skips_missing_one() {
        let (mut source, log) = fixture_source();

        let report = source.on_event(&EventContext::default()).unwrap();

        assert_eq!(source.mark(), "[JL]");
        assert_eq!(report.loaded.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].ends_with("julia/Missing.tags"));
        assert_eq!(source.cache().total_candidates(), 8);

        let messages = log.messages();
        assert!(messages.iter().any(|m| m.ends_with("Base.tags, with 5 tags")));
        assert!(messages.iter().any(|m| m.ends_with("LinearAlgebra.tags, with 3 tags")));
        assert_eq!(messages.last().map(String::as_str), Some("Cache made"));
    }

    #[rstest]
    #[case::suffix("norm", vec!["LinearAlgebra.norm(A, p::Real=2)", "LinearAlgebra.opnorm(A, p::Real=2)"])]
    #[case::bang(r"push\w*!", vec!["Base.push!(collection, items...)", "Base.pushfirst!(collection, items...)"])]
    fn completes_by_word_suffix(#[case] pattern: &str, #[case] expected: Vec<&str>) {
        let (mut source, _log) = fixture_source();

        let candidates = complete(&mut source, pattern);

        let menus: Vec<&str> = candidates.iter().map(|c| c.menu.as_str()).collect();
        assert_eq!(menus, expected);
    }

    #[test]
    fn groups_same_word_across_files() {
        let (mut source, _log) = fixture_source();

        let candidates = complete(&mut source, "^map");

        let menus: Vec<&str> = candidates.iter().map(|c| c.menu.as_str()).collect();
        assert_eq!(
            menus,
            vec!["Base.map(f, c...)", "LinearAlgebra.map(f, A::Adjoint)"]
        );
    }

    #[test]
    fn decodes_documentation_escapes() {
        let (mut source, _log) = fixture_source();

        let map = complete(&mut source, "^map").remove(0);
        let norm = complete(&mut source, "^norm").remove(0);
        let push = complete(&mut source, "^push!").remove(0);

        assert_eq!(
            map.info,
            "Base.map(f, c...)\nTransform collection \"c\" by applying \"f\" to each element.\n\nSee also \u{2218}."
        );
        assert_eq!(norm.info, "LinearAlgebra.norm(A, p::Real=2)\nCompute the p-norm of \"A\".");
        assert_eq!(
            push.info,
            "Base.push!(collection, items...)\nInsert one or more \"items\" in \"collection\"."
        );
    }

    #[test]
    fn completes_non_ascii_words() {
        let (mut source, _log) = fixture_source();

        let candidates = complete(&mut source, "\u{2218}");

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].word, "\u{2218}");
        assert_eq!(candidates[0].kind, "f");
    }

    #[test]
    fn record_without_doc_has_menu_and_newline_info() {
        let (mut source, _log) = fixture_source();

        let candidates = complete(&mut source, "AbstractArray");

        assert_eq!(candidates[0].kind, "t");
        assert_eq!(candidates[0].menu, "Core.AbstractArray{T,N}");
        assert_eq!(candidates[0].info, "Core.AbstractArray{T,N}\n");
    }
}

mod copied_project {
    use super::*;
    use pretty_assertions::assert_eq;

    fn copy_fixtures(dest: &Path) {
        fs::create_dir_all(dest.join("julia")).unwrap();
        fs::copy(
            fixtures_dir().join(".tagcomplete.jsonc"),
            dest.join(".tagcomplete.jsonc"),
        )
        .unwrap();
        for name in ["Base.tags", "LinearAlgebra.tags"] {
            fs::copy(fixtures_dir().join("julia").join(name), dest.join("julia").join(name)).unwrap();
        }
    }

    #[test]
    fn picks_up_regenerated_tag_file() {
        let temp = TempDir::new().unwrap();
        copy_fixtures(temp.path());
        let config = CompletionConfig::from_file(temp.path().join(".tagcomplete.jsonc")).unwrap();
        let discovery = ConfiguredDiscovery::from_config(&config);
        let mut source = TagCompletionSource::new(config, discovery, MemoryLog::new());
        source.on_event(&EventContext::default()).unwrap();
        assert!(complete(&mut source, "^inv").is_empty());

        let missing = temp.path().join("julia/Missing.tags");
        fs::write(
            &missing,
            "inv\tLinearAlgebra/src/dense.jl\t900\tkind:f\tmodule:LinearAlgebra\tstring:inv(M)\t\n",
        )
        .unwrap();
        let report = source.on_event(&EventContext::default()).unwrap();

        assert_eq!(report.loaded.len(), 1);
        assert_eq!(report.unchanged, 2);
        let candidates = complete(&mut source, "^inv");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].menu, "LinearAlgebra.inv(M)");
    }
}
