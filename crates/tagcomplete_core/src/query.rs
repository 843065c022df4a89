//! Candidate queries over a cache snapshot.
//!
//! Candidates are grouped by word, then the words are filtered by a keyword
//! pattern that must match at the *end* of the word. This is a search
//! anchored at the end only: `foo` selects `foo` and `barfoo`, not `foobar`.

use std::collections::HashMap;

use regex::Regex;
use tagcomplete_cache::CacheSnapshot;
use tagcomplete_parser::CandidateRecord;
use thiserror::Error;

/// Errors produced while preparing a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The keyword pattern is not a valid regular expression.
    #[error("Invalid keyword pattern {pattern:?}: {source}")]
    Compile {
        /// The pattern as supplied by the caller.
        pattern: String,
        /// The compile failure.
        #[source]
        source: regex::Error,
    },
}

/// A compiled, end-anchored keyword pattern.
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    pattern: String,
    regex: Regex,
}

impl KeywordPattern {
    /// Compiles `pattern` as `(?:pattern)$`.
    pub fn new(pattern: &str) -> Result<Self, QueryError> {
        let regex = Regex::new(&format!("(?:{pattern})$")).map_err(|source| QueryError::Compile {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as supplied, without the anchor.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the pattern matches at the end of `word`.
    pub fn matches(&self, word: &str) -> bool {
        self.regex.is_match(word)
    }
}

/// Candidates grouped by word.
///
/// Words keep the order in which they were first seen; each word keeps all
/// of its records in insertion order, duplicates included.
#[derive(Debug, Default)]
pub struct CandidateIndex<'a> {
    words: Vec<&'a str>,
    groups: HashMap<&'a str, Vec<&'a CandidateRecord>>,
}

impl<'a> CandidateIndex<'a> {
    /// Groups every candidate of a snapshot.
    pub fn build(snapshot: &'a CacheSnapshot) -> Self {
        Self::from_candidates(snapshot.candidates())
    }

    /// Groups an arbitrary sequence of candidates.
    pub fn from_candidates(candidates: impl IntoIterator<Item = &'a CandidateRecord>) -> Self {
        let mut words = Vec::new();
        let mut groups: HashMap<&'a str, Vec<&'a CandidateRecord>> = HashMap::new();
        for candidate in candidates {
            let word = candidate.word.as_str();
            groups
                .entry(word)
                .or_insert_with(|| {
                    words.push(word);
                    Vec::new()
                })
                .push(candidate);
        }
        Self { words, groups }
    }

    /// Distinct words in first-seen order.
    pub fn words(&self) -> &[&'a str] {
        &self.words
    }

    /// All records for `word`.
    pub fn get(&self, word: &str) -> &[&'a CandidateRecord] {
        self.groups.get(word).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Records of every word that matches `pattern`.
    pub fn matching<'p>(
        &'p self,
        pattern: &'p KeywordPattern,
    ) -> impl Iterator<Item = &'a CandidateRecord> + 'p {
        self.words
            .iter()
            .filter(move |word| pattern.matches(word))
            .flat_map(move |word| self.get(word).iter().copied())
    }
}

/// Returns every cached candidate whose word ends with a match of `pattern`.
pub fn gather_candidates(snapshot: &CacheSnapshot, pattern: &KeywordPattern) -> Vec<CandidateRecord> {
    CandidateIndex::build(snapshot)
        .matching(pattern)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn record(word: &str, kind: &str, module: &str) -> CandidateRecord {
        CandidateRecord::new(word, kind, module, word, "")
    }

    fn words_of(records: &[CandidateRecord]) -> Vec<&str> {
        records.iter().map(|r| r.word.as_str()).collect()
    }

    fn query(candidates: &[CandidateRecord], pattern: &str) -> Vec<CandidateRecord> {
        let pattern = KeywordPattern::new(pattern).unwrap();
        CandidateIndex::from_candidates(candidates)
            .matching(&pattern)
            .cloned()
            .collect()
    }

    #[test]
    fn test_end_anchored_match() {
        let candidates = vec![
            record("foo", "f", "Base"),
            record("foobar", "f", "Base"),
            record("barfoo", "f", "Base"),
        ];

        let result = query(&candidates, "foo");

        assert_eq!(words_of(&result), vec!["foo", "barfoo"]);
    }

    #[rstest]
    #[case::word_pattern(r"[a-z_]+", &["push", "pop!", "push_all"], &["push", "push_all"])]
    #[case::bang_suffix(r"p\w*!", &["push!", "pop!", "map"], &["push!", "pop!"])]
    #[case::alternation("ab|cd", &["xab", "abx", "xcd"], &["xab", "xcd"])]
    #[case::full_word(r"^map$", &["map", "mapreduce", "pmap"], &["map"])]
    #[case::unicode(r"α\w*", &["α1", "βα", "x"], &["α1", "βα"])]
    fn test_pattern_cases(#[case] pattern: &str, #[case] words: &[&str], #[case] expected: &[&str]) {
        let candidates: Vec<_> = words.iter().map(|w| record(w, "f", "M")).collect();
        let result = query(&candidates, pattern);
        assert_eq!(words_of(&result), expected);
    }

    #[test]
    fn test_duplicates_are_grouped_in_insertion_order() {
        let candidates = vec![
            record("sum", "f", "Base"),
            record("map", "f", "Base"),
            record("sum", "m", "Statistics"),
            record("sum", "f", "Base"),
        ];

        let index = CandidateIndex::from_candidates(&candidates);

        assert_eq!(index.words(), &["sum", "map"]);
        assert_eq!(index.len(), 2);
        let sums: Vec<(&str, &str)> = index
            .get("sum")
            .iter()
            .map(|r| (r.kind.as_str(), r.menu.as_str()))
            .collect();
        assert_eq!(
            sums,
            vec![("f", "Base.sum"), ("m", "Statistics.sum"), ("f", "Base.sum")]
        );

        let result = query(&candidates, "sum");
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_matching_keeps_group_order() {
        let candidates = vec![
            record("afoo", "f", "A"),
            record("bfoo", "f", "B"),
            record("afoo", "m", "C"),
        ];

        let result = query(&candidates, "foo");
        let menus: Vec<&str> = result.iter().map(|r| r.menu.as_str()).collect();

        assert_eq!(menus, vec!["A.afoo", "C.afoo", "B.bfoo"]);
    }

    #[test]
    fn test_unknown_word_has_no_records() {
        let index = CandidateIndex::from_candidates(&[]);
        assert!(index.is_empty());
        assert!(index.get("missing").is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = KeywordPattern::new("foo(").unwrap_err();
        let QueryError::Compile { pattern, .. } = &err;
        assert_eq!(pattern, "foo(");
        assert!(err.to_string().contains("Invalid keyword pattern"));
    }

    #[test]
    fn test_pattern_as_str_is_unanchored() {
        let pattern = KeywordPattern::new(r"\w+").unwrap();
        assert_eq!(pattern.as_str(), r"\w+");
        assert!(pattern.matches("abc"));
        assert!(!pattern.matches("abc!"));
    }

    #[test]
    fn test_gather_candidates_from_empty_snapshot() {
        let pattern = KeywordPattern::new("foo").unwrap();
        assert!(gather_candidates(&CacheSnapshot::default(), &pattern).is_empty());
    }
}
