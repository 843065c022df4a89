//! Parse and load error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while decoding a backslash-escaped `doc:` value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    /// The value ends with a single backslash.
    #[error("trailing backslash at byte {offset}")]
    TrailingBackslash {
        /// Byte offset of the backslash.
        offset: usize,
    },

    /// A `\x`, `\u` or `\U` escape has fewer hex digits than required.
    #[error("truncated \\{escape} escape at byte {offset}: expected {expected} hex digits")]
    TruncatedHex {
        /// The escape letter (`x`, `u` or `U`).
        escape: char,
        /// Number of hex digits the escape requires.
        expected: usize,
        /// Byte offset of the backslash.
        offset: usize,
    },

    /// A `\N` escape is not of the form `\N{NAME}`.
    #[error("malformed \\N character escape at byte {offset}")]
    MalformedName {
        /// Byte offset of the backslash.
        offset: usize,
    },

    /// A `\N{NAME}` escape names no Unicode character.
    #[error("unknown Unicode character name {name:?} at byte {offset}")]
    UnknownName {
        /// The name as written.
        name: String,
        /// Byte offset of the backslash.
        offset: usize,
    },

    /// The escape names a code point that is not a Unicode scalar value.
    #[error("invalid code point U+{value:04X} at byte {offset}")]
    InvalidCodePoint {
        /// The decoded numeric value.
        value: u32,
        /// Byte offset of the backslash.
        offset: usize,
    },
}

/// Errors that can occur while parsing a single tag line.
///
/// Every variant carries the raw line so callers can report it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line has fewer than the three mandatory fields.
    #[error("expected at least 3 tab-separated fields, found {found}: {line:?}")]
    TooFewFields {
        /// The offending line.
        line: String,
        /// Number of fields found.
        found: usize,
    },

    /// The symbol name field is empty.
    #[error("empty symbol name: {line:?}")]
    EmptyWord {
        /// The offending line.
        line: String,
    },

    /// An extension field is not of the form `key:value`.
    #[error("malformed extension field {field:?} (expected key:value): {line:?}")]
    MalformedField {
        /// The offending line.
        line: String,
        /// The field without a colon.
        field: String,
    },

    /// The `doc:` value contains an undecodable escape sequence.
    #[error("invalid escape in doc field: {source}: {line:?}")]
    InvalidEscape {
        /// The offending line.
        line: String,
        /// The underlying decode failure.
        #[source]
        source: EscapeError,
    },
}

impl ParseError {
    /// Creates a too-few-fields error.
    pub fn too_few_fields(line: impl Into<String>, found: usize) -> Self {
        Self::TooFewFields {
            line: line.into(),
            found,
        }
    }

    /// Creates an empty-word error.
    pub fn empty_word(line: impl Into<String>) -> Self {
        Self::EmptyWord { line: line.into() }
    }

    /// Creates a malformed-field error.
    pub fn malformed_field(line: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MalformedField {
            line: line.into(),
            field: field.into(),
        }
    }

    /// Creates an invalid-escape error.
    pub fn invalid_escape(line: impl Into<String>, source: EscapeError) -> Self {
        Self::InvalidEscape {
            line: line.into(),
            source,
        }
    }

    /// Returns the raw line that failed to parse.
    pub fn line(&self) -> &str {
        match self {
            Self::TooFewFields { line, .. }
            | Self::EmptyWord { line }
            | Self::MalformedField { line, .. }
            | Self::InvalidEscape { line, .. } => line,
        }
    }
}

/// Errors that can occur while loading a whole tag file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The tag file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of the file failed to parse.
    #[error("{}:{line_number}: {source}", path.display())]
    Parse {
        /// The tag file path.
        path: PathBuf,
        /// 1-based line number of the offending line.
        line_number: usize,
        /// The underlying parse failure.
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error for `path` at `line_number`.
    pub fn parse(path: impl Into<PathBuf>, line_number: usize, source: ParseError) -> Self {
        Self::Parse {
            path: path.into(),
            line_number,
            source,
        }
    }

    /// Returns the tag file this error belongs to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }

    /// Returns the raw offending line for parse failures.
    pub fn line(&self) -> Option<&str> {
        match self {
            Self::Io { .. } => None,
            Self::Parse { source, .. } => Some(source.line()),
        }
    }
}
