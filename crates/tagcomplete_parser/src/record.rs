//! Candidate records and the single-line tag parser.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ParseError, decode_escapes};

/// One completion candidate parsed from a tag line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Symbol name. Never empty.
    pub word: String,

    /// Duplicate marker for completion menus. Always [`Self::DUPLICATE_MARKER`].
    pub dup: u8,

    /// Short classification code (`f`, `m`, ...). May be empty.
    pub kind: String,

    /// Display string, `module.signature`.
    pub menu: String,

    /// Menu text followed by a newline and the decoded documentation.
    pub info: String,
}

impl CandidateRecord {
    /// Value of the `dup` field on every record.
    pub const DUPLICATE_MARKER: u8 = 1;

    /// Builds a record from its already-extracted parts.
    pub fn new(
        word: impl Into<String>,
        kind: impl Into<String>,
        module: &str,
        signature: &str,
        doc: &str,
    ) -> Self {
        let menu = format!("{module}.{signature}");
        let info = format!("{menu}\n{doc}");
        Self {
            word: word.into(),
            dup: Self::DUPLICATE_MARKER,
            kind: kind.into(),
            menu,
            info,
        }
    }
}

/// Parses one line of a tag file.
///
/// Returns `Ok(None)` for lines that carry no tag: blank or whitespace-only
/// lines and `!` header lines. A trailing line terminator is tolerated.
///
/// # Errors
///
/// Returns a [`ParseError`] that embeds the raw line when the line has fewer
/// than three fields, an empty symbol name, an extension field without a
/// colon, or an undecodable `doc:` value.
pub fn parse_line(line: &str) -> Result<Option<CandidateRecord>, ParseError> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.trim().is_empty() || line.starts_with('!') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        return Err(ParseError::too_few_fields(line, fields.len()));
    }

    let word = fields[0];
    if word.is_empty() {
        return Err(ParseError::empty_word(line));
    }

    // The final field is reserved for trailing metadata and never read.
    let extension_fields = fields.get(3..fields.len() - 1).unwrap_or_default();

    let mut extensions: HashMap<&str, &str> = HashMap::with_capacity(extension_fields.len());
    for field in extension_fields {
        let (key, value) = field
            .split_once(':')
            .ok_or_else(|| ParseError::malformed_field(line, *field))?;
        extensions.insert(key.trim(), value.trim());
    }

    let get = |key: &str| extensions.get(key).copied().unwrap_or_default();
    let doc = decode_escapes(get("doc")).map_err(|e| ParseError::invalid_escape(line, e))?;

    Ok(Some(CandidateRecord::new(
        word,
        get("kind"),
        get("module"),
        get("string"),
        &doc,
    )))
}
