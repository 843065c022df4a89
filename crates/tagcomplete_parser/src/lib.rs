//! # tagcomplete_parser
//!
//! Tag file parsing for tagcomplete.
//!
//! This crate provides:
//! - `parse_line`, turning one ctags-style line into a `CandidateRecord`
//! - `decode_escapes`, the backslash-escape decoder used for `doc:` fields
//! - A `TagFileLoader` trait and the default `CtagsLoader`
//!
//! ## Format
//!
//! Lines are tab separated. Fields 0–2 are the symbol name, the source file
//! and the address. Every field after that except the last one is a
//! `key:value` extension field. Blank lines and lines starting with `!` are
//! headers and produce nothing.
//!
//! ## Example
//!
//! ```rust
//! use tagcomplete_parser::parse_line;
//!
//! let line = "foo\tfile.jl\t1\tkind:f\tmodule:Base\tstring:foo(x)\tdoc:returns\\nx\t";
//! let record = parse_line(line).unwrap().unwrap();
//!
//! assert_eq!(record.word, "foo");
//! assert_eq!(record.menu, "Base.foo(x)");
//! assert_eq!(record.info, "Base.foo(x)\nreturns\nx");
//! ```

mod error;
mod escape;
mod loader;
mod record;

pub use error::{EscapeError, LoadError, ParseError};
pub use escape::decode_escapes;
pub use loader::{CtagsLoader, TagFileLoader, parse_tags};
pub use record::{CandidateRecord, parse_line};
