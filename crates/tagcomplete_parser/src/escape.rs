//! Backslash-escape decoding for `doc:` fields.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::EscapeError;

/// Decodes backslash escapes in a tag `doc:` value.
///
/// Supported escapes are the usual single-character ones (`\n`, `\t`, `\\`,
/// `\'`, `\"`, `\a`, `\b`, `\f`, `\r`, `\v`), octal `\o` to `\ooo`, `\xhh`,
/// `\uXXXX`, `\UXXXXXXXX`, named `\N{NAME}` characters and a
/// backslash-newline line continuation, which is dropped. Unrecognised
/// escapes such as `\q` are kept as written.
///
/// # Errors
///
/// Returns an [`EscapeError`] for a trailing lone backslash, a hex escape
/// with too few digits, a code point that is not a Unicode scalar value, or
/// a `\N` escape that is malformed or names no character.
pub fn decode_escapes(raw: &str) -> Result<String, EscapeError> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some((_, escape)) = chars.next() else {
            return Err(EscapeError::TrailingBackslash { offset });
        };

        match escape {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            'x' => out.push(read_hex(&mut chars, 'x', 2, offset)?),
            'u' => out.push(read_hex(&mut chars, 'u', 4, offset)?),
            'U' => out.push(read_hex(&mut chars, 'U', 8, offset)?),
            'N' => out.push(read_name(&mut chars, offset)?),
            '0'..='7' => out.push(read_octal(&mut chars, escape, offset)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

fn read_hex(
    chars: &mut Peekable<CharIndices<'_>>,
    escape: char,
    digits: usize,
    offset: usize,
) -> Result<char, EscapeError> {
    let mut value: u32 = 0;
    for _ in 0..digits {
        let digit = chars
            .next_if(|&(_, c)| c.is_ascii_hexdigit())
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or(EscapeError::TruncatedHex {
                escape,
                expected: digits,
                offset,
            })?;
        value = value
            .checked_mul(16)
            .and_then(|v| v.checked_add(digit))
            .ok_or(EscapeError::InvalidCodePoint { value, offset })?;
    }
    char::from_u32(value).ok_or(EscapeError::InvalidCodePoint { value, offset })
}

fn read_name(chars: &mut Peekable<CharIndices<'_>>, offset: usize) -> Result<char, EscapeError> {
    if chars.next_if(|&(_, c)| c == '{').is_none() {
        return Err(EscapeError::MalformedName { offset });
    }

    let mut name = String::new();
    loop {
        match chars.next() {
            Some((_, '}')) if !name.is_empty() => break,
            Some((_, '}')) | None => return Err(EscapeError::MalformedName { offset }),
            Some((_, c)) => name.push(c),
        }
    }

    unicode_names2::character(&name).ok_or(EscapeError::UnknownName { name, offset })
}

fn read_octal(
    chars: &mut Peekable<CharIndices<'_>>,
    first: char,
    offset: usize,
) -> Result<char, EscapeError> {
    // `first` is guaranteed to be an octal digit by the caller.
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        match chars.next_if(|&(_, c)| matches!(c, '0'..='7')) {
            Some((_, c)) => value = value * 8 + c.to_digit(8).unwrap_or(0),
            None => break,
        }
    }
    char::from_u32(value).ok_or(EscapeError::InvalidCodePoint { value, offset })
}
