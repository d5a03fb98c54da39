//! Percent Encoding (RFC 3986)
//!
//! Escaping depends on the part of the URL being written: a `/` is data in a
//! username but structure in a path. Encoding works on UTF-8 bytes, so a
//! non-ASCII character becomes one `%XX` triple per byte.

use crate::EscapeError;
use std::borrow::Cow;

/// Part of a URL being escaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeZone {
    /// Username and password
    Credentials,
    /// Host, including port and IPv6 brackets
    Host,
    /// Path
    Path,
    /// Query string
    Query,
    /// Fragment
    Fragment,
    /// A single component (query key or value): only alphanumerics and
    /// `-_.~` stay literal
    Component,
}

/// How a character class is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escaping {
    Never,
    Always,
    PerZone,
}

/// Allowed verbatim in hosts and paths
const SUB_DELIMS: &[char] = &['!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=', ':', '[', ']', '<', '>', '"'];

/// Never escaped
const UNRESERVED: &[char] = &['-', '_', '.', '~'];

/// Escaped or not depending on the zone
const RESERVED: &[char] = &['$', '&', '+', ',', '/', ':', ';', '=', '?', '@'];

/// Leading-byte masks for 2, 3 and 4 byte UTF-8 sequences
const UTF8_MASKS: [u8; 3] = [0b1100_0000, 0b1110_0000, 0b1111_0000];

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

fn classify(c: char, zone: EncodeZone) -> Escaping {
    if c.is_ascii_alphanumeric() {
        return Escaping::Never;
    }

    if matches!(zone, EncodeZone::Host | EncodeZone::Path) {
        if c == '%' {
            return Escaping::Always;
        }
        if SUB_DELIMS.contains(&c) {
            return Escaping::Never;
        }
    }

    if UNRESERVED.contains(&c) {
        Escaping::Never
    } else if RESERVED.contains(&c) {
        Escaping::PerZone
    } else {
        Escaping::Always
    }
}

/// Check whether `c` must be percent-escaped in `zone`
pub fn should_escape(c: char, zone: EncodeZone) -> bool {
    match classify(c, zone) {
        Escaping::Never => false,
        Escaping::Always => true,
        Escaping::PerZone => match zone {
            EncodeZone::Path => c == '?',
            EncodeZone::Credentials => matches!(c, '@' | '/' | '?' | ':'),
            EncodeZone::Fragment => false,
            // Host only gets here for `/`, `?` and `@`
            EncodeZone::Host | EncodeZone::Query | EncodeZone::Component => true,
        },
    }
}

/// Number of bytes in the UTF-8 sequence starting with `lead`
fn utf8_width(lead: u8) -> usize {
    1 + UTF8_MASKS.iter().take_while(|&&mask| lead & mask == mask).count()
}

fn push_escaped(out: &mut String, byte: u8) {
    out.push('%');
    out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
    out.push(HEX_DIGITS[(byte & 0x0F) as usize] as char);
}

/// Percent-encode `s` for `zone`
///
/// Returns the input unchanged when nothing needs escaping.
pub fn encode(s: &str, zone: EncodeZone) -> Cow<'_, str> {
    if !s.chars().any(|c| should_escape(c, zone)) {
        return Cow::Borrowed(s);
    }

    let bytes = s.as_bytes();
    let mut result = String::with_capacity(bytes.len() * 3);
    let mut i = 0;

    while i < bytes.len() {
        let width = utf8_width(bytes[i]).min(bytes.len() - i);
        for &byte in &bytes[i..i + width] {
            // Bytes of a multi-byte sequence map to U+0080..U+00FF, which always escape
            if should_escape(byte as char, zone) {
                push_escaped(&mut result, byte);
            } else {
                result.push(byte as char);
            }
        }
        i += width;
    }

    Cow::Owned(result)
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

/// Decode the `%XX` triple starting at byte `i`
fn unhex_at(s: &str, i: usize) -> Result<u8, EscapeError> {
    let bytes = s.as_bytes();
    if i + 2 >= bytes.len() {
        return Err(EscapeError::Truncated(i));
    }

    match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
        (Some(hi), Some(lo)) => Ok(hi << 4 | lo),
        _ => {
            let bad = s[i + 1..]
                .chars()
                .take(2)
                .find(|c| !c.is_ascii_hexdigit())
                .unwrap_or('%');
            Err(EscapeError::InvalidHex(bad))
        }
    }
}

/// Percent-decode `s`
///
/// Consecutive escapes forming one UTF-8 sequence are decoded together.
/// Sequences that are not valid UTF-8 decode to U+FFFD. Decoding is a single
/// pass: `%2541` yields `%41`, not `A`.
pub fn decode(s: &str) -> Result<Cow<'_, str>, EscapeError> {
    if !s.contains('%') {
        return Ok(Cow::Borrowed(s));
    }

    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len());
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        result.push_str(&s[literal_start..i]);

        let lead = unhex_at(s, i)?;
        let width = utf8_width(lead);
        let mut run = Vec::with_capacity(width);
        run.push(lead);
        i += 3;

        while run.len() < width && bytes.get(i) == Some(&b'%') {
            run.push(unhex_at(s, i)?);
            i += 3;
        }

        result.push_str(&String::from_utf8_lossy(&run));
        literal_start = i;
    }

    result.push_str(&s[literal_start..]);
    Ok(Cow::Owned(result))
}
