//! weburl - URL Parsing
//!
//! Parses raw URL strings into an immutable [`Url`], serializes them back to a
//! canonical string and resolves references against a base (RFC 3986).
//!
//! Features:
//! - Zone-aware, UTF-8 aware percent encoding
//! - Opaque URLs (`mailto:user@host`)
//! - IPv6 literals with zone identifiers
//! - Reference resolution with dot-segment removal

mod builder;
mod parser;
mod query;
mod url;

pub mod path;
pub mod percent;

pub use builder::UrlBuilder;
pub use crate::url::Url;
pub use percent::EncodeZone;
pub use query::QueryPairs;

/// Parse a raw URL string
pub fn parse(raw: &str) -> Result<Url, ParseError> {
    parser::parse(raw)
}

/// Percent-decoding error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    #[error("truncated escape sequence at byte {0}")]
    Truncated(usize),

    #[error("not a valid hex char: {0:?}")]
    InvalidHex(char),
}

/// Malformed URL
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("raw url string is empty")]
    Empty,

    #[error("missing scheme")]
    MissingScheme,

    #[error("IPv6 detected, but missing closing ']' token")]
    UnterminatedIpv6,

    #[error("invalid port")]
    InvalidPort,

    #[error("invalid host in: {0}")]
    InvalidHost(String),

    #[error("invalid escape sequence: {0}")]
    InvalidEscape(#[from] EscapeError),
}

/// Reference resolution error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("base URL is not absolute: {0}")]
    NotAbsolute(String),

    #[error(transparent)]
    Malformed(#[from] ParseError),
}
