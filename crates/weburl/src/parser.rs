//! URL Parser
//!
//! Peels the fragment and query off the end of the input, then walks scheme,
//! authority and path from the front. Parsing is all-or-nothing.

use crate::ParseError;
use crate::builder::{UrlBuilder, parse_port};
use crate::percent;
use crate::query::EMPTY_QUERY;
use crate::url::Url;

/// Parse a raw URL string
pub(crate) fn parse(raw: &str) -> Result<Url, ParseError> {
    tracing::trace!("Parsing URL: {}", raw);
    parse_url(raw).inspect_err(|err| tracing::debug!("Rejected URL {:?}: {}", raw, err))
}

fn parse_url(raw: &str) -> Result<Url, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut builder = UrlBuilder::new();

    // Extract fragment (after the last '#', kept raw)
    let rest = match raw.rsplit_once('#') {
        Some((rest, fragment)) => {
            builder.fragment = Some(fragment.to_string());
            rest
        }
        None => raw,
    };

    if rest.is_empty() {
        return Ok(builder.build());
    }

    // Request-target wildcard (RFC 7230 asterisk-form)
    if rest == "*" {
        builder.path = Some(rest.to_string());
        return Ok(builder.build());
    }

    // Extract query; a '?' in first position does not start one
    let rest = match rest.find('?') {
        Some(i) if i > 0 => {
            let query = &rest[i + 1..];
            let query = if query.is_empty() { EMPTY_QUERY } else { query };
            builder.query = Some(query.to_string());
            &rest[..i]
        }
        _ => rest,
    };

    let (scheme, mut rest) = split_scheme(rest)?;
    let has_scheme = scheme.is_some();
    builder.scheme = scheme;

    if has_scheme && !rest.starts_with('/') {
        builder.opaque = Some(rest.to_string());
        return Ok(builder.build());
    }

    // Without a scheme, "///x" is a path, not an empty authority
    if (has_scheme || !rest.starts_with("///")) && rest.starts_with("//") {
        let after_slashes = &rest[2..];
        let (authority, path) = match after_slashes.find('/') {
            Some(i) => after_slashes.split_at(i),
            None => (after_slashes, ""),
        };
        parse_authority(authority, &mut builder)?;
        rest = path;
    }

    if !rest.is_empty() {
        builder.path = Some(percent::decode(rest)?.into_owned());
        builder.raw_path = Some(rest.to_string());
    }

    Ok(builder.build())
}

/// Split off a leading `scheme:`
///
/// A scheme is a letter followed by letters, digits, `+`, `-` or `.`. Any
/// other character before the first `:` means there is no scheme.
fn split_scheme(s: &str) -> Result<(Option<String>, &str), ParseError> {
    for (i, c) in s.char_indices() {
        match c {
            'a'..='z' | 'A'..='Z' => {}
            '0'..='9' | '+' | '-' | '.' if i > 0 => {}
            ':' if i == 0 => return Err(ParseError::MissingScheme),
            ':' => return Ok((Some(s[..i].to_ascii_lowercase()), &s[i + 1..])),
            _ => break,
        }
    }
    Ok((None, s))
}

/// Parse `[user[:password]@]host[:port]` into the builder
fn parse_authority(authority: &str, builder: &mut UrlBuilder) -> Result<(), ParseError> {
    // Userinfo ends at the last '@', so unescaped '@' in credentials survives
    let host = match authority.rsplit_once('@') {
        Some((credentials, host)) => {
            match credentials.split_once(':') {
                Some((username, password)) => {
                    builder.username = Some(percent::decode(username)?.into_owned());
                    builder.password = Some(percent::decode(password)?.into_owned());
                }
                None => {
                    builder.username = Some(percent::decode(credentials)?.into_owned());
                }
            }
            host
        }
        None => authority,
    };

    validate_host(host)?;

    if !host.is_empty() {
        builder.host = Some(percent::decode(&host.to_lowercase())?.into_owned());
    }

    Ok(())
}

/// Check the port of a host and the brackets of an IPv6 literal
fn validate_host(host: &str) -> Result<(), ParseError> {
    if host.starts_with('[') {
        let end = host.rfind(']').ok_or(ParseError::UnterminatedIpv6)?;
        if !is_port_valid(&host[end + 1..]) {
            return Err(ParseError::InvalidPort);
        }
    } else if let Some((_, port)) = host.split_once(':') {
        if port.contains(':') {
            return Err(ParseError::InvalidHost(host.to_string()));
        }
        if parse_port(port).is_none() {
            return Err(ParseError::InvalidPort);
        }
    }
    Ok(())
}

/// Check the text following an IPv6 literal: empty, or `:` and digits
fn is_port_valid(suffix: &str) -> bool {
    suffix.is_empty() || suffix.strip_prefix(':').and_then(parse_port).is_some()
}
