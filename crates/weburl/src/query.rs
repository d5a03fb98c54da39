//! Query Pairs
//!
//! Splits a raw query string into keys and their values. Nothing is decoded.

use std::collections::HashMap;

/// Marks a query that is present but empty (input ended in a bare `?`)
pub(crate) const EMPTY_QUERY: &str = "?";

/// Parameter name to its values, in order of appearance
pub type QueryPairs = HashMap<String, Vec<String>>;

/// Split a query (without the leading `?`) on `&`, then each piece on its first `=`
///
/// Pieces with an empty key are dropped. A key without a value still gets an
/// entry, with no values.
pub(crate) fn parse_pairs(query: Option<&str>) -> QueryPairs {
    let mut pairs = QueryPairs::new();
    let Some(query) = query.filter(|q| *q != EMPTY_QUERY) else {
        return pairs;
    };

    for piece in query.split('&') {
        let (key, value) = match piece.split_once('=') {
            Some((k, v)) => (k, Some(v)),
            None => (piece, None),
        };
        if key.is_empty() {
            continue;
        }

        let values = pairs.entry(key.to_string()).or_default();
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            values.push(value.to_string());
        }
    }

    pairs
}
