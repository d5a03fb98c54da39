//! Path Resolution
//!
//! Merges a reference path into a base path and removes dot segments
//! (RFC 3986 section 5.2).

use std::borrow::Cow;

/// Resolve `reference` against `base`
///
/// ```text
/// '/some/path' resolve '..'      => '/'
/// '/some/path' resolve '.'       => '/some/'
/// '/some/path' resolve './here'  => '/some/here'
/// '/some/path' resolve '../here' => '/here'
/// ```
///
/// An empty `reference` only normalizes `base`. Excess `..` segments are
/// ignored.
pub fn resolve(base: &str, reference: &str) -> String {
    let merged: Cow<'_, str> = if reference.is_empty() {
        Cow::Borrowed(base)
    } else if !reference.starts_with('/') && !base.is_empty() {
        let dir = base.rfind('/').map_or("", |i| &base[..=i]);
        Cow::Owned(format!("{}{}", dir, reference))
    } else {
        Cow::Borrowed(reference)
    };

    if merged.is_empty() {
        return String::new();
    }

    let segments: Vec<&str> = merged.split('/').collect();
    let mut kept: Vec<&str> = Vec::with_capacity(segments.len());

    for segment in &segments {
        match *segment {
            "" | "." => {}
            ".." => {
                kept.pop();
            }
            s => kept.push(s),
        }
    }

    // A trailing dot segment names a directory
    if matches!(segments.last(), Some(&".") | Some(&"..")) {
        kept.push("");
    }

    format!("/{}", kept.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_against_absolute_base() {
        assert_eq!(resolve("/some/path", ".."), "/");
        assert_eq!(resolve("/some/path/", ".."), "/some/");
        assert_eq!(resolve("/some/path", "."), "/some/");
        assert_eq!(resolve("/some/path", "./here"), "/some/here");
        assert_eq!(resolve("/some/path", "../here"), "/here");
        assert_eq!(resolve("/abc/abc", "/123"), "/123");
        assert_eq!(resolve("/abc", "123"), "/123");
    }

    #[test]
    fn test_resolve_relative_base() {
        let cases = [
            ("", "", ""),
            ("abc", "", "/abc"),
            ("abc", "456", "/456"),
            ("abc/def", ".", "/abc/"),
            ("abc/def", "123", "/abc/123"),
            ("abc/def", "..", "/"),
            ("abc/def", "../123", "/123"),
            ("abc/", "..", "/"),
            ("abc/", "../..", "/"),
            ("abc/def/hij", "..", "/abc/"),
            ("abc/def/hij", ".", "/abc/def/"),
            ("abc/def/hij", "../123", "/abc/123"),
            ("abc/def/hij", ".././123", "/abc/123"),
            ("abc/def/hij", "../../123", "/123"),
            ("abc/def/hij", "./../123", "/abc/123"),
            ("abc/hij", "./..", "/"),
        ];
        for (base, reference, expected) in cases {
            assert_eq!(resolve(base, reference), expected, "{:?} + {:?}", base, reference);
        }
    }

    #[test]
    fn test_normalize_only() {
        assert_eq!(resolve("abc/../hij", ""), "/hij");
        assert_eq!(resolve("abc/./hij", ""), "/abc/hij");
        assert_eq!(resolve("abc/./hij", "."), "/abc/");
        assert_eq!(resolve("abc/../hij", "."), "/");
        assert_eq!(resolve("abc/.././123", "x"), "/x");
    }

    #[test]
    fn test_excess_parent_segments() {
        assert_eq!(resolve("", "../../../././../"), "/");
        assert_eq!(resolve("../../../././../", "../../../././../"), "/");
        assert_eq!(resolve("../////../.././/./../", "../../../././../"), "/");
    }

    #[test]
    fn test_empty_segments_collapse() {
        assert_eq!(resolve("abc", "////"), "/");
        assert_eq!(resolve("/////", "abc"), "/abc");
    }

    #[test]
    fn test_triple_dots_are_plain_segments() {
        assert_eq!(resolve("/foo/bar/", "..."), "/foo/bar/...");
        assert_eq!(resolve("/foo/bar/", "./..."), "/foo/bar/...");
    }
}
