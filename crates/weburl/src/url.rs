//! URL Value
//!
//! An immutable parsed URL. The canonical string and the query pairs are
//! computed on first use and cached.

use crate::builder::UrlBuilder;
use crate::percent::{self, EncodeZone};
use crate::query::{self, EMPTY_QUERY, QueryPairs};
use crate::{ParseError, ResolveError, path};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

/// Parsed URL (RFC 3986)
///
/// Equality and hashing compare the canonical string, so
/// `http://www.DOMAIN.com` equals `http://www.domain.com`.
#[derive(Clone)]
pub struct Url {
    pub(crate) scheme: Option<String>,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) hostname: Option<String>,
    pub(crate) port: Option<u32>,
    pub(crate) path: Option<String>,
    pub(crate) raw_path: Option<String>,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
    pub(crate) opaque: Option<String>,
    pub(crate) serialized: OnceLock<String>,
    pub(crate) query_pairs: OnceLock<QueryPairs>,
}

impl Url {
    /// Parse a URL string
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        crate::parser::parse(raw)
    }

    /// Start building a URL from parts
    pub fn builder() -> UrlBuilder {
        UrlBuilder::new()
    }

    /// Copy this URL's stored fields into a builder
    pub fn to_builder(&self) -> UrlBuilder {
        UrlBuilder {
            scheme: self.scheme.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            host: self.host.clone(),
            path: self.path.clone(),
            raw_path: self.raw_path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
            opaque: self.opaque.clone(),
        }
    }

    // Getters

    /// Lowercase scheme
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Decoded username
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Decoded password
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Decoded, lowercase host including any `:port` suffix
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Host without the port
    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    pub fn port(&self) -> Option<u32> {
        self.port
    }

    /// Decoded path
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Path exactly as it appeared in the input
    pub fn raw_path(&self) -> Option<&str> {
        self.raw_path.as_deref()
    }

    /// Raw query (without leading `?`)
    ///
    /// A URL ending in a bare `?` reports `Some("?")`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Raw fragment (without leading `#`)
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Everything after `scheme:` when it does not start with `/`
    pub fn opaque(&self) -> Option<&str> {
        self.opaque.as_deref()
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque.is_some()
    }

    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Query parameters, keyed by name
    pub fn query_pairs(&self) -> &QueryPairs {
        self.query_pairs
            .get_or_init(|| query::parse_pairs(self.query.as_deref()))
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        self.serialized.get_or_init(|| self.serialize())
    }

    fn serialize(&self) -> String {
        let mut url = String::new();

        if let Some(ref scheme) = self.scheme {
            url.push_str(scheme);
            url.push(':');
        }

        if let Some(ref opaque) = self.opaque {
            url.push_str(opaque);
        } else {
            if self.scheme.is_some() || self.host.is_some() {
                url.push_str("//");

                if let Some(ref username) = self.username {
                    url.push_str(&percent::encode(username, EncodeZone::Credentials));
                    if let Some(ref password) = self.password {
                        url.push(':');
                        url.push_str(&percent::encode(password, EncodeZone::Credentials));
                    }
                    url.push('@');
                }

                if let Some(ref host) = self.host {
                    url.push_str(&percent::encode(host, EncodeZone::Host));
                }
            }

            if let Some(ref raw_path) = self.raw_path {
                url.push_str(raw_path);
            } else if let Some(ref path) = self.path {
                if !path.starts_with('/') && path != "*" {
                    url.push('/');
                }
                url.push_str(&percent::encode(path, EncodeZone::Path));
            }
        }

        if let Some(ref query) = self.query {
            url.push('?');
            if query != EMPTY_QUERY {
                url.push_str(query);
            }
        }

        if let Some(ref fragment) = self.fragment {
            url.push('#');
            url.push_str(fragment);
        }

        url
    }

    /// Resolve `reference` against this URL (RFC 3986 section 5.2)
    ///
    /// This URL must be absolute.
    pub fn resolve_reference(&self, reference: &Url) -> Result<Url, ResolveError> {
        if !self.is_absolute() {
            return Err(ResolveError::NotAbsolute(self.as_str().to_string()));
        }
        tracing::trace!("Resolving {} against {}", reference, self);

        let mut resolved = reference.to_builder();
        resolved.raw_path = None;

        if reference.scheme.is_none() {
            resolved.scheme = self.scheme.clone();
        }

        if reference.scheme.is_some() || reference.host.is_some() {
            // The reference brings its own authority; only clean up its path
            resolved.path = Some(path::resolve(reference.path.as_deref().unwrap_or(""), ""));
            return Ok(resolved.build());
        }

        if reference.is_opaque() || self.is_opaque() {
            return Ok(resolved.build());
        }

        resolved.host = self.host.clone();
        resolved.username = self.username.clone();
        resolved.password = self.password.clone();
        resolved.path = Some(path::resolve(
            self.path.as_deref().unwrap_or(""),
            reference.path.as_deref().unwrap_or(""),
        ));

        Ok(resolved.build())
    }

    /// Parse `reference` and resolve it against this URL
    pub fn join(&self, reference: &str) -> Result<Url, ResolveError> {
        let reference = Url::parse(reference)?;
        self.resolve_reference(&reference)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Url")
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("fragment", &self.fragment)
            .field("opaque", &self.opaque)
            .finish()
    }
}

impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Url {}

impl Hash for Url {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl FromStr for Url {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

impl TryFrom<&str> for Url {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Url::parse(s)
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        Url::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "url-interop")]
impl TryFrom<&Url> for ::url::Url {
    type Error = ::url::ParseError;

    fn try_from(url: &Url) -> Result<Self, Self::Error> {
        ::url::Url::parse(url.as_str())
    }
}

#[cfg(feature = "url-interop")]
impl TryFrom<&::url::Url> for Url {
    type Error = ParseError;

    fn try_from(url: &::url::Url) -> Result<Self, Self::Error> {
        Url::parse(url.as_str())
    }
}
