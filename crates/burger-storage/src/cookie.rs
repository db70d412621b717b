//! Expiring cookie jar for the access credential.
//!
//! Models the browser cookie medium: values are percent-encoded, every cookie
//! carries a path attribute (default `/`), and an `expires` option given in
//! seconds is converted to an absolute timestamp at write time. Removal is
//! performed the way a browser does it: write the cookie with an
//! already-expired timestamp and let garbage collection drop it.

use chrono::{DateTime, Duration, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in cookie values. Matches `encodeURIComponent`.
const COOKIE_VALUE_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// When a cookie should expire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expiry {
    /// Seconds from now, converted to an absolute timestamp at write time.
    /// Negative values produce an already-expired cookie.
    Seconds(i64),
    /// Absolute expiry timestamp.
    At(DateTime<Utc>),
}

/// Attributes attached to a cookie write.
#[derive(Debug, Clone)]
pub struct CookieOptions {
    /// Cookie path attribute.
    pub path: String,
    /// Optional expiry; a session cookie when absent.
    pub expires: Option<Expiry>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            expires: None,
        }
    }
}

impl CookieOptions {
    /// Options with an expiry given as seconds from now.
    pub fn expires_in(seconds: i64) -> Self {
        Self {
            expires: Some(Expiry::Seconds(seconds)),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
struct CookieEntry {
    name: String,
    /// Percent-encoded value, exactly as it would appear on the wire.
    value: String,
    path: String,
    expires: Option<DateTime<Utc>>,
}

/// In-memory model of the cookie medium holding the access credential.
#[derive(Debug, Default)]
pub struct CookieJar {
    entries: Vec<CookieEntry>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialized `name=value; name2=value2` header of all live cookies.
    pub fn header(&self) -> String {
        let now = Utc::now();
        self.entries
            .iter()
            .filter(|c| c.expires.map_or(true, |t| t > now))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Set a cookie, replacing any existing entry with the same name.
    pub fn write(&mut self, name: &str, value: &str, options: CookieOptions) {
        let expires = options.expires.map(|e| match e {
            Expiry::Seconds(seconds) => Utc::now() + Duration::seconds(seconds),
            Expiry::At(timestamp) => timestamp,
        });
        let encoded = utf8_percent_encode(value, COOKIE_VALUE_ESCAPE).to_string();

        self.entries.retain(|c| c.name != name);
        self.entries.push(CookieEntry {
            name: name.to_string(),
            value: encoded,
            path: options.path,
            expires,
        });
        self.collect_expired();
    }

    /// Parse the current header for a named entry, URL-decoding the value.
    /// Returns `None` if the cookie is absent or expired.
    pub fn read(&mut self, name: &str) -> Option<String> {
        self.collect_expired();
        let header = self.header();
        header
            .split("; ")
            .filter(|pair| !pair.is_empty())
            .find_map(|pair| {
                let (entry_name, entry_value) = pair.split_once('=')?;
                (entry_name == name)
                    .then(|| percent_decode_str(entry_value).decode_utf8_lossy().into_owned())
            })
    }

    /// Remove a cookie by overwriting it with an already-expired timestamp.
    pub fn remove(&mut self, name: &str) {
        self.write(name, "", CookieOptions::expires_in(-1));
    }

    /// Path attribute of a live cookie, if present.
    pub fn path(&self, name: &str) -> Option<String> {
        let now = Utc::now();
        self.entries
            .iter()
            .find(|c| c.name == name && c.expires.map_or(true, |t| t > now))
            .map(|c| c.path.clone())
    }

    fn collect_expired(&mut self) {
        let now = Utc::now();
        self.entries.retain(|c| c.expires.map_or(true, |t| t > now));
    }
}
