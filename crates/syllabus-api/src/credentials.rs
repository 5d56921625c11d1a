use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// Cookie carrying Django's anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Source of the ambient credentials attached to every request.
///
/// Stands in for the browser cookie jar so the gateway can be driven
/// without a browser context.
pub trait CredentialProvider: Send + Sync {
    /// Anti-forgery token, if the server has issued one.
    fn csrf_token(&self) -> Option<String>;

    /// Value for the `Cookie` request header, if any cookies are held.
    fn cookie_header(&self) -> Option<String>;

    /// Called with each `Set-Cookie` response header.
    fn store_set_cookie(&self, _set_cookie: &str) {}
}

/// Provider that never sends credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn csrf_token(&self) -> Option<String> {
        None
    }

    fn cookie_header(&self) -> Option<String> {
        None
    }
}

/// In-memory cookie jar keyed by cookie name.
#[derive(Debug, Default)]
pub struct CookieCredentials {
    cookies: RwLock<BTreeMap<String, String>>,
}

impl CookieCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a jar from a `Cookie`-style string (`a=1; b=2`).
    /// Malformed pairs are skipped.
    pub fn parse(cookie_string: &str) -> Self {
        let jar = Self::new();
        for pair in cookie_string.split(';') {
            if let Some((name, value)) = split_pair(pair) {
                jar.set(name, value);
            }
        }
        jar
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn remove(&self, name: &str) {
        self.cookies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    pub fn len(&self) -> usize {
        self.cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialProvider for CookieCredentials {
    fn csrf_token(&self) -> Option<String> {
        self.get(CSRF_COOKIE).filter(|t| !t.is_empty())
    }

    fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.read().unwrap_or_else(PoisonError::into_inner);
        if cookies.is_empty() {
            return None;
        }
        let header = cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        Some(header)
    }

    /// Stores `name=value` from the header. An empty value, a `Max-Age` of
    /// zero or less, or an `Expires` date already passed deletes the cookie.
    fn store_set_cookie(&self, set_cookie: &str) {
        let mut parts = set_cookie.split(';');
        let Some((name, value)) = parts.next().and_then(split_pair) else {
            tracing::debug!("Ignoring malformed Set-Cookie header");
            return;
        };

        let now = Utc::now();
        let expired = parts.any(|attr| attribute_expires(attr, now));

        if value.is_empty() || expired {
            self.remove(name);
        } else {
            self.set(name, value);
        }
    }
}

/// Unparseable dates are ignored, as a browser would.
fn attribute_expires(attr: &str, now: DateTime<Utc>) -> bool {
    let Some((key, value)) = attr.split_once('=') else {
        return false;
    };
    let value = value.trim();
    match key.trim().to_ascii_lowercase().as_str() {
        "max-age" => value.parse::<i64>().is_ok_and(|secs| secs <= 0),
        "expires" => DateTime::parse_from_rfc2822(value)
            .is_ok_and(|at| at.with_timezone(&Utc) <= now),
        _ => false,
    }
}

fn split_pair(pair: &str) -> Option<(&str, &str)> {
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}
