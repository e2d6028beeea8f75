//! Credential values exchanged between upstream authentication, the token
//! gateway, and the session cookie.
//!
//! # Design
//! - The cookie carries `<public>:<secret>` and is split exactly once; every
//!   other shape is rejected as malformed instead of indexed positionally.
//! - Secret halves never appear in `Debug` output.

use std::fmt::{self, Debug, Formatter};

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use thiserror::Error;

/// Name of the session cookie established by a token exchange.
pub const ACCESS_TOKEN_COOKIE: &str = "access-token";
/// Separator between the public and secret halves in the cookie value.
pub const TOKEN_SEPARATOR: char = ':';
/// Principal that `multi` authentication restricts to read-only access.
pub const READONLY_PRINCIPAL: &str = "readonly";

/// Errors raised while decoding or encoding token credentials.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// Cookie value did not have the `<public>:<secret>` shape.
    #[error("malformed access token credential")]
    Malformed,
    /// Token material cannot be carried in a cookie value.
    #[error("access token cannot be encoded as a cookie")]
    Unencodable,
}

/// Identity produced by upstream authentication (for example a basic-auth
/// principal). Handlers find it in request extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AuthenticatedUser(String);

impl AuthenticatedUser {
    /// Wrap an upstream principal name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the principal name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_readonly_principal(&self) -> bool {
        self.0 == READONLY_PRINCIPAL
    }
}

impl From<&str> for AuthenticatedUser {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AuthenticatedUser {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Public and secret halves of an access token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessTokenPair {
    /// Distributable half; safe to log.
    pub public_token: String,
    /// Proof of possession; never logged.
    pub secret_token: String,
}

impl Debug for AccessTokenPair {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AccessTokenPair")
            .field("public_token", &self.public_token)
            .field("secret_token", &"<redacted>")
            .finish()
    }
}

impl AccessTokenPair {
    /// Pair the two halves.
    #[must_use]
    pub fn new(public_token: impl Into<String>, secret_token: impl Into<String>) -> Self {
        Self {
            public_token: public_token.into(),
            secret_token: secret_token.into(),
        }
    }

    /// Decode a cookie value of the form `<public>:<secret>`.
    ///
    /// The value is split on the first separator; both halves must be
    /// non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Malformed`] for any other shape.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        let (public_token, secret_token) = raw
            .split_once(TOKEN_SEPARATOR)
            .ok_or(CredentialError::Malformed)?;
        if public_token.is_empty() || secret_token.is_empty() {
            return Err(CredentialError::Malformed);
        }
        Ok(Self::new(public_token, secret_token))
    }

    /// Serialize as the cookie value `<public>:<secret>`.
    #[must_use]
    pub fn to_cookie_value(&self) -> String {
        format!(
            "{}{TOKEN_SEPARATOR}{}",
            self.public_token, self.secret_token
        )
    }

    /// Build the `Set-Cookie` header establishing the token session.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Unencodable`] when either half contains
    /// characters that are not legal in a cookie value, or when the public
    /// half contains the separator and could not be split back out.
    pub fn session_cookie(&self) -> Result<HeaderValue, CredentialError> {
        if self.public_token.contains(TOKEN_SEPARATOR) {
            return Err(CredentialError::Unencodable);
        }
        let value = self.to_cookie_value();
        if !value.bytes().all(is_cookie_octet) {
            return Err(CredentialError::Unencodable);
        }
        HeaderValue::from_str(&format!("{ACCESS_TOKEN_COOKIE}={value}; Path=/"))
            .map_err(|_| CredentialError::Unencodable)
    }
}

/// Find the `access-token` cookie among the request's `Cookie` headers.
///
/// Headers are decoded lossily so a non-ASCII sibling cookie does not hide
/// the session cookie.
#[must_use]
pub fn access_token_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .find_map(|value| {
            cookie_value(&String::from_utf8_lossy(value.as_bytes()), ACCESS_TOKEN_COOKIE)
        })
}

fn cookie_value(raw: &str, needle: &str) -> Option<String> {
    raw.split(';').find_map(|entry| {
        let (name, value) = entry.split_once('=')?;
        (name.trim() == needle).then(|| value.trim().trim_matches('"').to_string())
    })
}

// RFC 6265 cookie-octet.
const fn is_cookie_octet(byte: u8) -> bool {
    matches!(byte, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}
