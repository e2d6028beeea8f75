//! Typed policy models.
//!
//! # Design
//! - Pure data carriers shared read-only by the authorization layer.
//! - The authentication method is a closed enum; unknown configured values
//!   collapse to [`AuthMethod::Unrestricted`] instead of failing the load.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_AUTH_USER_HEADER, POWER_USER_WILDCARD};

/// Authentication scheme selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthMethod {
    /// No authentication method configured; writes are not gated.
    #[default]
    Unrestricted,
    /// Upstream basic authentication; any authenticated principal may write.
    Basic,
    /// Upstream basic authentication with a dedicated `readonly` principal.
    Multi,
    /// Identity asserted by a fronting proxy through a request header.
    Proxy,
    /// Session established through a public/secret access token exchange.
    Token,
}

impl AuthMethod {
    /// Map a configured method string onto a variant, ignoring ASCII case.
    ///
    /// Unrecognized values, including the empty string, map to
    /// [`AuthMethod::Unrestricted`].
    #[must_use]
    pub fn from_config(value: &str) -> Self {
        Self::recognize(value).unwrap_or_default()
    }

    /// Map a configured method string onto a variant, returning `None` when
    /// the value names no known method.
    #[must_use]
    pub fn recognize(value: &str) -> Option<Self> {
        [Self::Basic, Self::Multi, Self::Proxy, Self::Token]
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(value))
    }

    /// Render the method as its lowercase configuration keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unrestricted => "none",
            Self::Basic => "basic",
            Self::Multi => "multi",
            Self::Proxy => "proxy",
            Self::Token => "token",
        }
    }
}

impl Display for AuthMethod {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl From<String> for AuthMethod {
    fn from(value: String) -> Self {
        Self::from_config(&value)
    }
}

impl From<AuthMethod> for String {
    fn from(method: AuthMethod) -> Self {
        match method {
            AuthMethod::Unrestricted => Self::new(),
            other => other.as_str().to_string(),
        }
    }
}

/// Immutable write-access policy consulted on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPolicy {
    /// When set, every write is denied regardless of method.
    #[serde(default)]
    pub read_only: bool,
    /// Configured authentication method.
    #[serde(default, rename = "authentication_method")]
    pub method: AuthMethod,
    /// Header carrying the proxy-asserted user name.
    #[serde(default = "default_auth_user_header")]
    pub auth_user_header: String,
    /// Proxy users allowed to write; may contain the `*` wildcard.
    #[serde(default)]
    pub power_auth_users: Vec<String>,
}

fn default_auth_user_header() -> String {
    DEFAULT_AUTH_USER_HEADER.to_string()
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::new(AuthMethod::Unrestricted)
    }
}

impl AuthPolicy {
    /// Policy for the given method with defaults for every other field.
    #[must_use]
    pub fn new(method: AuthMethod) -> Self {
        Self {
            read_only: false,
            method,
            auth_user_header: default_auth_user_header(),
            power_auth_users: Vec::new(),
        }
    }

    /// Toggle the global read-only override.
    #[must_use]
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Replace the header consulted in proxy mode.
    #[must_use]
    pub fn with_auth_user_header(mut self, header: impl Into<String>) -> Self {
        self.auth_user_header = header.into();
        self
    }

    /// Replace the proxy allow-list.
    #[must_use]
    pub fn with_power_auth_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.power_auth_users = users.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `user` is admitted by the proxy allow-list.
    #[must_use]
    pub fn is_power_user(&self, user: &str) -> bool {
        self.power_auth_users
            .iter()
            .any(|entry| entry == POWER_USER_WILDCARD || entry == user)
    }
}
