//! Policy, header, and response fixtures.

use axum::{
    body::{Body, to_bytes},
    http::{
        HeaderMap, HeaderName, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    response::Response,
};
use serde::de::DeserializeOwned;
use warden_api::ACCESS_TOKEN_COOKIE;
use warden_config::{AuthMethod, AuthPolicy};

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Writable policy using `method` with defaults elsewhere.
#[must_use]
pub fn policy(method: AuthMethod) -> AuthPolicy {
    AuthPolicy::new(method)
}

/// Proxy policy granting write access to `users`.
#[must_use]
pub fn proxy_policy(users: &[&str]) -> AuthPolicy {
    AuthPolicy::new(AuthMethod::Proxy).with_power_auth_users(users.iter().copied())
}

/// Request headers carrying an `access-token` cookie with the raw `value`.
///
/// # Errors
///
/// Returns an error when `value` is not a legal header value.
pub fn headers_with_cookie(value: &str) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&format!("{ACCESS_TOKEN_COOKIE}={value}"))?,
    );
    Ok(headers)
}

/// Request headers asserting `user` through the proxy header `header`.
///
/// # Errors
///
/// Returns an error when the header name or value is invalid.
pub fn headers_with_proxy_user(header: &str, user: &str) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_bytes(header.as_bytes())?,
        HeaderValue::from_str(user)?,
    );
    Ok(headers)
}

/// All `Set-Cookie` values on a response, in order.
#[must_use]
pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
        .collect()
}

/// Decode a JSON response body.
///
/// # Errors
///
/// Returns an error when the body cannot be read or does not decode as `T`.
pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> anyhow::Result<T> {
    let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Read a response body as UTF-8 text.
///
/// # Errors
///
/// Returns an error when the body cannot be read or is not UTF-8.
pub async fn read_text(response: Response<Body>) -> anyhow::Result<String> {
    let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}
