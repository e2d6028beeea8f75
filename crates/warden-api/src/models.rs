//! Response payloads exposed by the HTTP surface.

use serde::{Deserialize, Serialize};

/// RFC9457-compatible problem document surfaced on errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    /// URI identifying the problem type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short, human-readable summary.
    pub title: String,
    /// HTTP status code of the response.
    pub status: u16,
    /// Occurrence-specific explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Body returned once a token session cookie has been issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenSessionResponse {
    /// Public half the session was established for.
    pub public_token: String,
    /// Always `true`; failures are reported as problem documents.
    pub authenticated: bool,
}

/// Identity and write permission resolved for the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhoAmIResponse {
    /// Attributed identity; empty when the method carries none.
    pub user_id: String,
    /// Whether write actions would be authorized.
    pub can_write: bool,
    /// Configured authentication method.
    pub method: String,
}
