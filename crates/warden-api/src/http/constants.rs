//! Shared HTTP constants (headers, routes, problem URIs).

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

pub(crate) const ROUTE_TOKEN_SESSION: &str = "/api/auth/token/{public_token}";
pub(crate) const ROUTE_WHOAMI: &str = "/api/auth/whoami";
pub(crate) const ROUTE_METRICS: &str = "/metrics";

pub(crate) const PROBLEM_INTERNAL: &str = "https://warden.dev/problems/internal";
pub(crate) const PROBLEM_UNAUTHORIZED: &str = "https://warden.dev/problems/unauthorized";
pub(crate) const PROBLEM_FORBIDDEN: &str = "https://warden.dev/problems/forbidden";
