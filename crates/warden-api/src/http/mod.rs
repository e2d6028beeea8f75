//! HTTP surface modules (router, middleware, handlers).

/// Write-access and identity middleware.
pub mod auth;
mod constants;
mod errors;
mod health;
mod identity;
/// Router construction and host route wrapping.
pub mod router;
mod telemetry;
mod tokens;
