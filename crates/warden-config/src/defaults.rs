//! Default values and environment variable names for policy loading.
//!
//! # Design
//! - Centralize defaults so the env and JSON loaders agree.

/// Header consulted for the upstream-asserted user in proxy mode.
pub const DEFAULT_AUTH_USER_HEADER: &str = "X-Forwarded-User";
/// Allow-list entry that admits any proxy-asserted user.
pub const POWER_USER_WILDCARD: &str = "*";

pub(crate) const ENV_READ_ONLY: &str = "WARDEN_READ_ONLY";
pub(crate) const ENV_AUTH_METHOD: &str = "WARDEN_AUTH_METHOD";
pub(crate) const ENV_AUTH_USER_HEADER: &str = "WARDEN_AUTH_USER_HEADER";
pub(crate) const ENV_POWER_AUTH_USERS: &str = "WARDEN_POWER_AUTH_USERS";
