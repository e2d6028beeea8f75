#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Write-access policy configuration for Warden.
//!
//! Layout: `model.rs` (authentication method and policy types), `validate.rs`
//! (field parsing helpers), `loader.rs` (environment and JSON loaders),
//! `defaults.rs` (default values and variable names).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use defaults::{DEFAULT_AUTH_USER_HEADER, POWER_USER_WILDCARD};
pub use error::{ConfigError, ConfigResult};
pub use model::{AuthMethod, AuthPolicy};
