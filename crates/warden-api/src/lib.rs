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

//! Write-access authorization for Warden HTTP services.
//!
//! Layout: `credentials.rs` (user and token values, cookie codec),
//! `gateway.rs` (token store abstraction), `authorizer.rs` (authorization,
//! identity and proxy header resolution), `session.rs` (token session
//! establishment), `http/` (middleware, handlers, router), `models.rs`
//! (response payloads).

pub mod authorizer;
pub mod credentials;
pub mod gateway;
pub mod http;
pub mod models;
pub mod session;
mod state;

pub use authorizer::Authorizer;
pub use credentials::{
    ACCESS_TOKEN_COOKIE, AccessTokenPair, AuthenticatedUser, CredentialError, READONLY_PRINCIPAL,
    access_token_cookie,
};
pub use gateway::{AccessTokenGateway, BoxError, GatewayError, SharedGateway};
pub use http::auth::AccessContext;
pub use http::router::AccessRouter;
pub use models::{ProblemDetails, TokenSessionResponse, WhoAmIResponse};
pub use session::SessionError;
