//! Access token gateway abstraction.
//!
//! The gateway owns token issuance and storage; this crate only asks it to
//! hand out the secret half for a public token and to check a presented pair.

use std::error::Error as StdError;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Boxed error raised by a gateway backend.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Failures surfaced by an [`AccessTokenGateway`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The backend could not produce a secret for the public token.
    #[error("access token acquisition failed")]
    Acquisition {
        /// Public half presented by the caller.
        public_token: String,
        /// Backend failure.
        source: BoxError,
    },
    /// The backend could not decide whether a token pair is valid.
    #[error("access token validation failed")]
    Validation {
        /// Public half presented by the caller.
        public_token: String,
        /// Backend failure.
        source: BoxError,
    },
    /// No token with the given public half is known to the backend.
    #[error("access token not found")]
    TokenNotFound {
        /// Public half presented by the caller.
        public_token: String,
    },
}

impl GatewayError {
    /// Public half the failing call was made for.
    #[must_use]
    pub fn public_token(&self) -> &str {
        match self {
            Self::Acquisition { public_token, .. }
            | Self::Validation { public_token, .. }
            | Self::TokenNotFound { public_token } => public_token,
        }
    }
}

/// Issues and validates public/secret token pairs.
///
/// Calls may perform I/O against a token store. Callers drop the returned
/// future when the request is cancelled; implementations must tolerate that.
#[async_trait]
pub trait AccessTokenGateway: Send + Sync {
    /// Exchange a public token for its secret half.
    async fn acquire(&self, public_token: &str) -> Result<String, GatewayError>;
    /// Check whether the presented pair is currently valid.
    async fn validate(&self, public_token: &str, secret_token: &str) -> Result<bool, GatewayError>;
}

/// Shared reference to the gateway backend.
pub type SharedGateway = Arc<dyn AccessTokenGateway>;
