//! Token session establishment.
//!
//! Exchanges a public token for its secret half and hands the pair back to
//! the client as the `access-token` cookie.

use axum::http::{HeaderMap, header::SET_COOKIE};
use thiserror::Error;
use tracing::{info, warn};

use crate::authorizer::{Authorizer, current_request_id};
use crate::credentials::{AccessTokenPair, CredentialError};
use crate::gateway::GatewayError;

/// Failures raised while establishing a token session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The gateway refused or failed to hand out the secret half.
    #[error("access token could not be acquired")]
    Gateway {
        /// Underlying gateway failure.
        #[from]
        source: GatewayError,
    },
    /// The acquired pair could not be expressed as a cookie.
    #[error("access token session cookie could not be built")]
    Cookie {
        /// Public half the cookie was built for.
        public_token: String,
        /// Encoding failure.
        source: CredentialError,
    },
}

impl Authorizer {
    /// Acquire the secret for `public_token` and append the session cookie.
    ///
    /// Response headers are only touched once the cookie is fully built, so a
    /// failed exchange leaves them exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Gateway`] when acquisition fails and
    /// [`SessionError::Cookie`] when the pair is not cookie-safe.
    pub async fn authenticate_token(
        &self,
        public_token: &str,
        response_headers: &mut HeaderMap,
    ) -> Result<(), SessionError> {
        let secret_token = match self.gateway.acquire(public_token).await {
            Ok(secret) => secret,
            Err(err) => {
                if let Some(telemetry) = &self.telemetry {
                    telemetry.inc_gateway_acquire_error();
                    telemetry.inc_token_session(false);
                }
                warn!(
                    error = %err,
                    public_token = %public_token,
                    request_id = %current_request_id(),
                    "access token acquisition failed"
                );
                return Err(err.into());
            }
        };

        let cookie = AccessTokenPair::new(public_token, secret_token)
            .session_cookie()
            .map_err(|source| {
                if let Some(telemetry) = &self.telemetry {
                    telemetry.inc_token_session(false);
                }
                SessionError::Cookie {
                    public_token: public_token.to_string(),
                    source,
                }
            })?;

        response_headers.append(SET_COOKIE, cookie);
        if let Some(telemetry) = &self.telemetry {
            telemetry.inc_token_session(true);
        }
        info!(public_token = %public_token, "access token session established");
        Ok(())
    }
}
