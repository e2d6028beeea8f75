//! Write-access authorization and identity attribution.
//!
//! # Design
//! - The policy is captured once as an `Arc` and never mutated, so a single
//!   [`Authorizer`] is shared by every request task.
//! - Decisions always resolve to a boolean: missing or malformed credentials
//!   and gateway failures all read as "not authorized".
//! - The read-only override is checked before any method-specific logic.

use std::sync::Arc;

use axum::http::HeaderMap;
use tracing::{debug, warn};
use warden_config::{AuthMethod, AuthPolicy};
use warden_telemetry::{Metrics, RequestScope};

use crate::credentials::{AccessTokenPair, AuthenticatedUser, access_token_cookie};
use crate::gateway::SharedGateway;

/// Decides whether a request may mutate state and whom to attribute it to.
#[derive(Clone)]
pub struct Authorizer {
    pub(crate) policy: Arc<AuthPolicy>,
    pub(crate) gateway: SharedGateway,
    pub(crate) telemetry: Option<Metrics>,
}

impl Authorizer {
    /// Build an authorizer over an immutable policy and a token gateway.
    #[must_use]
    pub fn new(policy: impl Into<Arc<AuthPolicy>>, gateway: SharedGateway) -> Self {
        Self {
            policy: policy.into(),
            gateway,
            telemetry: None,
        }
    }

    /// Record gateway failures on the supplied metrics registry.
    #[must_use]
    pub fn with_metrics(mut self, telemetry: Metrics) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Policy this authorizer enforces.
    #[must_use]
    pub fn policy(&self) -> &AuthPolicy {
        &self.policy
    }

    /// Whether the caller may perform write actions.
    pub async fn is_authorized_for_action(
        &self,
        headers: &HeaderMap,
        user: &AuthenticatedUser,
    ) -> bool {
        if self.policy.read_only {
            return false;
        }

        match self.policy.method {
            // Reaching this point means upstream basic auth already passed.
            AuthMethod::Basic | AuthMethod::Unrestricted => true,
            AuthMethod::Multi => !user.is_readonly_principal(),
            AuthMethod::Proxy => {
                let asserted = self.proxy_auth_user(headers);
                let allowed = self.policy.is_power_user(&asserted);
                if !allowed {
                    debug!(user = %asserted, "proxy user is not a power user");
                }
                allowed
            }
            AuthMethod::Token => self.token_session_is_valid(headers).await,
        }
    }

    /// Identity to attribute the request to; empty when none can be derived.
    #[must_use]
    pub fn user_id(&self, headers: &HeaderMap, user: &AuthenticatedUser) -> String {
        if self.policy.read_only {
            return String::new();
        }

        match self.policy.method {
            AuthMethod::Basic | AuthMethod::Multi => user.as_str().to_string(),
            AuthMethod::Proxy => self.proxy_auth_user(headers),
            AuthMethod::Token | AuthMethod::Unrestricted => String::new(),
        }
    }

    /// First value of the configured proxy user header, or empty when absent.
    #[must_use]
    pub fn proxy_auth_user(&self, headers: &HeaderMap) -> String {
        headers
            .get(self.policy.auth_user_header.as_str())
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
            .map(ToOwned::to_owned)
            .unwrap_or_default()
    }

    async fn token_session_is_valid(&self, headers: &HeaderMap) -> bool {
        let Some(raw) = access_token_cookie(headers) else {
            debug!("access token cookie missing");
            return false;
        };

        let pair = match AccessTokenPair::parse(&raw) {
            Ok(pair) => pair,
            Err(err) => {
                debug!(error = %err, "rejecting access token cookie");
                return false;
            }
        };

        match self
            .gateway
            .validate(&pair.public_token, &pair.secret_token)
            .await
        {
            Ok(valid) => {
                if !valid {
                    debug!(public_token = %pair.public_token, "access token rejected by gateway");
                }
                valid
            }
            Err(err) => {
                if let Some(telemetry) = &self.telemetry {
                    telemetry.inc_gateway_validate_error();
                }
                warn!(
                    error = %err,
                    public_token = %err.public_token(),
                    request_id = %current_request_id(),
                    "access token validation failed; treating as unauthorized"
                );
                false
            }
        }
    }
}

pub(crate) fn current_request_id() -> String {
    RequestScope::current()
        .map(|scope| scope.request_id().to_string())
        .unwrap_or_default()
}
