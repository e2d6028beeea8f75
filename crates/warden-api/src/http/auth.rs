//! Write-access middleware for the HTTP layer.
//!
//! Upstream authentication (basic auth, SSO, a reverse proxy) runs before
//! these layers and may leave an [`AuthenticatedUser`] in the request
//! extensions. Requests without one are evaluated as the empty user.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info};

use crate::credentials::AuthenticatedUser;
use crate::http::errors::ApiError;
use crate::state::ApiState;

/// Identity and permission attached to a request that passed the access layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessContext {
    /// Identity attributed to the request; empty when none is available.
    pub user_id: String,
    /// Whether the caller is allowed to perform write actions.
    pub can_write: bool,
}

pub(crate) async fn require_write_access(
    State(state): State<Arc<ApiState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticated_user(&req);
    let headers = req.headers().clone();
    let context = evaluate(&state, &headers, &user).await;

    if !context.can_write {
        info!(
            method = %state.authorizer.policy().method,
            path = %req.uri().path(),
            "write access denied"
        );
        return Err(ApiError::forbidden("write access is not permitted"));
    }

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

pub(crate) async fn resolve_identity(
    State(state): State<Arc<ApiState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let user = authenticated_user(&req);
    let headers = req.headers().clone();
    let context = evaluate(&state, &headers, &user).await;
    req.extensions_mut().insert(context);
    next.run(req).await
}

async fn evaluate(state: &ApiState, headers: &HeaderMap, user: &AuthenticatedUser) -> AccessContext {
    let can_write = state
        .authorizer
        .is_authorized_for_action(headers, user)
        .await;
    state.telemetry.inc_authorization_decision(can_write.into());

    let user_id = state.authorizer.user_id(headers, user);
    debug!(user_id = %user_id, can_write, "access context resolved");
    AccessContext { user_id, can_write }
}

fn authenticated_user<B>(req: &Request<B>) -> AuthenticatedUser {
    req.extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .unwrap_or_default()
}
