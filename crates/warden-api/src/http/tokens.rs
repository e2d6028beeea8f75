//! Token session exchange endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use tracing::error;

use crate::http::errors::ApiError;
use crate::models::TokenSessionResponse;
use crate::session::SessionError;
use crate::state::ApiState;

pub(crate) async fn establish_token_session(
    State(state): State<Arc<ApiState>>,
    Path(public_token): Path<String>,
) -> Result<(HeaderMap, Json<TokenSessionResponse>), ApiError> {
    let mut headers = HeaderMap::new();
    state
        .authorizer
        .authenticate_token(&public_token, &mut headers)
        .await
        .map_err(|err| match err {
            SessionError::Gateway { .. } => {
                ApiError::unauthorized("access token could not be exchanged")
            }
            SessionError::Cookie { .. } => {
                error!(error = %err, public_token = %public_token, "failed to encode session cookie");
                ApiError::internal("failed to encode session cookie")
            }
        })?;

    Ok((
        headers,
        Json(TokenSessionResponse {
            public_token,
            authenticated: true,
        }),
    ))
}
