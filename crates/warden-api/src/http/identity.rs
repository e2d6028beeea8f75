//! Caller identity endpoint.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};

use crate::http::auth::AccessContext;
use crate::models::WhoAmIResponse;
use crate::state::ApiState;

pub(crate) async fn whoami(
    State(state): State<Arc<ApiState>>,
    Extension(context): Extension<AccessContext>,
) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        user_id: context.user_id,
        can_write: context.can_write,
        method: state.authorizer.policy().method.as_str().to_string(),
    })
}
