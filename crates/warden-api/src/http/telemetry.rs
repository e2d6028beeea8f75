//! Per-route request counting.

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use warden_telemetry::RequestScope;

use crate::http::constants::HEADER_REQUEST_ID;
use crate::state::ApiState;

pub(crate) async fn record_http_metrics(
    State(state): State<Arc<ApiState>>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let route = req.extensions().get::<MatchedPath>().map_or_else(
        || req.uri().path().to_string(),
        |matched| matched.as_str().to_string(),
    );
    let request_id = req
        .headers()
        .get(HEADER_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let scope = RequestScope::new(request_id, &route);

    let response = scope.run(next.run(req)).await;
    state
        .telemetry
        .inc_http_request(&route, response.status().as_u16());
    response
}
