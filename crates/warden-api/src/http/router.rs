//! Router construction for the access endpoints and host route wrapping.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::Request,
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;
use warden_telemetry::{Metrics, build_sha};

use crate::authorizer::Authorizer;
use crate::http::auth::{require_write_access, resolve_identity};
use crate::http::constants::{HEADER_REQUEST_ID, ROUTE_METRICS, ROUTE_TOKEN_SESSION, ROUTE_WHOAMI};
use crate::http::health::metrics;
use crate::http::identity::whoami;
use crate::http::telemetry::record_http_metrics;
use crate::http::tokens::establish_token_session;
use crate::state::ApiState;

/// Hosts the access endpoints and wraps a host application's routes with
/// write-access enforcement.
#[derive(Clone)]
pub struct AccessRouter {
    state: Arc<ApiState>,
}

impl AccessRouter {
    /// Wire an authorizer and metrics registry into shared state.
    ///
    /// Gateway failures and token sessions are recorded on `telemetry`.
    #[must_use]
    pub fn new(authorizer: Authorizer, telemetry: Metrics) -> Self {
        Self {
            state: Arc::new(ApiState::new(authorizer, telemetry)),
        }
    }

    /// Router serving the token exchange, identity and metrics endpoints.
    #[must_use]
    pub fn routes(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let layered = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(trace_layer)
            .layer(middleware::from_fn_with_state(
                Arc::clone(&self.state),
                record_http_metrics,
            ));

        let identify = middleware::from_fn_with_state(Arc::clone(&self.state), resolve_identity);

        Router::new()
            .route(ROUTE_TOKEN_SESSION, post(establish_token_session))
            .route(ROUTE_WHOAMI, get(whoami).route_layer(identify))
            .route(ROUTE_METRICS, get(metrics))
            .route_layer(layered)
            .with_state(Arc::clone(&self.state))
    }

    /// Reject requests to every route of `router` unless write access is
    /// authorized; allowed requests carry an
    /// [`AccessContext`](crate::http::auth::AccessContext) extension.
    #[must_use]
    pub fn protect<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.route_layer(middleware::from_fn_with_state(
            Arc::clone(&self.state),
            require_write_access,
        ))
    }

    /// Attach an [`AccessContext`](crate::http::auth::AccessContext) to every
    /// route of `router` without rejecting anything.
    #[must_use]
    pub fn attribute<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.route_layer(middleware::from_fn_with_state(
            Arc::clone(&self.state),
            resolve_identity,
        ))
    }
}
