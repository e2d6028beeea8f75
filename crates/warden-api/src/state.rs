//! Shared state handed to every middleware and handler.

use warden_telemetry::Metrics;

use crate::authorizer::Authorizer;

pub(crate) struct ApiState {
    pub(crate) authorizer: Authorizer,
    pub(crate) telemetry: Metrics,
}

impl ApiState {
    pub(crate) fn new(authorizer: Authorizer, telemetry: Metrics) -> Self {
        Self {
            authorizer: authorizer.with_metrics(telemetry.clone()),
            telemetry,
        }
    }
}
