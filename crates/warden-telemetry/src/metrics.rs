//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes the counters relevant to write-access decisions and token sessions.

use std::sync::Arc;

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{CollectorStage, Result, TelemetryError};

const GATEWAY_ACQUIRE: &str = "acquire";
const GATEWAY_VALIDATE: &str = "validate";
const SESSION_ESTABLISHED: &str = "established";
const SESSION_FAILED: &str = "failed";

/// Outcome label recorded for an authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// The caller may perform write actions.
    Allowed,
    /// The caller is restricted to read-only access.
    Denied,
}

impl DecisionOutcome {
    /// Label value used in the exported series.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Denied => "denied",
        }
    }
}

impl From<bool> for DecisionOutcome {
    fn from(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }
}

/// Prometheus-backed metrics registry shared across services.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    authorization_decisions_total: IntCounterVec,
    token_sessions_total: IntCounterVec,
    gateway_errors_total: IntCounterVec,
}

/// Snapshot of selected counters for health reporting.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Authorization checks that granted write access.
    pub decisions_allowed_total: u64,
    /// Authorization checks that denied write access.
    pub decisions_denied_total: u64,
    /// Token exchanges that produced a session cookie.
    pub sessions_established_total: u64,
    /// Token exchanges rejected by the gateway.
    pub sessions_failed_total: u64,
    /// Gateway acquire/validate calls that returned an error.
    pub gateway_errors_total: u64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be built or
    /// registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests_total = counter_vec(
            &registry,
            "http_requests_total",
            "Total HTTP requests received",
            &["route", "code"],
        )?;
        let authorization_decisions_total = counter_vec(
            &registry,
            "authorization_decisions_total",
            "Write-access authorization decisions by outcome",
            &["outcome"],
        )?;
        let token_sessions_total = counter_vec(
            &registry,
            "token_sessions_total",
            "Access token exchanges by outcome",
            &["outcome"],
        )?;
        let gateway_errors_total = counter_vec(
            &registry,
            "gateway_errors_total",
            "Access token gateway failures by operation",
            &["operation"],
        )?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                http_requests_total,
                authorization_decisions_total,
                token_sessions_total,
                gateway_errors_total,
            }),
        })
    }

    /// Increment the HTTP request counter for the given route and status code.
    pub fn inc_http_request(&self, route: &str, status: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Record the outcome of a write-access authorization check.
    pub fn inc_authorization_decision(&self, outcome: DecisionOutcome) {
        self.inner
            .authorization_decisions_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    /// Record the outcome of a token exchange.
    pub fn inc_token_session(&self, established: bool) {
        let outcome = if established {
            SESSION_ESTABLISHED
        } else {
            SESSION_FAILED
        };
        self.inner
            .token_sessions_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Record a failed gateway acquire call.
    pub fn inc_gateway_acquire_error(&self) {
        self.inner
            .gateway_errors_total
            .with_label_values(&[GATEWAY_ACQUIRE])
            .inc();
    }

    /// Record a failed gateway validate call.
    pub fn inc_gateway_validate_error(&self) {
        self.inner
            .gateway_errors_total
            .with_label_values(&[GATEWAY_VALIDATE])
            .inc();
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::Exposition { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::ExpositionEncoding { source })
    }

    /// Take a point-in-time snapshot of the decision and session counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = &self.inner;
        MetricsSnapshot {
            decisions_allowed_total: inner
                .authorization_decisions_total
                .with_label_values(&[DecisionOutcome::Allowed.as_str()])
                .get(),
            decisions_denied_total: inner
                .authorization_decisions_total
                .with_label_values(&[DecisionOutcome::Denied.as_str()])
                .get(),
            sessions_established_total: inner
                .token_sessions_total
                .with_label_values(&[SESSION_ESTABLISHED])
                .get(),
            sessions_failed_total: inner
                .token_sessions_total
                .with_label_values(&[SESSION_FAILED])
                .get(),
            gateway_errors_total: inner
                .gateway_errors_total
                .with_label_values(&[GATEWAY_ACQUIRE])
                .get()
                + inner
                    .gateway_errors_total
                    .with_label_values(&[GATEWAY_VALIDATE])
                    .get(),
        }
    }
}

fn counter_vec(
    registry: &Registry,
    name: &'static str,
    help: &str,
    labels: &[&str],
) -> Result<IntCounterVec> {
    let collector = IntCounterVec::new(Opts::new(name, help), labels)
        .map_err(|source| TelemetryError::Collector {
            name,
            stage: CollectorStage::Build,
            source,
        })?;
    registry
        .register(Box::new(collector.clone()))
        .map_err(|source| TelemetryError::Collector {
            name,
            stage: CollectorStage::Register,
            source,
        })?;
    Ok(collector)
}
