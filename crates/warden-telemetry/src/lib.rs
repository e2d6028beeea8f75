#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Telemetry primitives shared across the Warden workspace.
//!
//! Layout: `init.rs` (subscriber setup), `context.rs` (task-local request
//! scope), `metrics.rs` (Prometheus registry), `error.rs` (error type).

pub mod context;
pub mod error;
pub mod init;
pub mod metrics;

pub use context::RequestScope;
pub use error::{CollectorStage, Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use metrics::{DecisionOutcome, Metrics, MetricsSnapshot};
