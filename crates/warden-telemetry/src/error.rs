//! Telemetry error type.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::string::FromUtf8Error;

use prometheus::Error as PrometheusError;
use tracing_subscriber::util::TryInitError;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Step of collector setup that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorStage {
    /// Constructing the collector from its options.
    Build,
    /// Adding the collector to the registry.
    Register,
}

/// Errors raised while installing logging or maintaining metrics.
#[derive(Debug)]
pub enum TelemetryError {
    /// A global tracing subscriber was already installed.
    Subscriber {
        /// Subscriber installation failure.
        source: TryInitError,
    },
    /// A Prometheus collector could not be set up.
    Collector {
        /// Series name of the collector.
        name: &'static str,
        /// Setup step that failed.
        stage: CollectorStage,
        /// Prometheus failure.
        source: PrometheusError,
    },
    /// The registry could not be encoded in the text exposition format.
    Exposition {
        /// Prometheus failure.
        source: PrometheusError,
    },
    /// The encoded exposition was not UTF-8.
    ExpositionEncoding {
        /// Conversion failure.
        source: FromUtf8Error,
    },
}

impl Display for TelemetryError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Subscriber { .. } => "tracing subscriber already installed",
            Self::Collector {
                stage: CollectorStage::Build,
                ..
            } => "metrics collector could not be built",
            Self::Collector {
                stage: CollectorStage::Register,
                ..
            } => "metrics collector could not be registered",
            Self::Exposition { .. } => "metrics exposition failed",
            Self::ExpositionEncoding { .. } => "metrics exposition is not utf-8",
        };
        formatter.write_str(message)
    }
}

impl Error for TelemetryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Subscriber { source } => Some(source),
            Self::Collector { source, .. } | Self::Exposition { source } => Some(source),
            Self::ExpositionEncoding { source } => Some(source),
        }
    }
}
