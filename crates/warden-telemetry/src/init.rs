//! Tracing subscriber installation.
//!
//! # Design
//! - One entry point installs an `EnvFilter` plus a single formatting layer.
//! - `RUST_LOG` wins over the configured level so operators can raise
//!   verbosity without touching service configuration.
//! - The build identifier is fixed by the first successful call.

use once_cell::sync::OnceCell;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::error::{Result, TelemetryError};

/// Level applied when neither `RUST_LOG` nor configuration provide one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

const ENV_LOG_LEVEL: &str = "WARDEN_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "WARDEN_LOG_FORMAT";
const UNKNOWN_BUILD: &str = "dev";

static BUILD_SHA: OnceCell<String> = OnceCell::new();

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-oriented multi-field lines.
    Pretty,
}

impl LogFormat {
    /// Pretty output for debug builds, JSON for release builds.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }

    /// Parse a configured format name, ignoring ASCII case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if value.eq_ignore_ascii_case("pretty") {
            Some(Self::Pretty)
        } else {
            None
        }
    }
}

/// Settings for [`init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Line encoding.
    pub format: LogFormat,
    /// Build identifier exposed through [`build_sha`].
    pub build_sha: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::infer(),
            build_sha: UNKNOWN_BUILD.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Read `WARDEN_LOG_LEVEL` and `WARDEN_LOG_FORMAT` through `lookup`.
    ///
    /// Blank values keep the defaults; an unrecognized format falls back to
    /// [`LogFormat::infer`].
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            level: present(ENV_LOG_LEVEL).unwrap_or(defaults.level),
            format: present(ENV_LOG_FORMAT)
                .and_then(|value| LogFormat::parse(value.trim()))
                .unwrap_or(defaults.format),
            build_sha: defaults.build_sha,
        }
    }

    /// Replace the recorded build identifier.
    #[must_use]
    pub fn with_build_sha(mut self, build_sha: impl Into<String>) -> Self {
        self.build_sha = build_sha.into();
        self
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError::Subscriber`] when a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let output: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Json => fmt::layer().json().with_target(false).boxed(),
        LogFormat::Pretty => fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()
        .map_err(|source| TelemetryError::Subscriber { source })?;

    BUILD_SHA.get_or_init(|| config.build_sha.clone());
    Ok(())
}

/// Build identifier recorded by [`init_logging`], or `"dev"` before that.
#[must_use]
pub fn build_sha() -> &'static str {
    BUILD_SHA.get().map_or(UNKNOWN_BUILD, String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("compact"), None);
    }

    #[test]
    fn lookup_overrides_defaults() {
        let env = HashMap::from([
            (ENV_LOG_LEVEL, "warden_api=debug"),
            (ENV_LOG_FORMAT, " json "),
        ]);
        let config = LoggingConfig::from_lookup(|key| env.get(key).map(ToString::to_string))
            .with_build_sha("abc123");
        assert_eq!(config.level, "warden_api=debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.build_sha, "abc123");
    }

    #[test]
    fn blank_or_unknown_values_keep_defaults() {
        let env = HashMap::from([(ENV_LOG_LEVEL, "  "), (ENV_LOG_FORMAT, "xml")]);
        let config = LoggingConfig::from_lookup(|key| env.get(key).map(ToString::to_string));
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn second_install_is_rejected() {
        let config = LoggingConfig::default().with_build_sha("abc123");
        let first = init_logging(&config);
        assert!(init_logging(&config).is_err());
        if first.is_ok() {
            assert_eq!(build_sha(), "abc123");
        }
    }
}
