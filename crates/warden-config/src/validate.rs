//! Validation helpers and parsing utilities for policy fields.

use http::HeaderName;
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};

/// Parse a textual boolean flag (`true|false|1|0|yes|no|on|off`, any case).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when the value is not a recognized flag.
pub fn parse_flag(field: &str, raw: &str) -> ConfigResult<bool> {
    let trimmed = raw.trim();
    if ["true", "1", "yes", "on"]
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(trimmed))
    {
        return Ok(true);
    }
    if trimmed.is_empty()
        || ["false", "0", "no", "off"]
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(trimmed))
    {
        return Ok(false);
    }
    Err(ConfigError::InvalidField {
        field: field.to_string(),
        value: Some(raw.to_string()),
        reason: "expected a boolean flag",
    })
}

/// Split a comma-separated user list, trimming entries and dropping empties.
#[must_use]
pub fn split_user_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Ensure `name` is a header name that request header lookups will accept.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when [`HeaderName`] rejects the name.
pub fn validate_header_name(field: &str, name: &str) -> ConfigResult<()> {
    HeaderName::from_bytes(name.as_bytes())
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidField {
            field: field.to_string(),
            value: Some(name.to_string()),
            reason: "invalid header name",
        })
}

pub(crate) fn expect_bool(field: &str, value: &Value) -> ConfigResult<bool> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(raw) => parse_flag(field, raw),
        _ => Err(ConfigError::InvalidType {
            field: field.to_string(),
            expected: "boolean",
        }),
    }
}

pub(crate) fn expect_string(field: &str, value: &Value) -> ConfigResult<String> {
    match value {
        Value::String(raw) => Ok(raw.clone()),
        Value::Null => Ok(String::new()),
        _ => Err(ConfigError::InvalidType {
            field: field.to_string(),
            expected: "string",
        }),
    }
}

pub(crate) fn expect_user_list(field: &str, value: &Value) -> ConfigResult<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(raw) => Ok(split_user_list(raw)),
        Value::Array(entries) => entries
            .iter()
            .map(|entry| {
                entry
                    .as_str()
                    .map(ToOwned::to_owned)
                    .ok_or_else(|| ConfigError::InvalidType {
                        field: field.to_string(),
                        expected: "array of strings",
                    })
            })
            .collect(),
        _ => Err(ConfigError::InvalidType {
            field: field.to_string(),
            expected: "array of strings",
        }),
    }
}
