//! Policy loaders for environment variables and JSON documents.
//!
//! # Design
//! - Loading happens once; the resulting [`AuthPolicy`] is shared read-only.
//! - An unrecognized authentication method is not an error: it is reported
//!   with `warn!` and the policy falls back to [`AuthMethod::Unrestricted`].

use serde_json::Value;
use tracing::{info, warn};

use crate::defaults::{
    DEFAULT_AUTH_USER_HEADER, ENV_AUTH_METHOD, ENV_AUTH_USER_HEADER, ENV_POWER_AUTH_USERS,
    ENV_READ_ONLY,
};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{AuthMethod, AuthPolicy};
use crate::validate::{
    expect_bool, expect_string, expect_user_list, parse_flag, split_user_list,
    validate_header_name,
};

const FIELD_READ_ONLY: &str = "read_only";
const FIELD_METHOD: &str = "authentication_method";
const FIELD_AUTH_USER_HEADER: &str = "auth_user_header";
const FIELD_POWER_AUTH_USERS: &str = "power_auth_users";

impl AuthPolicy {
    /// Load the policy from the `WARDEN_*` process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable holds an invalid value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the policy through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read_only = lookup(ENV_READ_ONLY)
            .map(|raw| parse_flag(FIELD_READ_ONLY, &raw))
            .transpose()?
            .unwrap_or(false);
        let method_raw = lookup(ENV_AUTH_METHOD).unwrap_or_default();
        let auth_user_header = lookup(ENV_AUTH_USER_HEADER)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_USER_HEADER.to_string());
        let power_auth_users = lookup(ENV_POWER_AUTH_USERS)
            .map(|raw| split_user_list(&raw))
            .unwrap_or_default();

        finalize(
            read_only,
            method_raw.trim(),
            auth_user_header,
            power_auth_users,
        )
    }

    /// Load the policy from a JSON object document.
    ///
    /// Recognized keys are `read_only`, `authentication_method`,
    /// `auth_user_header`, and `power_auth_users`; absent keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for non-object documents, unknown keys, mistyped
    /// values, or an invalid header name.
    pub fn from_json(document: &Value) -> ConfigResult<Self> {
        let map = document.as_object().ok_or(ConfigError::NotAnObject)?;

        let mut read_only = false;
        let mut method_raw = String::new();
        let mut auth_user_header = DEFAULT_AUTH_USER_HEADER.to_string();
        let mut power_auth_users = Vec::new();

        for (key, value) in map {
            match key.as_str() {
                FIELD_READ_ONLY => read_only = expect_bool(key, value)?,
                FIELD_METHOD => method_raw = expect_string(key, value)?,
                FIELD_AUTH_USER_HEADER => {
                    let header = expect_string(key, value)?;
                    if !header.is_empty() {
                        auth_user_header = header;
                    }
                }
                FIELD_POWER_AUTH_USERS => power_auth_users = expect_user_list(key, value)?,
                other => {
                    return Err(ConfigError::UnknownField {
                        field: other.to_string(),
                    });
                }
            }
        }

        finalize(read_only, method_raw.trim(), auth_user_header, power_auth_users)
    }
}

fn finalize(
    read_only: bool,
    method_raw: &str,
    auth_user_header: String,
    power_auth_users: Vec<String>,
) -> ConfigResult<AuthPolicy> {
    validate_header_name(FIELD_AUTH_USER_HEADER, &auth_user_header)?;

    let method = AuthMethod::from_config(method_raw);
    if !method_raw.is_empty() && AuthMethod::recognize(method_raw).is_none() {
        warn!(
            configured = %method_raw,
            "unrecognized authentication method; write access is not gated"
        );
    }
    if method == AuthMethod::Proxy && power_auth_users.is_empty() {
        warn!("proxy authentication configured without power users; all writes will be denied");
    }

    let policy = AuthPolicy {
        read_only,
        method,
        auth_user_header,
        power_auth_users,
    };
    info!(
        method = %policy.method,
        read_only = policy.read_only,
        power_users = policy.power_auth_users.len(),
        "authorization policy loaded"
    );
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() -> ConfigResult<()> {
        let policy = AuthPolicy::from_lookup(lookup_from(&[]))?;
        assert_eq!(policy, AuthPolicy::default());
        Ok(())
    }

    #[test]
    fn environment_populates_every_field() -> ConfigResult<()> {
        let policy = AuthPolicy::from_lookup(lookup_from(&[
            ("WARDEN_READ_ONLY", "yes"),
            ("WARDEN_AUTH_METHOD", " Proxy "),
            ("WARDEN_AUTH_USER_HEADER", "X-Remote-User"),
            ("WARDEN_POWER_AUTH_USERS", "bob, alice"),
        ]))?;
        assert!(policy.read_only);
        assert_eq!(policy.method, AuthMethod::Proxy);
        assert_eq!(policy.auth_user_header, "X-Remote-User");
        assert_eq!(policy.power_auth_users, vec!["bob", "alice"]);
        Ok(())
    }

    #[test]
    fn environment_rejects_bad_flag() {
        let err = AuthPolicy::from_lookup(lookup_from(&[("WARDEN_READ_ONLY", "sometimes")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { ref field, .. } if field == "read_only"));
    }

    #[test]
    fn json_document_loads_policy() -> ConfigResult<()> {
        let policy = AuthPolicy::from_json(&json!({
            "read_only": false,
            "authentication_method": "TOKEN",
            "power_auth_users": ["*"]
        }))?;
        assert_eq!(policy.method, AuthMethod::Token);
        assert_eq!(policy.power_auth_users, vec!["*"]);
        assert_eq!(policy.auth_user_header, DEFAULT_AUTH_USER_HEADER);
        Ok(())
    }

    #[test]
    fn json_document_with_unknown_method_is_unrestricted() -> ConfigResult<()> {
        let policy = AuthPolicy::from_json(&json!({ "authentication_method": "ldap" }))?;
        assert_eq!(policy.method, AuthMethod::Unrestricted);
        Ok(())
    }

    #[test]
    fn json_document_rejects_unknown_keys_and_shapes() {
        assert_eq!(
            AuthPolicy::from_json(&json!({ "mode": "basic" })),
            Err(ConfigError::UnknownField {
                field: "mode".to_string()
            })
        );
        assert_eq!(
            AuthPolicy::from_json(&json!(["basic"])),
            Err(ConfigError::NotAnObject)
        );
        assert!(matches!(
            AuthPolicy::from_json(&json!({ "auth_user_header": "bad header" })),
            Err(ConfigError::InvalidField { reason: "invalid header name", .. })
        ));
    }
}
