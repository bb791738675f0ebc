use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ADMIN_RPC, DEFAULT_PROFILE_TABLE,
    DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// Connection settings for the hosted identity/profile service.
///
/// Leaving `url` or `anon_key` unset is not an error: the client then runs
/// unconfigured and every operation reports "not configured".
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Base URL, e.g. `https://project.example.co`
    pub url: Option<String>,
    /// Public (anonymous) API key sent with every request
    pub anon_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Table holding one profile row per user
    pub profile_table: String,
    /// Name of the privileged admin predicate
    pub admin_rpc: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            profile_table: String::from(DEFAULT_PROFILE_TABLE),
            admin_rpc: String::from(DEFAULT_ADMIN_RPC),
        }
    }
}

impl IdentityConfig {
    /// Both url and key are present and non-empty.
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    /// `(url, anon_key)` when configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.url.as_deref(), self.anon_key.as_deref()) {
            (Some(url), Some(key)) if !url.trim().is_empty() && !key.trim().is_empty() => {
                Some((url, key))
            }
            _ => None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(ref url) = self.url
            && !url.is_empty()
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::identity(format!(
                "identity.url must start with http:// or https://, got '{}'",
                url
            )));
        }

        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::identity(format!(
                "identity.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        validate_identifier("identity.profile_table", &self.profile_table)?;
        validate_identifier("identity.admin_rpc", &self.admin_rpc)?;

        Ok(())
    }
}

/// Table and function names end up in request paths.
fn validate_identifier(field: &str, value: &str) -> ConfigErrorResult<()> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid {
        return Err(ConfigError::identity(format!(
            "{} must be a non-empty identifier of [A-Za-z0-9_], got '{}'",
            field, value
        )));
    }

    Ok(())
}
