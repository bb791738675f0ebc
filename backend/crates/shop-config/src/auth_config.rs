use crate::{
    AdminCheckKind, ConfigError, ConfigErrorResult, DEFAULT_PERSIST_SESSION,
    DEFAULT_SESSION_FILE,
};

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Ordered admin-check strategies; the first definitive answer wins
    pub admin_checks: Vec<AdminCheckKind>,
    /// Keep the session on disk between runs
    pub persist_session: bool,
    /// Session file, relative to the config directory
    pub session_file: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_checks: AdminCheckKind::default_order(),
            persist_session: DEFAULT_PERSIST_SESSION,
            session_file: String::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.admin_checks.is_empty() {
            return Err(ConfigError::auth(
                "auth.admin_checks must list at least one strategy",
            ));
        }

        let mut seen = HashSet::new();
        for kind in &self.admin_checks {
            if !seen.insert(kind) {
                return Err(ConfigError::auth(format!(
                    "auth.admin_checks lists '{}' more than once",
                    kind
                )));
            }
        }

        if self.session_file.is_empty() {
            return Err(ConfigError::auth("auth.session_file cannot be empty"));
        }

        let path = Path::new(&self.session_file);
        if path.is_absolute() || self.session_file.contains("..") {
            return Err(ConfigError::auth(
                "auth.session_file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
