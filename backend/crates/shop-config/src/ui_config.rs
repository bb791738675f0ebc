use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_REDIRECT_DELAY_MS, DEFAULT_REDIRECT_PATH,
    MAX_REDIRECT_DELAY_MS,
};

use std::time::Duration;

use serde::Deserialize;

/// Login screen behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause between the success message and the redirect
    pub redirect_delay_ms: u64,
    /// Where a successful admin login lands
    pub redirect_path: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            redirect_path: String::from(DEFAULT_REDIRECT_PATH),
        }
    }
}

impl UiConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.redirect_delay_ms > MAX_REDIRECT_DELAY_MS {
            return Err(ConfigError::ui(format!(
                "ui.redirect_delay_ms must be 0-{}, got {}",
                MAX_REDIRECT_DELAY_MS, self.redirect_delay_ms
            )));
        }

        if !self.redirect_path.starts_with('/') {
            return Err(ConfigError::ui(format!(
                "ui.redirect_path must start with '/', got '{}'",
                self.redirect_path
            )));
        }

        Ok(())
    }
}
