use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, IdentityConfig, LoggingConfig, UiConfig,
};

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub identity: IdentityConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for SHOP_CONFIG_DIR env var, else use ./.shop/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply SHOP_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: SHOP_CONFIG_DIR env var > ./.shop/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.identity.validate()?;
        self.auth.validate()?;
        self.ui.validate()?;

        if let Some(ref file) = self.logging.file
            && (file.is_empty() || Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::logging(
                "logging.file must be a relative file name without '..'",
            ));
        }

        Ok(())
    }

    /// Absolute path of the persisted session, or None when persistence is off.
    pub fn session_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        if !self.auth.persist_session {
            return Ok(None);
        }
        Ok(Some(Self::config_dir()?.join(&self.auth.session_file)))
    }

    /// Log configuration summary (NEVER logs the API key).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        match self.identity.url {
            Some(ref url) if self.identity.is_configured() => info!(
                "  identity: {} (timeout {}s, profiles in '{}', rpc '{}')",
                url,
                self.identity.timeout_secs,
                self.identity.profile_table,
                self.identity.admin_rpc
            ),
            _ => info!("  identity: not configured"),
        }

        let checks: Vec<&str> = self.auth.admin_checks.iter().map(|k| k.as_str()).collect();
        info!(
            "  auth: admin_checks=[{}], persist_session={}",
            checks.join(", "),
            self.auth.persist_session
        );

        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );

        info!(
            "  ui: redirect to {} after {}ms",
            self.ui.redirect_path, self.ui.redirect_delay_ms
        );
    }

    fn apply_env_overrides(&mut self) {
        // Identity
        Self::apply_env_option_string("SHOP_IDENTITY_URL", &mut self.identity.url);
        Self::apply_env_option_string("SHOP_IDENTITY_ANON_KEY", &mut self.identity.anon_key);
        Self::apply_env_parse(
            "SHOP_IDENTITY_TIMEOUT_SECS",
            &mut self.identity.timeout_secs,
        );
        Self::apply_env_string(
            "SHOP_IDENTITY_PROFILE_TABLE",
            &mut self.identity.profile_table,
        );
        Self::apply_env_string("SHOP_IDENTITY_ADMIN_RPC", &mut self.identity.admin_rpc);

        // Auth
        Self::apply_env_list("SHOP_AUTH_ADMIN_CHECKS", &mut self.auth.admin_checks);
        Self::apply_env_bool("SHOP_AUTH_PERSIST_SESSION", &mut self.auth.persist_session);
        Self::apply_env_string("SHOP_AUTH_SESSION_FILE", &mut self.auth.session_file);

        // Logging
        Self::apply_env_parse("SHOP_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("SHOP_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("SHOP_LOG_FILE", &mut self.logging.file);

        // UI
        Self::apply_env_parse(
            "SHOP_UI_REDIRECT_DELAY_MS",
            &mut self.ui.redirect_delay_ms,
        );
        Self::apply_env_string("SHOP_UI_REDIRECT_PATH", &mut self.ui.redirect_path);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Apply a comma-separated list override. An entry that fails to
    /// parse discards the whole override.
    fn apply_env_list<T: FromStr>(var_name: &str, target: &mut Vec<T>) {
        if let Ok(val) = std::env::var(var_name) {
            let parsed: Result<Vec<T>, _> = val
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().parse())
                .collect();
            if let Ok(list) = parsed {
                *target = list;
            }
        }
    }
}
