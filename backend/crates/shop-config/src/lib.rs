mod admin_check_kind;
mod auth_config;
mod config;
mod error;
mod identity_config;
mod log_level;
mod logging_config;
mod ui_config;

#[cfg(test)]
mod tests;

pub use admin_check_kind::AdminCheckKind;
pub use auth_config::AuthConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use identity_config::IdentityConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use ui_config::UiConfig;

const CONFIG_DIR_ENV: &str = "SHOP_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".shop";
const CONFIG_FILENAME: &str = "config.toml";

// Identity service
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;
const DEFAULT_PROFILE_TABLE: &str = "profiles";
const DEFAULT_ADMIN_RPC: &str = "is_admin";

// Auth
const DEFAULT_PERSIST_SESSION: bool = true;
const DEFAULT_SESSION_FILE: &str = "session.json";

// Logging
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

// UI
const DEFAULT_REDIRECT_DELAY_MS: u64 = 1000;
const MAX_REDIRECT_DELAY_MS: u64 = 10_000;
const DEFAULT_REDIRECT_PATH: &str = "/admin";
