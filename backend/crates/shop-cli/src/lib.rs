//! shop-admin library
//!
//! Command handling for the `shop-admin` binary, exported so tests can drive
//! it without a terminal.

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod login_form;
pub mod profile_commands;


pub use app::{execute, run};
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliErrorResult};
pub use login_form::{LoginForm, LoginStatus, Redirect};
pub use profile_commands::ProfileCommands;
