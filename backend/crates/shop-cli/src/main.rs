//! shop-admin - admin session client for the shop site
//!
//! # Examples
//!
//! ```bash
//! # Sign in (password read from stdin)
//! shop-admin login --email admin@shop.test
//!
//! # Who is signed in?
//! shop-admin whoami --pretty
//!
//! # Change the phone number on your profile
//! shop-admin profile update --phone 555-0100
//! ```

use shop_cli::Cli;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load .env before config so SHOP_* overrides can live there
    let _ = dotenvy::dotenv();

    match shop_cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
