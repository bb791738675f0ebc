use crate::{CliError, CliErrorResult, Cli, Commands, LoginForm, LoginStatus, ProfileCommands, logger};

use shop_auth::{AdminCheckChain, AuthProvider, IdentityService, RestIdentityService};
use shop_config::{Config, UiConfig};
use shop_core::{SignUpDetails, User};

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use log::info;

/// Load config, start logging and the auth provider, run one command and
/// tear the provider down again.
pub async fn run(cli: Cli) -> CliErrorResult<ExitCode> {
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = log_file_path(&config)?;
    let log_level = cli.log_level.unwrap_or(config.logging.level);
    logger::initialize(log_level, log_file_path, config.logging.colored)?;

    info!("Starting shop-admin v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let service = RestIdentityService::from_config(&config.identity, config.session_path()?)?
        .map(|service| Arc::new(service) as Arc<dyn IdentityService>);
    let provider = AuthProvider::start(
        service,
        AdminCheckChain::from_kinds(&config.auth.admin_checks),
    );
    provider.settled().await;

    let result = execute(cli.command, &provider, &config.ui, cli.pretty).await;
    provider.teardown().await;

    Ok(if result? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn log_file_path(config: &Config) -> CliErrorResult<Option<PathBuf>> {
    let Some(ref filename) = config.logging.file else {
        return Ok(None);
    };

    let log_dir = Config::config_dir()?.join(&config.logging.dir);
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| CliError::logger(format!("Failed to create {}: {}", log_dir.display(), e)))?;

    Ok(Some(log_dir.join(filename)))
}

/// Run one command against a started provider. Returns whether it succeeded.
pub async fn execute(
    command: Commands,
    provider: &AuthProvider,
    ui: &UiConfig,
    pretty: bool,
) -> CliErrorResult<bool> {
    let facade = provider.facade();

    match command {
        Commands::Login {
            email,
            password,
            show_password,
        } => {
            let mut form = LoginForm::new(ui);
            form.set_email(value_or_prompt(email, "email", "Email: ")?);
            form.set_password(value_or_prompt(password, "password", "Password: ")?);
            if show_password {
                form.toggle_password_visibility();
            }
            println!("Signing in as {} (password: {})", form.email(), form.password_display());

            let redirect = form.submit(facade, print_status).await;

            match redirect {
                Some(redirect) => {
                    redirect.wait().await;
                    println!("Redirecting to {}", redirect.path);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        Commands::Signup {
            email,
            password,
            full_name,
            phone,
            role,
        } => {
            let email = value_or_prompt(email, "email", "Email: ")?;
            let password = value_or_prompt(password, "password", "Password: ")?;
            let details = SignUpDetails {
                full_name,
                phone,
                role,
            };

            let outcome = facade.sign_up(&email, &password, Some(details)).await;
            match outcome.error {
                None => {
                    println!("Account created for {}", email);
                    Ok(true)
                }
                Some(message) => {
                    eprintln!("{}", message);
                    Ok(false)
                }
            }
        }

        Commands::Logout => {
            facade.sign_out().await;
            println!("Signed out");
            Ok(true)
        }

        Commands::Whoami => match facade.user() {
            Some(user) => {
                print_user(&user, pretty)?;
                Ok(true)
            }
            None => {
                eprintln!("Not signed in");
                Ok(false)
            }
        },

        Commands::Profile { action } => match action {
            ProfileCommands::Update { .. } => {
                let update = action.to_update();
                if update.is_empty() {
                    eprintln!("Nothing to update");
                    return Ok(false);
                }

                let outcome = facade.update_profile(update).await;
                if let Some(message) = outcome.error {
                    eprintln!("{}", message);
                    return Ok(false);
                }

                if let Some(user) = facade.user() {
                    print_user(&user, pretty)?;
                }
                Ok(true)
            }
        },
    }
}

fn print_status(status: &LoginStatus) {
    if let Some(message) = status.message() {
        if status.is_error() {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }
}

fn print_user(user: &User, pretty: bool) -> CliErrorResult<()> {
    let output = if pretty {
        serde_json::to_string_pretty(user)
    } else {
        serde_json::to_string(user)
    };

    let json = output.map_err(|e| CliError::output(format!("Error serializing user: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Use the flag value, or read one line from stdin after printing `label`.
fn value_or_prompt(
    value: Option<String>,
    what: &'static str,
    label: &str,
) -> CliErrorResult<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    let mut stderr = std::io::stderr();
    write!(stderr, "{}", label).map_err(|e| CliError::input(what, e))?;
    stderr.flush().map_err(|e| CliError::input(what, e))?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::input(what, e))?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
