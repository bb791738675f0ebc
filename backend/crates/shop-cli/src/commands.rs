use crate::profile_commands::ProfileCommands;

use shop_core::Role;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in as an admin
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Account password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Show the entered password instead of masking it
        #[arg(long)]
        show_password: bool,
    },

    /// Create an account. It still has to be an admin to log in.
    Signup {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        full_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// customer (default), staff or admin
        #[arg(long)]
        role: Option<Role>,
    },

    /// End the current session
    Logout,

    /// Show the signed-in admin's profile
    Whoami,

    /// Profile operations
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
}
