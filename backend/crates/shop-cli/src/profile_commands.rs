use shop_core::ProfileUpdate;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Update fields of the signed-in user's profile
    Update {
        #[arg(long)]
        full_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        avatar_url: Option<String>,
    },
}

impl ProfileCommands {
    pub fn to_update(&self) -> ProfileUpdate {
        match self {
            ProfileCommands::Update {
                full_name,
                phone,
                email,
                avatar_url,
            } => ProfileUpdate {
                email: email.clone(),
                full_name: full_name.clone(),
                phone: phone.clone(),
                role: None,
                avatar_url: avatar_url.clone(),
            },
        }
    }
}
