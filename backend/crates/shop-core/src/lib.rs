pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result as CoreResult};
pub use models::auth_change_event::AuthChangeEvent;
pub use models::auth_state_change::AuthStateChange;
pub use models::auth_user::AuthUser;
pub use models::profile_update::ProfileUpdate;
pub use models::role::Role;
pub use models::session::Session;
pub use models::sign_up_details::{SignUpDetails, SignUpMetadata};
pub use models::user::User;
