pub mod auth_change_event;
pub mod auth_state_change;
pub mod auth_user;
pub mod profile_update;
pub mod role;
pub mod session;
pub mod sign_up_details;
pub mod user;
