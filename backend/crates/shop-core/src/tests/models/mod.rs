mod auth_change_event;
mod role;
mod session;
mod sign_up_details;
mod user;
