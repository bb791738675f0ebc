//! Admin session client for the shop site.
//!
//! [`AuthProvider`] owns the session lifecycle: it restores any existing
//! session, listens for identity-service change notifications and tears the
//! listener down exactly once. [`AuthFacade`] is what the rest of the
//! application calls to sign in, sign up, sign out and edit the profile; it
//! only lets `admin` accounts keep a session.

pub mod admin_check;
pub mod auth_facade;
pub mod auth_outcome;
pub mod auth_provider;
pub mod error;
pub mod identity_service;
pub mod profile_sync;
pub mod rest;
pub mod session_store;
pub mod shutdown;

#[cfg(test)]
mod tests;

pub use admin_check::{
    AdminCheck, AdminCheckChain, AdminDecision, CheckOutcome, ProfileRoleAdminCheck,
    RpcAdminCheck,
};
pub use auth_facade::AuthFacade;
pub use auth_outcome::AuthOutcome;
pub use auth_provider::AuthProvider;
pub use error::{AuthError, Result as AuthErrorResult};
pub use identity_service::{AuthResponse, IdentityService};
pub use rest::rest_identity_service::RestIdentityService;
pub use rest::session_file::SessionFile;
pub use session_store::{SessionState, SessionStore};
pub use shutdown::{ShutdownCoordinator, ShutdownGuard};

pub const NOT_CONFIGURED_MESSAGE: &str = "Authentication service not configured.";
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. User is not an admin.";
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Capacity of the auth-state change broadcast channel
pub const EVENT_CHANNEL_CAPACITY: usize = 16;
