use crate::AuthErrorResult;

use shop_core::{AuthStateChange, AuthUser, ProfileUpdate, Session, SignUpMetadata, User};

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Result of a credential operation. Either part may be absent depending on
/// what the service returned.
#[derive(Debug, Clone, Default)]
pub struct AuthResponse {
    pub user: Option<AuthUser>,
    pub session: Option<Session>,
}

/// The remote identity-and-profile service.
///
/// Implementations own the current remote session and broadcast every
/// change of it to subscribers of [`IdentityService::on_auth_state_change`].
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Current session, refreshed first if it has expired.
    async fn get_session(&self) -> AuthErrorResult<Option<Session>>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthErrorResult<AuthResponse>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &SignUpMetadata,
    ) -> AuthErrorResult<AuthResponse>;

    /// Ends the remote session. The local copy of the session is dropped even
    /// when the remote call fails.
    async fn sign_out(&self) -> AuthErrorResult<()>;

    /// Subscribe to auth-state changes. Dropping the receiver unsubscribes.
    fn on_auth_state_change(&self) -> broadcast::Receiver<AuthStateChange>;

    /// Privileged admin predicate.
    async fn is_admin(&self, user_id: Uuid) -> AuthErrorResult<bool>;

    async fn fetch_profile(&self, user_id: Uuid) -> AuthErrorResult<User>;

    /// Raw `role` column of the profile record, `None` when it is null.
    async fn fetch_role(&self, user_id: Uuid) -> AuthErrorResult<Option<String>>;

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AuthErrorResult<()>;
}
