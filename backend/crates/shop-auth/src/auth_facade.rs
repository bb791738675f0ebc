use crate::profile_sync::load_user_profile;
use crate::{
    AdminCheckChain, AuthError, AuthErrorResult, AuthOutcome, IdentityService, SessionState,
    SessionStore, UNKNOWN_ERROR_MESSAGE,
};

use shop_core::{ProfileUpdate, SignUpDetails, User};

use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::watch;

/// Entry point for every credentialed operation.
///
/// Only accounts whose role is `admin` may keep a session: a successful
/// credential check for anyone else is immediately signed out again.
/// Operations never return `Err`; failures come back as a failed
/// [`AuthOutcome`] carrying a single-line message.
#[derive(Clone)]
pub struct AuthFacade {
    service: Option<Arc<dyn IdentityService>>,
    store: Arc<SessionStore>,
    admin_checks: Arc<AdminCheckChain>,
}

impl AuthFacade {
    /// `service = None` means the identity service is not configured.
    pub fn new(service: Option<Arc<dyn IdentityService>>, store: Arc<SessionStore>) -> Self {
        Self {
            service,
            store,
            admin_checks: Arc::new(AdminCheckChain::standard()),
        }
    }

    pub fn with_admin_checks(mut self, admin_checks: AdminCheckChain) -> Self {
        self.admin_checks = Arc::new(admin_checks);
        self
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn user(&self) -> Option<User> {
        self.store.user()
    }

    pub fn loading(&self) -> bool {
        self.store.loading()
    }

    pub fn is_admin(&self) -> bool {
        self.store.is_admin()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    #[track_caller]
    fn service(&self) -> AuthErrorResult<&Arc<dyn IdentityService>> {
        self.service.as_ref().ok_or_else(AuthError::not_configured)
    }

    // =========================================================================
    // Sign in
    // =========================================================================

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthOutcome {
        let _loading = LoadingGuard::start(&self.store);

        let result = self.try_sign_in(email, password).await;
        if let Err(ref e) = result {
            error!("Sign in failed for {}: {}", email, e);
        }
        result.into()
    }

    async fn try_sign_in(&self, email: &str, password: &str) -> AuthErrorResult<()> {
        let service = self.service()?;

        info!("Attempting sign in for: {}", email);
        let response = service.sign_in_with_password(email, password).await?;

        let Some(auth_user) = response.user else {
            return Err(AuthError::missing_data(UNKNOWN_ERROR_MESSAGE));
        };

        info!(
            "Sign in successful, verifying admin status for: {}",
            auth_user.id
        );
        let decision = self
            .admin_checks
            .decide(service.as_ref(), auth_user.id)
            .await;

        if decision.is_admin {
            info!("Admin status confirmed for: {}", email);
            load_user_profile(service.as_ref(), &self.store, auth_user.id).await;
            return Ok(());
        }

        warn!(
            "Access denied, user is not an admin: {}{}",
            email,
            decision
                .error
                .as_deref()
                .map(|e| format!(" ({e})"))
                .unwrap_or_default()
        );

        if let Err(e) = service.sign_out().await {
            error!("Failed to end session for non-admin {}: {}", email, e);
        }
        self.store.set_user(None);

        match decision.error {
            Some(message) => Err(AuthError::admin_check(message)),
            None => Err(AuthError::access_denied()),
        }
    }

    // =========================================================================
    // Sign up
    // =========================================================================

    /// Create an account. The new account gets no session here; it still has
    /// to pass `sign_in`.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        details: Option<SignUpDetails>,
    ) -> AuthOutcome {
        let _loading = LoadingGuard::start(&self.store);

        let result = self.try_sign_up(email, password, details).await;
        if let Err(ref e) = result {
            error!("Sign up failed for {}: {}", email, e);
        }
        result.into()
    }

    async fn try_sign_up(
        &self,
        email: &str,
        password: &str,
        details: Option<SignUpDetails>,
    ) -> AuthErrorResult<()> {
        let service = self.service()?;
        let metadata = details.unwrap_or_default().metadata();

        info!("Creating account for: {} (role {})", email, metadata.role);
        service.sign_up(email, password, &metadata).await?;
        Ok(())
    }

    // =========================================================================
    // Sign out
    // =========================================================================

    /// Best-effort remote sign-out; the local user is always cleared.
    pub async fn sign_out(&self) {
        let _loading = LoadingGuard::start(&self.store);

        if let Some(service) = self.service.as_ref()
            && let Err(e) = service.sign_out().await
        {
            error!("Sign out error: {}", e);
        }

        self.store.set_user(None);
        info!("Sign out successful");
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Write `update` to the current user's profile record, then merge the
    /// same fields into the local user without re-fetching.
    pub async fn update_profile(&self, update: ProfileUpdate) -> AuthOutcome {
        let result = self.try_update_profile(&update).await;
        if let Err(ref e) = result {
            warn!("Profile update failed: {}", e);
        }
        result.into()
    }

    async fn try_update_profile(&self, update: &ProfileUpdate) -> AuthErrorResult<()> {
        let user = self.store.user().ok_or_else(AuthError::not_authenticated)?;
        let service = self.service()?;

        service.update_profile(user.id, update).await?;

        // Optimistic: server-side rewrites of the row are not reflected
        // locally until the next profile load.
        self.store.merge_profile(update);
        info!("Profile updated for: {}", user.id);
        Ok(())
    }
}

/// Holds `loading = true` for its lifetime.
struct LoadingGuard<'a> {
    store: &'a SessionStore,
}

impl<'a> LoadingGuard<'a> {
    fn start(store: &'a SessionStore) -> Self {
        store.set_loading(true);
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.set_loading(false);
    }
}
