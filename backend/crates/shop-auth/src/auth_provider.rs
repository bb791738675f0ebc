use crate::profile_sync::load_user_profile;
use crate::{
    AdminCheckChain, AuthFacade, IdentityService, SessionState, SessionStore,
    ShutdownCoordinator, ShutdownGuard,
};

use shop_core::{AuthChangeEvent, AuthStateChange};

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error, info, warn};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

/// Owns the session lifecycle for one consuming scope.
///
/// [`AuthProvider::start`] subscribes to change notifications, restores any
/// existing session and keeps the [`SessionStore`] in step with the identity
/// service until [`AuthProvider::teardown`] (or drop). Must be started inside
/// a Tokio runtime.
pub struct AuthProvider {
    store: Arc<SessionStore>,
    facade: AuthFacade,
    shutdown: ShutdownCoordinator,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl AuthProvider {
    pub fn start(service: Option<Arc<dyn IdentityService>>, admin_checks: AdminCheckChain) -> Self {
        let store = Arc::new(SessionStore::new());
        let facade =
            AuthFacade::new(service.clone(), Arc::clone(&store)).with_admin_checks(admin_checks);
        let shutdown = ShutdownCoordinator::new();

        let listener = match service {
            Some(service) => {
                // Subscribe before restoring so no change slips between the two.
                let events = service.on_auth_state_change();
                let guard = shutdown.subscribe_guard();
                Some(tokio::spawn(run_listener(
                    service,
                    Arc::clone(&store),
                    events,
                    guard,
                )))
            }
            None => {
                info!("Identity service not configured, running without a session");
                store.set_loading(false);
                None
            }
        };

        Self {
            store,
            facade,
            shutdown,
            listener: Mutex::new(listener),
        }
    }

    pub fn facade(&self) -> &AuthFacade {
        &self.facade
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// True until teardown.
    pub fn is_listening(&self) -> bool {
        self.listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Wait until no auth operation is in flight (initial restore included)
    /// and return the state at that point.
    pub async fn settled(&self) -> SessionState {
        let mut rx = self.store.subscribe();
        match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.store.snapshot(),
        }
    }

    /// Stop listening. Safe to call more than once; only the first call does
    /// anything. Once it returns, no change notification touches the store.
    pub async fn teardown(&self) {
        let handle = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(handle) = handle else {
            debug!("Auth provider already torn down");
            return;
        };

        self.shutdown.shutdown();
        if let Err(e) = handle.await {
            error!("Auth state listener ended abnormally: {}", e);
        }
        info!("Auth provider torn down");
    }
}

impl Drop for AuthProvider {
    fn drop(&mut self) {
        let listener = self
            .listener
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if listener.take().is_some() {
            self.shutdown.shutdown();
        }
    }
}

async fn run_listener(
    service: Arc<dyn IdentityService>,
    store: Arc<SessionStore>,
    mut events: broadcast::Receiver<AuthStateChange>,
    mut guard: ShutdownGuard,
) {
    tokio::select! {
        biased;
        _ = guard.wait() => {
            debug!("Auth provider shut down during session restore");
            return;
        }
        _ = restore_session(service.as_ref(), &store) => {}
    }

    loop {
        tokio::select! {
            biased;
            _ = guard.wait() => break,
            change = events.recv() => {
                let change = match change {
                    Ok(change) => change,
                    Err(RecvError::Lagged(missed)) => {
                        warn!("Auth state listener lagged, missed {} change(s); resyncing", missed);
                        tokio::select! {
                            biased;
                            _ = guard.wait() => break,
                            _ = resync_session(service.as_ref(), &store) => {}
                        }
                        continue;
                    }
                    Err(RecvError::Closed) => {
                        info!("Auth state channel closed");
                        break;
                    }
                };

                tokio::select! {
                    biased;
                    _ = guard.wait() => break,
                    _ = apply_change(service.as_ref(), &store, change) => {}
                }
            }
        }
    }

    debug!("Auth state listener stopped");
}

async fn restore_session(service: &dyn IdentityService, store: &SessionStore) {
    info!("Checking initial authentication state...");

    match service.get_session().await {
        Ok(Some(session)) => {
            info!(
                "Found existing session for: {}",
                session
                    .user
                    .email
                    .as_deref()
                    .unwrap_or(&session.user.id.to_string())
            );
            load_user_profile(service, store, session.user.id).await;
        }
        Ok(None) => debug!("No existing session"),
        Err(e) => error!("Session error: {}", e),
    }

    store.set_loading(false);
}

async fn apply_change(service: &dyn IdentityService, store: &SessionStore, change: AuthStateChange) {
    info!("Auth state changed: {}", change.event);

    match change.user_id() {
        Some(user_id) => {
            load_user_profile(service, store, user_id).await;
        }
        None => store.set_user(None),
    }

    store.set_loading(false);
}

/// Re-read the current session after missed notifications and treat it as a
/// fresh change.
async fn resync_session(service: &dyn IdentityService, store: &SessionStore) {
    match service.get_session().await {
        Ok(session) => {
            apply_change(
                service,
                store,
                AuthStateChange::new(AuthChangeEvent::InitialSession, session),
            )
            .await
        }
        Err(e) => error!("Session resync error: {}", e),
    }
}
