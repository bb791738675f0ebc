use shop_core::{ProfileUpdate, User};

use tokio::sync::watch;

/// Snapshot of the local session: the signed-in user (if any) and whether an
/// auth operation is still in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
}

impl SessionState {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Single authoritative local copy of the session.
///
/// Share it behind an `Arc`; consumers call [`SessionStore::subscribe`] to be
/// notified whenever the state changes.
pub struct SessionStore {
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Starts with no user and `loading = true` until initialization settles.
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    /// Replace the user wholesale.
    pub fn set_user(&self, user: Option<User>) {
        self.state.send_modify(|state| state.user = user);
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.loading != loading;
            state.loading = loading;
            changed
        });
    }

    /// Merge written profile fields into the current user. Returns false
    /// when there is no user to merge into.
    pub fn merge_profile(&self, update: &ProfileUpdate) -> bool {
        self.state.send_if_modified(|state| match state.user.as_mut() {
            Some(user) => {
                user.apply(update);
                true
            }
            None => false,
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
