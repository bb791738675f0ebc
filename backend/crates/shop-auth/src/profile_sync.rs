use crate::{IdentityService, SessionStore};

use log::{error, info};
use uuid::Uuid;

/// Fetch the profile record for `user_id` and replace the local user with it.
///
/// Failures are logged and leave the local user untouched. Returns whether
/// the store was updated.
pub async fn load_user_profile(
    service: &dyn IdentityService,
    store: &SessionStore,
    user_id: Uuid,
) -> bool {
    info!("Fetching user profile for: {}", user_id);

    match service.fetch_profile(user_id).await {
        Ok(user) => {
            info!("User profile loaded: {} Role: {}", user.email, user.role);
            store.set_user(Some(user));
            true
        }
        Err(e) => {
            error!("Profile fetch error: {}", e);
            false
        }
    }
}
