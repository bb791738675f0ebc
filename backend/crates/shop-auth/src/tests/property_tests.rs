use super::{ADMIN_EMAIL, FakeIdentityService, PASSWORD};
use crate::{AuthFacade, IdentityService, SessionStore};

use std::sync::Arc;

use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

// =========================================================================
// Property-Based Tests - Credentials
// =========================================================================

proptest! {
    #[test]
    fn given_wrong_password_when_signing_in_then_fails_without_session(
        password in "[ -~]{0,32}",
    ) {
        prop_assume!(password != PASSWORD);

        let service = Arc::new(FakeIdentityService::new());
        let dyn_service: Arc<dyn IdentityService> = service.clone();
        let facade = AuthFacade::new(Some(dyn_service), Arc::new(SessionStore::new()));

        let outcome = runtime().block_on(facade.sign_in(ADMIN_EMAIL, &password));

        prop_assert!(!outcome.success);
        prop_assert!(outcome.error.is_some());
        prop_assert!(facade.user().is_none());
        prop_assert!(!facade.loading());
        prop_assert!(!service.has_session());
    }

    #[test]
    fn given_unknown_email_when_signing_in_then_fails_without_session(
        email in "[a-z]{1,12}@[a-z]{1,8}\\.example",
    ) {
        let service = Arc::new(FakeIdentityService::new());
        let dyn_service: Arc<dyn IdentityService> = service.clone();
        let facade = AuthFacade::new(Some(dyn_service), Arc::new(SessionStore::new()));

        let outcome = runtime().block_on(facade.sign_in(&email, PASSWORD));

        prop_assert!(!outcome.success);
        prop_assert!(facade.user().is_none());
        prop_assert_eq!(service.calls("is_admin"), 0);
    }
}
