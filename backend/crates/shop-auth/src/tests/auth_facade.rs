use super::{ADMIN_EMAIL, FakeIdentityService, PASSWORD, STAFF_EMAIL, USER_EMAIL};
use crate::{
    ACCESS_DENIED_MESSAGE, AuthFacade, IdentityService, NOT_AUTHENTICATED_MESSAGE,
    NOT_CONFIGURED_MESSAGE, SessionStore,
};

use shop_core::{ProfileUpdate, Role, SignUpDetails};

use std::sync::Arc;
use std::time::Duration;

use googletest::prelude::*;

fn facade_with(service: &Arc<FakeIdentityService>) -> AuthFacade {
    let service: Arc<dyn IdentityService> = service.clone();
    AuthFacade::new(Some(service), Arc::new(SessionStore::new()))
}

fn setup() -> (Arc<FakeIdentityService>, AuthFacade) {
    let service = Arc::new(FakeIdentityService::new());
    let facade = facade_with(&service);
    (service, facade)
}

// =========================================================================
// Unconfigured service
// =========================================================================

#[tokio::test]
async fn given_unconfigured_service_when_signing_in_then_not_configured() {
    let facade = AuthFacade::new(None, Arc::new(SessionStore::new()));

    let outcome = facade.sign_in(ADMIN_EMAIL, PASSWORD).await;

    assert!(!facade.is_configured());
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some(NOT_CONFIGURED_MESSAGE));
    assert!(facade.user().is_none());
    assert!(!facade.loading());
}

#[tokio::test]
async fn given_unconfigured_service_when_any_operation_then_fails_cleanly_without_panic() {
    let facade = AuthFacade::new(None, Arc::new(SessionStore::new()));

    let sign_up = facade.sign_up("new@shop.test", PASSWORD, None).await;
    let update = facade
        .update_profile(ProfileUpdate {
            phone: Some("555-0100".to_string()),
            ..Default::default()
        })
        .await;
    facade.sign_out().await;

    assert_eq!(sign_up.error.as_deref(), Some(NOT_CONFIGURED_MESSAGE));
    assert_eq!(update.error.as_deref(), Some(NOT_AUTHENTICATED_MESSAGE));
    assert!(facade.user().is_none());
    assert!(!facade.loading());
}

// =========================================================================
// Sign in
// =========================================================================

#[tokio::test]
async fn given_wrong_password_when_signing_in_then_remote_message_and_no_session() {
    let (service, facade) = setup();

    let outcome = facade.sign_in(ADMIN_EMAIL, "wrong-password").await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Invalid login credentials"));
    assert!(facade.user().is_none());
    assert!(!facade.loading());
    assert_eq!(service.calls("is_admin"), 0);
}

#[tokio::test]
async fn given_admin_credentials_when_signing_in_then_success_with_admin_role() {
    let (service, facade) = setup();

    let outcome = facade.sign_in(ADMIN_EMAIL, PASSWORD).await;

    assert_that!(outcome.success, eq(true));
    assert!(outcome.error.is_none());
    let user = facade.user().unwrap();
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.email, ADMIN_EMAIL);
    assert!(facade.is_admin());
    assert!(!facade.loading());
    assert!(service.has_session());
}

#[tokio::test]
async fn given_customer_credentials_when_signing_in_then_access_denied_and_session_ended() {
    let (service, facade) = setup();

    let outcome = facade.sign_in(USER_EMAIL, PASSWORD).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some(ACCESS_DENIED_MESSAGE));
    assert!(facade.user().is_none());
    assert!(!facade.loading());
    assert_eq!(service.calls("sign_out"), 1);
    assert!(service.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn given_staff_credentials_when_signing_in_then_access_denied() {
    let (service, facade) = setup();

    let outcome = facade.sign_in(STAFF_EMAIL, PASSWORD).await;

    assert_eq!(outcome.error.as_deref(), Some(ACCESS_DENIED_MESSAGE));
    assert!(!service.has_session());
}

#[tokio::test]
async fn given_admin_lookup_fails_when_signing_in_then_lookup_error_and_session_ended() {
    let (service, facade) = setup();
    service.fail_rpc("function is_admin does not exist");
    service.fail_profile("permission denied for table profiles");

    let outcome = facade.sign_in(ADMIN_EMAIL, PASSWORD).await;

    assert!(!outcome.success);
    assert_that!(
        outcome.error.unwrap(),
        contains_substring("permission denied for table profiles")
    );
    assert!(facade.user().is_none());
    assert!(!service.has_session());
}

#[tokio::test]
async fn given_rpc_unavailable_when_admin_signs_in_then_profile_role_grants_access() {
    let (service, facade) = setup();
    service.fail_rpc("function is_admin does not exist");

    let outcome = facade.sign_in(ADMIN_EMAIL, PASSWORD).await;

    assert!(outcome.success);
    assert!(facade.is_admin());
}

#[tokio::test]
async fn given_profile_fetch_fails_after_admin_confirmed_then_success_but_user_unchanged() {
    let (service, facade) = setup();
    // rpc answers, so the only profile read is the post-sign-in load
    service.fail_profile("connection reset");

    let outcome = facade.sign_in(ADMIN_EMAIL, PASSWORD).await;

    assert!(outcome.success);
    assert!(facade.user().is_none());
    assert!(!facade.loading());
}

#[tokio::test]
async fn given_sign_in_in_flight_then_loading_until_it_finishes() {
    let (service, facade) = setup();
    service.delay_profile(Duration::from_millis(100));

    let task = {
        let facade = facade.clone();
        tokio::spawn(async move { facade.sign_in(ADMIN_EMAIL, PASSWORD).await })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(facade.loading());

    let outcome = task.await.unwrap();
    assert!(outcome.success);
    assert!(!facade.loading());
}

// =========================================================================
// Sign up
// =========================================================================

#[tokio::test]
async fn given_no_details_when_signing_up_then_role_defaults_to_customer() {
    let (service, facade) = setup();

    let outcome = facade.sign_up("new@shop.test", PASSWORD, None).await;

    assert!(outcome.success);
    let metadata = service.last_sign_up().unwrap();
    assert_eq!(metadata.role, Role::Customer);
    assert!(metadata.full_name.is_none());
    assert_eq!(service.stored_profile("new@shop.test").role, Role::Customer);
}

#[tokio::test]
async fn given_details_when_signing_up_then_fields_sent_and_no_session_kept() {
    let (service, facade) = setup();
    let details = SignUpDetails {
        full_name: Some("Robin Mechanic".to_string()),
        phone: Some("555-0199".to_string()),
        role: Some(Role::Staff),
    };

    let outcome = facade.sign_up("robin@shop.test", PASSWORD, Some(details)).await;

    assert!(outcome.success);
    let metadata = service.last_sign_up().unwrap();
    assert_eq!(metadata.full_name.as_deref(), Some("Robin Mechanic"));
    assert_eq!(metadata.phone.as_deref(), Some("555-0199"));
    assert_eq!(metadata.role, Role::Staff);
    assert!(facade.user().is_none());
    assert!(!service.has_session());
    assert_eq!(service.calls("is_admin"), 0);
}

#[tokio::test]
async fn given_existing_email_when_signing_up_then_remote_message() {
    let (_service, facade) = setup();

    let outcome = facade.sign_up(USER_EMAIL, PASSWORD, None).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("User already registered"));
    assert!(!facade.loading());
}

// =========================================================================
// Sign out
// =========================================================================

#[tokio::test]
async fn given_admin_session_when_signing_out_then_user_absent() {
    let (service, facade) = setup();
    facade.sign_in(ADMIN_EMAIL, PASSWORD).await;

    facade.sign_out().await;

    assert!(facade.user().is_none());
    assert!(!facade.is_admin());
    assert!(!service.has_session());
    assert!(!facade.loading());
}

#[tokio::test]
async fn given_signed_out_when_signing_out_again_then_no_error_and_still_absent() {
    let (_service, facade) = setup();
    facade.sign_in(ADMIN_EMAIL, PASSWORD).await;

    facade.sign_out().await;
    facade.sign_out().await;

    assert!(facade.user().is_none());
    assert!(!facade.loading());
}

#[tokio::test]
async fn given_remote_sign_out_fails_then_local_user_still_cleared() {
    let (service, facade) = setup();
    facade.sign_in(ADMIN_EMAIL, PASSWORD).await;
    service.fail_sign_out("service unavailable");

    facade.sign_out().await;

    assert!(facade.user().is_none());
}

// =========================================================================
// Profile updates
// =========================================================================

#[tokio::test]
async fn given_no_session_when_updating_profile_then_not_authenticated_and_no_remote_call() {
    let (service, facade) = setup();

    let outcome = facade
        .update_profile(ProfileUpdate {
            full_name: Some("Nobody".to_string()),
            ..Default::default()
        })
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some(NOT_AUTHENTICATED_MESSAGE));
    assert_eq!(service.total_calls(), 0);
}

#[tokio::test]
async fn given_admin_session_when_updating_profile_then_written_and_merged_locally() {
    let (service, facade) = setup();
    facade.sign_in(ADMIN_EMAIL, PASSWORD).await;
    let fetches_before = service.calls("fetch_profile");

    let outcome = facade
        .update_profile(ProfileUpdate {
            phone: Some("555-0100".to_string()),
            ..Default::default()
        })
        .await;

    assert!(outcome.success);
    assert_eq!(facade.user().unwrap().phone.as_deref(), Some("555-0100"));
    assert_eq!(
        service.stored_profile(ADMIN_EMAIL).phone.as_deref(),
        Some("555-0100")
    );
    assert_eq!(service.calls("update_profile"), 1);
    assert_eq!(service.calls("fetch_profile"), fetches_before);
}

#[tokio::test]
async fn given_server_rewrites_written_value_then_local_copy_keeps_what_was_sent() {
    let (service, facade) = setup();
    facade.sign_in(ADMIN_EMAIL, PASSWORD).await;
    service.rewrite_on_update(ProfileUpdate {
        phone: Some("+1 555 0100".to_string()),
        ..Default::default()
    });

    facade
        .update_profile(ProfileUpdate {
            phone: Some("555-0100".to_string()),
            ..Default::default()
        })
        .await;

    assert_eq!(facade.user().unwrap().phone.as_deref(), Some("555-0100"));
    assert_eq!(
        service.stored_profile(ADMIN_EMAIL).phone.as_deref(),
        Some("+1 555 0100")
    );
}

#[tokio::test]
async fn given_remote_write_fails_when_updating_profile_then_local_user_unchanged() {
    let (service, facade) = setup();
    facade.sign_in(ADMIN_EMAIL, PASSWORD).await;
    let mut ghost = facade.user().unwrap();
    ghost.id = uuid::Uuid::new_v4();
    facade.store().set_user(Some(ghost.clone()));

    let outcome = facade
        .update_profile(ProfileUpdate {
            phone: Some("555-0100".to_string()),
            ..Default::default()
        })
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Profile not found"));
    assert_eq!(facade.user(), Some(ghost));
    assert_eq!(service.calls("update_profile"), 1);
}
