use crate::{AuthChangeEvent, AuthStateChange};

use std::str::FromStr;

#[test]
fn test_auth_change_event_round_trips_through_str() {
    for event in [
        AuthChangeEvent::InitialSession,
        AuthChangeEvent::SignedIn,
        AuthChangeEvent::SignedOut,
        AuthChangeEvent::TokenRefreshed,
        AuthChangeEvent::UserUpdated,
    ] {
        assert_eq!(AuthChangeEvent::from_str(event.as_str()).unwrap(), event);
    }
    assert!(AuthChangeEvent::from_str("PASSWORD_RECOVERY").is_err());
}

#[test]
fn test_signed_out_change_has_no_user() {
    let change = AuthStateChange::signed_out();

    assert_eq!(change.event, AuthChangeEvent::SignedOut);
    assert!(change.user_id().is_none());
}
