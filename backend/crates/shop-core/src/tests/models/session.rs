use crate::{AuthUser, Session};

use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn session(expires_at: Option<i64>) -> Session {
    Session {
        access_token: "access-token".to_string(),
        refresh_token: Some("refresh-token".to_string()),
        token_type: "bearer".to_string(),
        expires_in: Some(3600),
        expires_at,
        user: AuthUser {
            id: Uuid::new_v4(),
            email: Some("admin@shop.test".to_string()),
        },
    }
}

#[test]
fn test_session_without_expiry_never_expires() {
    let session = session(None);
    assert!(!session.is_expired());
}

#[test]
fn test_session_expired_within_leeway() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let session = session(Some(now.timestamp() + 10));

    assert!(session.is_expired_at(now));
}

#[test]
fn test_session_valid_outside_leeway() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let session = session(Some(now.timestamp() + 3600));

    assert!(!session.is_expired_at(now));
    assert_eq!(session.expires_at().unwrap().timestamp(), now.timestamp() + 3600);
}

#[test]
fn test_stamp_expiry_fills_from_expires_in() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut session = session(None);

    session.stamp_expiry(now);

    assert_eq!(session.expires_at, Some(now.timestamp() + 3600));
}

#[test]
fn test_stamp_expiry_keeps_existing_value() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut session = session(Some(42));

    session.stamp_expiry(now);

    assert_eq!(session.expires_at, Some(42));
}

#[test]
fn test_session_debug_redacts_tokens() {
    let rendered = format!("{:?}", session(None));

    assert!(!rendered.contains("access-token"));
    assert!(!rendered.contains("refresh-token"));
    assert!(rendered.contains("<redacted>"));
}
