use crate::{Role, SignUpDetails};

#[test]
fn test_metadata_defaults_role_to_customer() {
    let details = SignUpDetails {
        full_name: Some("Sam".to_string()),
        ..SignUpDetails::default()
    };

    let metadata = details.metadata();

    assert_eq!(metadata.role, Role::Customer);
    assert_eq!(metadata.full_name.as_deref(), Some("Sam"));
    assert!(metadata.phone.is_none());
}

#[test]
fn test_metadata_keeps_explicit_role() {
    let details = SignUpDetails {
        role: Some(Role::Staff),
        ..SignUpDetails::default()
    };

    assert_eq!(details.metadata().role, Role::Staff);
}
