use crate::{ProfileUpdate, Role, User};

use serde_json::json;
use uuid::Uuid;

fn customer() -> User {
    User {
        id: Uuid::new_v4(),
        email: "user@shop.test".to_string(),
        full_name: Some("Pat Customer".to_string()),
        phone: None,
        role: Role::Customer,
        avatar_url: None,
    }
}

#[test]
fn test_user_is_admin_only_for_admin_role() {
    let mut user = customer();
    assert!(!user.is_admin());

    user.role = Role::Staff;
    assert!(!user.is_admin());

    user.role = Role::Admin;
    assert!(user.is_admin());
}

#[test]
fn test_user_apply_merges_only_present_fields() {
    let mut user = customer();
    let update = ProfileUpdate {
        phone: Some("+1 416 555 0100".to_string()),
        ..ProfileUpdate::default()
    };

    user.apply(&update);

    assert_eq!(user.phone.as_deref(), Some("+1 416 555 0100"));
    assert_eq!(user.full_name.as_deref(), Some("Pat Customer"));
    assert_eq!(user.email, "user@shop.test");
    assert_eq!(user.role, Role::Customer);
}

#[test]
fn test_user_apply_empty_update_is_noop() {
    let mut user = customer();
    let before = user.clone();

    user.apply(&ProfileUpdate::default());

    assert_eq!(user, before);
}

#[test]
fn test_user_deserializes_profile_row_with_extra_columns() {
    let id = Uuid::new_v4();
    let row = json!({
        "id": id,
        "email": "admin@shop.test",
        "full_name": null,
        "phone": "555",
        "role": "admin",
        "avatar_url": null,
        "created_at": "2024-01-01T00:00:00Z"
    });

    let user: User = serde_json::from_value(row).unwrap();

    assert_eq!(user.id, id);
    assert!(user.is_admin());
    assert_eq!(user.phone.as_deref(), Some("555"));
    assert!(user.full_name.is_none());
}

#[test]
fn test_user_missing_role_defaults_to_customer() {
    let row = json!({ "id": Uuid::new_v4(), "email": "x@shop.test" });

    let user: User = serde_json::from_value(row).unwrap();

    assert_eq!(user.role, Role::Customer);
}

#[test]
fn test_user_null_role_defaults_to_customer() {
    let row = json!({ "id": Uuid::new_v4(), "email": "x@shop.test", "role": null });

    let user: User = serde_json::from_value(row).unwrap();

    assert_eq!(user.role, Role::Customer);
}

#[test]
fn test_profile_update_serializes_only_set_fields() {
    let update = ProfileUpdate {
        full_name: Some("New Name".to_string()),
        role: Some(Role::Staff),
        ..ProfileUpdate::default()
    };

    let value = serde_json::to_value(&update).unwrap();

    assert_eq!(value, json!({ "full_name": "New Name", "role": "staff" }));
    assert!(!update.is_empty());
    assert!(ProfileUpdate::default().is_empty());
}
