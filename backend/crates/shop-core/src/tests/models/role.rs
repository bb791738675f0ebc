use crate::Role;

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Customer.as_str(), "customer");
    assert_eq!(Role::Admin.as_str(), "admin");
    assert_eq!(Role::Staff.as_str(), "staff");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("staff").unwrap(), Role::Staff);
    assert_eq!(Role::from_str("customer").unwrap(), Role::Customer);
    assert!(Role::from_str("Admin").is_err());
    assert!(Role::from_str("superuser").is_err());
}

#[test]
fn test_role_default_is_customer() {
    assert_eq!(Role::default(), Role::Customer);
}

#[test]
fn test_role_serde_uses_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    let role: Role = serde_json::from_str("\"staff\"").unwrap();
    assert_eq!(role, Role::Staff);
}
