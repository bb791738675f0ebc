use crate::Role;

use serde::Serialize;

/// Optional display fields supplied when creating an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpDetails {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

/// User metadata attached to a sign-up request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SignUpMetadata {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
}

impl SignUpDetails {
    /// Build the metadata payload, defaulting the role to `customer`.
    pub fn metadata(&self) -> SignUpMetadata {
        SignUpMetadata {
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            role: self.role.unwrap_or_default(),
        }
    }
}
