use crate::{ProfileUpdate, Role};

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// The locally held view of the signed-in account, built from its profile
/// record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default_role")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Merge the fields present in `update` into this user.
    ///
    /// Fields left as `None` in the update are untouched. No attempt is made
    /// to reconcile with what the server actually stored.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(ref email) = update.email {
            self.email = email.clone();
        }
        if let Some(ref full_name) = update.full_name {
            self.full_name = Some(full_name.clone());
        }
        if let Some(ref phone) = update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(ref avatar_url) = update.avatar_url {
            self.avatar_url = Some(avatar_url.clone());
        }
    }
}

/// A profile row may carry `role: null`; read it as the default role.
fn null_as_default_role<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Role>::deserialize(deserializer)?.unwrap_or_default())
}
