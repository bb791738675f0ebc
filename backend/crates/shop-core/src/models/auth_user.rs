use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity-level user carried by a session. Unknown fields from the
/// identity service are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}
