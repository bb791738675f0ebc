use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// One entry of the ordered admin-check strategy list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminCheckKind {
    /// Privileged server-side predicate call
    Rpc,
    /// Read `role` from the profile record
    ProfileRole,
}

impl AdminCheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rpc => "rpc",
            Self::ProfileRole => "profile_role",
        }
    }

    pub fn default_order() -> Vec<Self> {
        vec![Self::Rpc, Self::ProfileRole]
    }
}

impl fmt::Display for AdminCheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminCheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rpc" => Ok(Self::Rpc),
            "profile_role" => Ok(Self::ProfileRole),
            other => Err(format!("unknown admin check '{other}'")),
        }
    }
}
