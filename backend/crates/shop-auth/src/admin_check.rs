//! Ordered admin-status strategies.
//!
//! Each [`AdminCheck`] either decides (`admin` or not) or reports that it
//! could not answer. [`AdminCheckChain`] asks them in order and takes the
//! first decision; if nobody can answer, the account is treated as
//! non-admin and the last lookup error is reported.

use crate::IdentityService;

use shop_config::AdminCheckKind;
use shop_core::Role;

use async_trait::async_trait;
use log::{debug, warn};
use uuid::Uuid;

/// Answer of a single strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Decided(bool),
    /// The strategy could not produce an answer; carries the lookup error
    Unavailable(String),
}

#[async_trait]
pub trait AdminCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self, service: &dyn IdentityService, user_id: Uuid) -> CheckOutcome;
}

/// Privileged server-side predicate
pub struct RpcAdminCheck;

#[async_trait]
impl AdminCheck for RpcAdminCheck {
    fn name(&self) -> &'static str {
        "rpc"
    }

    async fn check(&self, service: &dyn IdentityService, user_id: Uuid) -> CheckOutcome {
        match service.is_admin(user_id).await {
            Ok(is_admin) => CheckOutcome::Decided(is_admin),
            Err(e) => CheckOutcome::Unavailable(e.user_message()),
        }
    }
}

/// Reads the raw `role` column; anything but `admin` (null included) is a
/// decided `false`.
pub struct ProfileRoleAdminCheck;

#[async_trait]
impl AdminCheck for ProfileRoleAdminCheck {
    fn name(&self) -> &'static str {
        "profile_role"
    }

    async fn check(&self, service: &dyn IdentityService, user_id: Uuid) -> CheckOutcome {
        match service.fetch_role(user_id).await {
            Ok(role) => CheckOutcome::Decided(role.as_deref() == Some(Role::Admin.as_str())),
            Err(e) => CheckOutcome::Unavailable(e.user_message()),
        }
    }
}

/// Final verdict of the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDecision {
    pub is_admin: bool,
    /// Set only when no strategy could answer
    pub error: Option<String>,
}

pub struct AdminCheckChain {
    checks: Vec<Box<dyn AdminCheck>>,
}

impl AdminCheckChain {
    pub fn new(checks: Vec<Box<dyn AdminCheck>>) -> Self {
        Self { checks }
    }

    /// Predicate first, profile role as fallback
    pub fn standard() -> Self {
        Self::from_kinds(&AdminCheckKind::default_order())
    }

    pub fn from_kinds(kinds: &[AdminCheckKind]) -> Self {
        let checks = kinds
            .iter()
            .map(|kind| -> Box<dyn AdminCheck> {
                match kind {
                    AdminCheckKind::Rpc => Box::new(RpcAdminCheck),
                    AdminCheckKind::ProfileRole => Box::new(ProfileRoleAdminCheck),
                }
            })
            .collect();
        Self::new(checks)
    }

    pub fn push(&mut self, check: Box<dyn AdminCheck>) {
        self.checks.push(check);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub async fn decide(&self, service: &dyn IdentityService, user_id: Uuid) -> AdminDecision {
        let mut last_error = None;

        for check in &self.checks {
            match check.check(service, user_id).await {
                CheckOutcome::Decided(is_admin) => {
                    debug!(
                        "Admin check '{}' decided {} for {}",
                        check.name(),
                        is_admin,
                        user_id
                    );
                    return AdminDecision {
                        is_admin,
                        error: None,
                    };
                }
                CheckOutcome::Unavailable(message) => {
                    warn!(
                        "Admin check '{}' failed for {}, trying next strategy: {}",
                        check.name(),
                        user_id,
                        message
                    );
                    last_error = Some(message);
                }
            }
        }

        AdminDecision {
            is_admin: false,
            error: Some(last_error.unwrap_or_else(|| String::from("Admin check failed"))),
        }
    }
}

impl Default for AdminCheckChain {
    fn default() -> Self {
        Self::standard()
    }
}
