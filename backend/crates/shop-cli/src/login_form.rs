//! Admin login screen, minus the pixels.
//!
//! Holds the entered credentials, validates presence, drives
//! [`AuthFacade::sign_in`] and reports the status line a user sees while
//! that happens. A successful login yields a [`Redirect`].

use shop_auth::{AuthFacade, AuthOutcome};
use shop_config::UiConfig;

use std::time::Duration;

use log::{error, info};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const SIGNING_IN_MESSAGE: &str = "Signing in...";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful! Redirecting...";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

const MASK_CHAR: char = '•';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl LoginStatus {
    pub fn from_outcome(outcome: &AuthOutcome) -> Self {
        if outcome.success {
            LoginStatus::Succeeded
        } else {
            LoginStatus::Failed(
                outcome
                    .error
                    .clone()
                    .unwrap_or_else(|| String::from(LOGIN_FAILED_MESSAGE)),
            )
        }
    }

    /// The single status line shown under the form.
    pub fn message(&self) -> Option<&str> {
        match self {
            LoginStatus::Idle => None,
            LoginStatus::Submitting => Some(SIGNING_IN_MESSAGE),
            LoginStatus::Succeeded => Some(LOGIN_SUCCESS_MESSAGE),
            LoginStatus::Failed(message) => Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoginStatus::Failed(_))
    }
}

/// Where to go after a successful login, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub delay: Duration,
}

impl Redirect {
    pub async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

pub struct LoginForm {
    email: String,
    password: String,
    show_password: bool,
    status: LoginStatus,
    redirect_path: String,
    redirect_delay: Duration,
}

impl LoginForm {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            show_password: false,
            status: LoginStatus::Idle,
            redirect_path: ui.redirect_path.clone(),
            redirect_delay: ui.redirect_delay(),
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Flip password visibility; returns the new state.
    pub fn toggle_password_visibility(&mut self) -> bool {
        self.show_password = !self.show_password;
        self.show_password
    }

    /// The password as the field renders it.
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            std::iter::repeat_n(MASK_CHAR, self.password.chars().count()).collect()
        }
    }

    pub fn status(&self) -> &LoginStatus {
        &self.status
    }

    /// Both fields must be non-empty. Whitespace counts as content.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(MISSING_FIELDS_MESSAGE);
        }
        Ok(())
    }

    /// Submit the form. `on_status` sees every status the form passes
    /// through, in order.
    pub async fn submit(
        &mut self,
        facade: &AuthFacade,
        mut on_status: impl FnMut(&LoginStatus),
    ) -> Option<Redirect> {
        info!("Admin login attempt starting");

        if let Err(message) = self.validate() {
            self.set_status(LoginStatus::Failed(message.to_string()), &mut on_status);
            return None;
        }

        self.set_status(LoginStatus::Submitting, &mut on_status);
        let outcome = facade.sign_in(&self.email, &self.password).await;
        self.set_status(LoginStatus::from_outcome(&outcome), &mut on_status);

        if outcome.success {
            info!("Admin login successful");
            Some(Redirect {
                path: self.redirect_path.clone(),
                delay: self.redirect_delay,
            })
        } else {
            error!("Admin login failed: {}", outcome.error.as_deref().unwrap_or("unknown"));
            None
        }
    }

    fn set_status(&mut self, status: LoginStatus, on_status: &mut impl FnMut(&LoginStatus)) {
        self.status = status;
        on_status(&self.status);
    }
}
