use crate::{
    ACCESS_DENIED_MESSAGE, NOT_AUTHENTICATED_MESSAGE, NOT_CONFIGURED_MESSAGE,
};

use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Identity service not configured {location}")]
    NotConfigured { location: ErrorLocation },

    #[error("No active session {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("User is not an admin {location}")]
    AccessDenied { location: ErrorLocation },

    #[error("Credential error: {message} {location}")]
    Credential {
        message: String,
        location: ErrorLocation,
    },

    #[error("API error: {message} (status: {status}) {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Admin check failed: {message} {location}")]
    AdminCheck {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unexpected response: {message} {location}")]
    MissingData {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session file error at {path}: {source} {location}")]
    SessionFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn not_configured() -> Self {
        AuthError::NotConfigured {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_authenticated() -> Self {
        AuthError::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn access_denied() -> Self {
        AuthError::AccessDenied {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn credential<S: Into<String>>(message: S) -> Self {
        AuthError::Credential {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        AuthError::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn admin_check<S: Into<String>>(message: S) -> Self {
        AuthError::AdminCheck {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_data<S: Into<String>>(message: S) -> Self {
        AuthError::MissingData {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn session_file(path: PathBuf, source: std::io::Error) -> Self {
        AuthError::SessionFile {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        AuthError::Http {
            message: err.to_string(),
            source: err,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        AuthError::Json {
            message: err.to_string(),
            source: err,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Single-line text for the login screen. Never includes the source
    /// location; remote messages are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured { .. } => NOT_CONFIGURED_MESSAGE.to_string(),
            Self::NotAuthenticated { .. } => NOT_AUTHENTICATED_MESSAGE.to_string(),
            Self::AccessDenied { .. } => ACCESS_DENIED_MESSAGE.to_string(),
            Self::Credential { message, .. }
            | Self::Api { message, .. }
            | Self::Http { message, .. }
            | Self::Json { message, .. }
            | Self::AdminCheck { message, .. }
            | Self::MissingData { message, .. } => first_line(message),
            Self::SessionFile { source, .. } => first_line(&source.to_string()),
        }
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().trim().to_string()
}

impl From<reqwest::Error> for AuthError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        AuthError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for AuthError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        AuthError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
