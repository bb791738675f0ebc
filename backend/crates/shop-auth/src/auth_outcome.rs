use crate::AuthErrorResult;

/// What the presentation layer gets back from a facade operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl AuthOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed<S: Into<String>>(error: S) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

impl From<AuthErrorResult<()>> for AuthOutcome {
    fn from(result: AuthErrorResult<()>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::failed(e.user_message()),
        }
    }
}
