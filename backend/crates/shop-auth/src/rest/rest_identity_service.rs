use crate::{
    AuthError, AuthErrorResult, AuthResponse, EVENT_CHANNEL_CAPACITY, IdentityService,
    SessionFile,
};

use shop_config::IdentityConfig;
use shop_core::{
    AuthChangeEvent, AuthStateChange, AuthUser, ProfileUpdate, Session, SignUpMetadata, User,
};

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

const AUTH_PATH: &str = "/auth/v1";
const REST_PATH: &str = "/rest/v1";
const SINGLE_OBJECT_ACCEPT: &str = "application/vnd.pgrst.object+json";

/// Identity service client speaking the hosted auth (`/auth/v1`) and
/// row-store (`/rest/v1`) HTTP APIs.
///
/// Holds the current session in memory, optionally mirrored to a
/// [`SessionFile`], and broadcasts every change of it.
pub struct RestIdentityService {
    base_url: String,
    anon_key: String,
    profile_table: String,
    admin_rpc: String,
    client: ReqwestClient,
    session: RwLock<Option<Session>>,
    session_file: Option<SessionFile>,
    events: broadcast::Sender<AuthStateChange>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a SignUpMetadata,
}

#[derive(Serialize)]
struct AdminRpcArgs {
    user_uuid: Uuid,
}

impl RestIdentityService {
    /// Create a client for the service at `base_url`
    /// (e.g. "https://project.example.co").
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> AuthErrorResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            profile_table: String::from("profiles"),
            admin_rpc: String::from("is_admin"),
            client,
            session: RwLock::new(None),
            session_file: None,
            events,
        })
    }

    /// Build from the `[identity]` section. Returns `Ok(None)` when the
    /// section lacks a url or key.
    pub fn from_config(
        config: &IdentityConfig,
        session_path: Option<PathBuf>,
    ) -> AuthErrorResult<Option<Self>> {
        let Some((url, anon_key)) = config.credentials() else {
            info!("Identity service not configured");
            return Ok(None);
        };

        let mut service = Self::new(url, anon_key, config.timeout())?
            .with_profile_table(&config.profile_table)
            .with_admin_rpc(&config.admin_rpc);

        if let Some(path) = session_path {
            service = service.with_session_file(SessionFile::new(path));
        }

        info!("Identity service at {}", service.base_url());
        Ok(Some(service))
    }

    pub fn with_profile_table(mut self, table: &str) -> Self {
        self.profile_table = table.to_string();
        self
    }

    pub fn with_admin_rpc(mut self, rpc: &str) -> Self {
        self.admin_rpc = rpc.to_string();
        self
    }

    /// Mirror the session to `file`, restoring whatever it already holds.
    pub fn with_session_file(mut self, file: SessionFile) -> Self {
        self.session = RwLock::new(file.load());
        self.session_file = Some(file);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header("apikey", &self.anon_key)
    }

    /// Row-store request authorized as the signed-in user, or anonymously
    /// when there is no session.
    async fn rest_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let token = self
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.anon_key.clone());

        self.request(method, &format!("{}{}", REST_PATH, path))
            .bearer_auth(token)
    }

    /// Send and read the body as JSON. An empty body reads as `Null`.
    async fn execute(&self, req: reqwest::RequestBuilder) -> AuthErrorResult<(StatusCode, Value)> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                // Error pages are not always JSON
                Err(_) if !status.is_success() => Value::String(text),
                Err(e) => return Err(AuthError::from_json(e)),
            }
        };

        Ok((status, body))
    }

    /// Like [`Self::execute`], but a client error (4xx) from the auth API is
    /// reported as a credential error carrying the remote message verbatim.
    async fn execute_auth(&self, req: reqwest::RequestBuilder) -> AuthErrorResult<Value> {
        let (status, body) = self.execute(req).await?;

        if status.is_client_error() {
            return Err(AuthError::credential(error_message(&body, status)));
        }
        if !status.is_success() {
            return Err(AuthError::api(status.as_u16(), error_message(&body, status)));
        }

        Ok(body)
    }

    async fn execute_rest(&self, req: reqwest::RequestBuilder) -> AuthErrorResult<Value> {
        let (status, body) = self.execute(req).await?;

        if !status.is_success() {
            return Err(AuthError::api(status.as_u16(), error_message(&body, status)));
        }

        Ok(body)
    }

    // =========================================================================
    // Session bookkeeping
    // =========================================================================

    async fn store_session(&self, mut session: Session, event: AuthChangeEvent) -> Session {
        session.stamp_expiry(Utc::now());

        if let Some(ref file) = self.session_file
            && let Err(e) = file.save(&session)
        {
            warn!("Failed to persist session: {}", e);
        }

        *self.session.write().await = Some(session.clone());
        self.emit(AuthStateChange::new(event, Some(session.clone())));
        session
    }

    async fn clear_session(&self) -> Option<Session> {
        let previous = self.session.write().await.take();

        if let Some(ref file) = self.session_file
            && let Err(e) = file.clear()
        {
            warn!("Failed to remove session file: {}", e);
        }

        self.emit(AuthStateChange::signed_out());
        previous
    }

    fn emit(&self, change: AuthStateChange) {
        debug!("Emitting auth state change {}", change.event);
        if self.events.send(change).is_err() {
            debug!("No auth state listeners");
        }
    }

    /// Exchange the refresh token for a new session.
    ///
    /// A failed refresh ends the session: it is cleared locally and
    /// `SignedOut` is emitted before the error is returned.
    async fn refresh_session(&self, refresh_token: &str) -> AuthErrorResult<Session> {
        debug!("Refreshing expired session");

        let req = self
            .request(
                Method::POST,
                &format!("{}/token?grant_type=refresh_token", AUTH_PATH),
            )
            .json(&RefreshGrant { refresh_token });

        let refreshed = match self.execute_auth(req).await {
            Ok(body) => serde_json::from_value::<Session>(body).map_err(AuthError::from_json),
            Err(e) => Err(e),
        };

        match refreshed {
            Ok(session) => {
                info!("Session refreshed for {}", session.user.id);
                Ok(self
                    .store_session(session, AuthChangeEvent::TokenRefreshed)
                    .await)
            }
            Err(e) => {
                warn!("Session refresh failed: {}", e);
                self.clear_session().await;
                Err(e)
            }
        }
    }
}

#[async_trait]
impl IdentityService for RestIdentityService {
    async fn get_session(&self) -> AuthErrorResult<Option<Session>> {
        let current = self.session.read().await.clone();

        let Some(session) = current else {
            return Ok(None);
        };

        if !session.is_expired() {
            return Ok(Some(session));
        }

        match session.refresh_token {
            Some(ref refresh_token) => self.refresh_session(refresh_token).await.map(Some),
            None => {
                info!("Session expired without a refresh token");
                self.clear_session().await;
                Ok(None)
            }
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthErrorResult<AuthResponse> {
        let req = self
            .request(
                Method::POST,
                &format!("{}/token?grant_type=password", AUTH_PATH),
            )
            .json(&PasswordGrant { email, password });

        let body = self.execute_auth(req).await?;
        let session: Session = serde_json::from_value(body)?;
        let session = self.store_session(session, AuthChangeEvent::SignedIn).await;

        Ok(AuthResponse {
            user: Some(session.user.clone()),
            session: Some(session),
        })
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &SignUpMetadata,
    ) -> AuthErrorResult<AuthResponse> {
        let req = self
            .request(Method::POST, &format!("{}/signup", AUTH_PATH))
            .json(&SignUpRequest {
                email,
                password,
                data: metadata,
            });

        let body = self.execute_auth(req).await?;

        // Auto-confirming services answer with a full session, others with
        // the bare user. Either way the session is not kept.
        if body.get("access_token").is_some() {
            let session: Session = serde_json::from_value(body)?;
            return Ok(AuthResponse {
                user: Some(session.user.clone()),
                session: Some(session),
            });
        }

        let user_value = body.get("user").cloned().unwrap_or(body);
        let user = if user_value.get("id").is_some() {
            Some(serde_json::from_value::<AuthUser>(user_value)?)
        } else {
            None
        };

        Ok(AuthResponse {
            user,
            session: None,
        })
    }

    async fn sign_out(&self) -> AuthErrorResult<()> {
        let Some(session) = self.clear_session().await else {
            debug!("Sign out without a session");
            return Ok(());
        };

        let req = self
            .request(Method::POST, &format!("{}/logout", AUTH_PATH))
            .bearer_auth(&session.access_token);

        let (status, body) = self.execute(req).await?;
        if !status.is_success() {
            return Err(AuthError::api(status.as_u16(), error_message(&body, status)));
        }

        Ok(())
    }

    fn on_auth_state_change(&self) -> broadcast::Receiver<AuthStateChange> {
        self.events.subscribe()
    }

    async fn is_admin(&self, user_id: Uuid) -> AuthErrorResult<bool> {
        let req = self
            .rest_request(Method::POST, &format!("/rpc/{}", self.admin_rpc))
            .await
            .json(&AdminRpcArgs { user_uuid: user_id });

        let body = self.execute_rest(req).await?;

        body.as_bool().ok_or_else(|| {
            AuthError::missing_data(format!("{} returned a non-boolean result", self.admin_rpc))
        })
    }

    async fn fetch_profile(&self, user_id: Uuid) -> AuthErrorResult<User> {
        let req = self
            .rest_request(
                Method::GET,
                &format!("/{}?id=eq.{}&select=*", self.profile_table, user_id),
            )
            .await
            .header("Accept", SINGLE_OBJECT_ACCEPT);

        let body = self.execute_rest(req).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn fetch_role(&self, user_id: Uuid) -> AuthErrorResult<Option<String>> {
        let req = self
            .rest_request(
                Method::GET,
                &format!("/{}?id=eq.{}&select=role", self.profile_table, user_id),
            )
            .await
            .header("Accept", SINGLE_OBJECT_ACCEPT);

        let body = self.execute_rest(req).await?;
        Ok(body.get("role").and_then(Value::as_str).map(str::to_string))
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AuthErrorResult<()> {
        let req = self
            .rest_request(
                Method::PATCH,
                &format!("/{}?id=eq.{}", self.profile_table, user_id),
            )
            .await
            .header("Prefer", "return=minimal")
            .json(update);

        self.execute_rest(req).await?;
        Ok(())
    }
}

/// Pull the human-readable message out of an auth or row-store error body.
fn error_message(body: &Value, status: StatusCode) -> String {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .or_else(|| body.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}
