use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, COOKIE};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use eventdesk_core::prelude::*;

/// Path of the auth service's session endpoint.
pub const SESSION_PATH: &str = "/api/auth/get-session";

/// Asks the external auth service who is behind a request.
///
/// The request's cookie and bearer token are forwarded as-is. The service
/// answers `{"user": {...}, "session": {...}}` for a live session and
/// `null` (or 401) otherwise.
#[derive(Debug, Clone)]
pub struct RemoteSessionVerifier {
    client: Client,
    auth_url: String,
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    user: SessionUser,
}

impl RemoteSessionVerifier {
    pub fn new(auth_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn session_url(&self) -> String {
        format!("{}{SESSION_PATH}", self.auth_url)
    }
}

fn lookup_failed(e: impl ToString) -> DeskError {
    ApplicationError::SessionLookup {
        reason: e.to_string(),
    }
    .into()
}

#[async_trait]
impl SessionVerifier for RemoteSessionVerifier {
    #[instrument(skip_all)]
    async fn verify(&self, credentials: &Credentials) -> DeskResult<Option<SessionUser>> {
        if credentials.is_empty() {
            return Ok(None);
        }

        let mut request = self.client.get(self.session_url());
        if let Some(cookie) = &credentials.cookie {
            request = request.header(COOKIE, cookie);
        }
        if let Some(token) = &credentials.bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(lookup_failed)?;
        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            debug!(status = status.as_u16(), "Auth service rejected credentials");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "Auth service answered with an error");
            return Err(lookup_failed(format!("auth service returned {status}")));
        }

        let body = response.text().await.map_err(lookup_failed)?;
        let payload: Option<SessionPayload> = serde_json::from_str(&body)
            .map_err(|e| lookup_failed(format!("unreadable session: {e}")))?;
        let user = payload.map(|p| p.user);
        debug!(authenticated = user.is_some(), "Session checked");
        Ok(user)
    }
}
