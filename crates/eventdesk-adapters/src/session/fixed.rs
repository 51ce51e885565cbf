use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use eventdesk_core::prelude::*;

/// Fixed bearer tokens mapped to users, for local runs and tests.
///
/// Cookies are ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionVerifier {
    tokens: Arc<RwLock<HashMap<String, SessionUser>>>,
}

fn poisoned() -> DeskError {
    ApplicationError::SessionLookup {
        reason: "token table lock poisoned".into(),
    }
    .into()
}

impl StaticSessionVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(self, token: impl Into<String>, user: SessionUser) -> DeskResult<Self> {
        self.insert(token, user)?;
        Ok(self)
    }

    pub fn insert(&self, token: impl Into<String>, user: SessionUser) -> DeskResult<()> {
        self.tokens
            .write()
            .map_err(|_| poisoned())?
            .insert(token.into(), user);
        Ok(())
    }

    pub fn revoke(&self, token: &str) -> DeskResult<bool> {
        Ok(self
            .tokens
            .write()
            .map_err(|_| poisoned())?
            .remove(token)
            .is_some())
    }

    pub fn len(&self) -> usize {
        self.tokens.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionVerifier for StaticSessionVerifier {
    async fn verify(&self, credentials: &Credentials) -> DeskResult<Option<SessionUser>> {
        let Some(token) = credentials.bearer.as_deref() else {
            return Ok(None);
        };
        let tokens = self.tokens.read().map_err(|_| poisoned())?;
        Ok(tokens.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> SessionUser {
        SessionUser {
            id: EntityId::parse("u1").unwrap(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            email_verified: true,
            image: None,
            role: Some("admin".into()),
        }
    }

    fn bearer(token: &str) -> Credentials {
        Credentials {
            bearer: Some(token.into()),
            cookie: None,
        }
    }

    #[tokio::test]
    async fn known_token_resolves() {
        let verifier = StaticSessionVerifier::new().with_token("secret", ada()).unwrap();
        assert_eq!(verifier.verify(&bearer("secret")).await.unwrap(), Some(ada()));
        assert_eq!(verifier.verify(&bearer("other")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn cookies_alone_are_not_enough() {
        let verifier = StaticSessionVerifier::new().with_token("secret", ada()).unwrap();
        let creds = Credentials {
            bearer: None,
            cookie: Some("session=secret".into()),
        };
        assert_eq!(verifier.verify(&creds).await.unwrap(), None);
    }

    #[tokio::test]
    async fn revoked_tokens_stop_working() {
        let verifier = StaticSessionVerifier::new().with_token("secret", ada()).unwrap();
        assert!(verifier.revoke("secret").unwrap());
        assert!(verifier.is_empty());
        assert_eq!(verifier.verify(&bearer("secret")).await.unwrap(), None);
    }
}
