//! Authenticated sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EntityId, User};

/// What a request presents to prove who it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Token from an `Authorization: Bearer` header.
    pub bearer: Option<String>,
    /// The raw `Cookie` header, forwarded untouched to the auth service.
    pub cookie: Option<String>,
}

impl Credentials {
    pub fn is_empty(&self) -> bool {
        self.bearer.is_none() && self.cookie.is_none()
    }
}

/// The user behind a verified session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl SessionUser {
    /// Local mirror row for this user.
    pub fn to_user(&self, now: DateTime<Utc>) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            email_verified: self.email_verified,
            image: self.image.clone(),
            role: self.role.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}
