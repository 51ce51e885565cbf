use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

/// An account known to the auth service, mirrored locally so events can
/// reference their creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    pub image: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}
