use std::sync::Arc;

use tracing::instrument;

use crate::{
    application::{
        pagination::{ListPolicy, Page, RawListParams},
        ports::UserRepository,
    },
    domain::{DomainError, EntityId, User},
    error::DeskResult,
};

/// Read-only access to the user mirror.
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    #[instrument(skip_all)]
    pub async fn list(&self, raw: &RawListParams) -> DeskResult<Page<User>> {
        let params = raw.resolve(ListPolicy::USERS)?;
        self.users.list(&params).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> DeskResult<User> {
        let id = EntityId::parse(id)?;
        self.users.find_by_id(&id).await?.ok_or_else(|| {
            DomainError::NotFound {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }
}
