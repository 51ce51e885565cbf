//! Shared request state.

use std::sync::Arc;

use sqlx::SqlitePool;

use eventdesk_adapters::{
    SqliteCategoryRepository, SqliteEventRepository, SqliteTagRepository, SqliteUserRepository,
};
use eventdesk_core::prelude::*;

/// Everything a handler can reach. Cheap to clone; built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<EventService>,
    pub tags: Arc<TagService>,
    pub categories: Arc<CategoryService>,
    pub users: Arc<UserService>,
    pub registry: Arc<AdminRegistry>,
    pub sessions: Arc<dyn SessionVerifier>,
}

impl AppState {
    /// Wire services over the given ports.
    pub fn new(
        events: Arc<dyn EventRepository>,
        categories: Arc<dyn LabelRepository<CategoryKind>>,
        tags: Arc<dyn LabelRepository<TagKind>>,
        users: Arc<dyn UserRepository>,
        registry: AdminRegistry,
        sessions: Arc<dyn SessionVerifier>,
    ) -> Self {
        Self {
            events: Arc::new(EventService::new(
                events,
                Arc::clone(&categories),
                Arc::clone(&tags),
                Arc::clone(&users),
            )),
            tags: Arc::new(TagService::new(tags)),
            categories: Arc::new(CategoryService::new(categories)),
            users: Arc::new(UserService::new(users)),
            registry: Arc::new(registry),
            sessions,
        }
    }

    /// Wire services over SQLite repositories sharing `pool`.
    pub fn sqlite(
        pool: SqlitePool,
        registry: AdminRegistry,
        sessions: Arc<dyn SessionVerifier>,
    ) -> Self {
        Self::new(
            Arc::new(SqliteEventRepository::new(pool.clone())),
            Arc::new(SqliteCategoryRepository::new(pool.clone())),
            Arc::new(SqliteTagRepository::new(pool.clone())),
            Arc::new(SqliteUserRepository::new(pool)),
            registry,
            sessions,
        )
    }
}
