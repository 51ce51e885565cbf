use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::instrument;

use eventdesk_core::application::{ListParams, Page};
use eventdesk_core::prelude::*;

use super::query::{fold, push_page, push_search};
use super::rows::{USER_COLUMNS, UserRow};

/// The local user mirror. Rows are written whenever a verified session
/// creates or edits something. The auth service owns email uniqueness, so
/// the mirror keys on `id` alone.
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[instrument(skip_all, fields(user_id = %user.id))]
    async fn upsert(&self, user: &User) -> DeskResult<()> {
        sqlx::query(
            r#"INSERT INTO "user" (id, name, name_folded, email, email_verified, image, role,
                                   created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT (id) DO UPDATE SET
                   name = excluded.name,
                   name_folded = excluded.name_folded,
                   email = excluded.email,
                   email_verified = excluded.email_verified,
                   image = excluded.image,
                   role = excluded.role,
                   updated_at = excluded.updated_at"#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(fold(&user.name))
        .bind(&user.email)
        .bind(user.email_verified)
        .bind(user.image.as_deref())
        .bind(user.role.as_deref())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ApplicationError::repository("user.upsert", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> DeskResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!(r#"SELECT {USER_COLUMNS} FROM "user" WHERE id = ?"#))
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| ApplicationError::repository("user.find", e))?;
        row.map(UserRow::into_user).transpose()
    }

    async fn list(&self, params: &ListParams) -> DeskResult<Page<User>> {
        let mut count = QueryBuilder::<Sqlite>::new(r#"SELECT COUNT(*) FROM "user""#);
        push_search(&mut count, params);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("user.count", e))?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!(r#"SELECT {USER_COLUMNS} FROM "user""#));
        push_search(&mut qb, params);
        push_page(&mut qb, params);
        let rows: Vec<UserRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("user.list", e))?;

        let users = rows
            .into_iter()
            .map(UserRow::into_user)
            .collect::<DeskResult<Vec<_>>>()?;
        Ok(Page::for_params(users, total.max(0) as u64, params))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::sqlite::testing::memory_pool;

    fn ada(at: chrono::DateTime<Utc>) -> User {
        User {
            id: EntityId::parse("u1").unwrap(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            email_verified: false,
            image: None,
            role: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn upsert_refreshes_profile_but_keeps_created_at() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        let first = Utc::now() - Duration::days(30);
        repo.upsert(&ada(first)).await.unwrap();

        let later = Utc::now();
        let mut changed = ada(later);
        changed.name = "Ada Lovelace".into();
        changed.role = Some("admin".into());
        repo.upsert(&changed).await.unwrap();

        let stored = repo.find_by_id(&changed.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ada Lovelace");
        assert!(stored.is_admin());
        assert_eq!(stored.created_at, first);
        assert_eq!(stored.updated_at, later);
    }

    #[tokio::test]
    async fn shared_email_under_a_new_id_is_mirrored() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        repo.upsert(&ada(Utc::now())).await.unwrap();

        let mut relinked = ada(Utc::now());
        relinked.id = EntityId::parse("u2").unwrap();
        repo.upsert(&relinked).await.unwrap();

        assert!(repo.find_by_id(&relinked.id).await.unwrap().is_some());
        assert_eq!(repo.list(&ListParams::default()).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn list_searches_names() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        repo.upsert(&ada(Utc::now())).await.unwrap();
        let params = ListParams {
            search: Some("ad".into()),
            ..ListParams::default()
        };
        assert_eq!(repo.list(&params).await.unwrap().total, 1);
        let params = ListParams {
            search: Some("bob".into()),
            ..ListParams::default()
        };
        assert_eq!(repo.list(&params).await.unwrap().total, 0);
    }
}
