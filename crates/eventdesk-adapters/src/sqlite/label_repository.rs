use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

use eventdesk_core::application::{ListParams, Page};
use eventdesk_core::prelude::*;

use super::query::{fold, push_in_list, push_page, push_search};
use super::rows::{LABEL_COLUMNS, LabelRow};

/// Tags or categories in SQLite. The table comes from `K::TABLE`.
#[derive(Debug, Clone)]
pub struct SqliteLabelRepository<K: LabelKind> {
    pool: SqlitePool,
    _kind: PhantomData<K>,
}

pub type SqliteTagRepository = SqliteLabelRepository<TagKind>;
pub type SqliteCategoryRepository = SqliteLabelRepository<CategoryKind>;

impl<K: LabelKind> SqliteLabelRepository<K> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _kind: PhantomData,
        }
    }

    fn select() -> String {
        format!("SELECT {LABEL_COLUMNS} FROM {}", K::TABLE)
    }
}

fn rows_into<K: LabelKind>(rows: Vec<LabelRow>) -> DeskResult<Vec<Label<K>>> {
    rows.into_iter().map(LabelRow::into_label).collect()
}

#[async_trait]
impl<K: LabelKind> LabelRepository<K> for SqliteLabelRepository<K> {
    #[instrument(skip_all, fields(kind = K::KEY, offset = params.offset, limit = params.limit))]
    async fn list(&self, params: &ListParams) -> DeskResult<Page<Label<K>>> {
        let mut count = QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {}", K::TABLE));
        push_search(&mut count, params);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("label.count", e))?;

        let mut qb = QueryBuilder::<Sqlite>::new(Self::select());
        push_search(&mut qb, params);
        push_page(&mut qb, params);
        let rows: Vec<LabelRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("label.list", e))?;

        debug!(total, returned = rows.len(), "Listed labels");
        Ok(Page::for_params(rows_into(rows)?, total.max(0) as u64, params))
    }

    async fn find_by_id(&self, id: &EntityId) -> DeskResult<Option<Label<K>>> {
        let row: Option<LabelRow> = sqlx::query_as(&format!("{} WHERE id = ?", Self::select()))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("label.find", e))?;
        row.map(LabelRow::into_label).transpose()
    }

    async fn find_many(&self, ids: &[EntityId]) -> DeskResult<Vec<Label<K>>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let mut qb = QueryBuilder::<Sqlite>::new(format!("{} WHERE id IN", Self::select()));
        push_in_list(&mut qb, &ids);
        let rows: Vec<LabelRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("label.find_many", e))?;
        rows_into(rows)
    }

    #[instrument(skip_all, fields(kind = K::KEY, id = %label.id))]
    async fn insert(&self, label: &Label<K>) -> DeskResult<()> {
        sqlx::query(&format!(
            "INSERT INTO {} (id, name, name_folded, description, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
            K::TABLE
        ))
        .bind(label.id.as_str())
        .bind(&label.name)
        .bind(fold(&label.name))
        .bind(label.description.as_deref())
        .bind(label.created_at)
        .bind(label.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ApplicationError::repository("label.insert", e))?;
        Ok(())
    }

    #[instrument(skip_all, fields(kind = K::KEY, id = %label.id))]
    async fn update(&self, label: &Label<K>) -> DeskResult<bool> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET name = ?, name_folded = ?, description = ?, updated_at = ? \
             WHERE id = ?",
            K::TABLE
        ))
        .bind(&label.name)
        .bind(fold(&label.name))
        .bind(label.description.as_deref())
        .bind(label.updated_at)
        .bind(label.id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| ApplicationError::repository("label.update", e))?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip_all, fields(kind = K::KEY, id = %id))]
    async fn delete(&self, id: &EntityId) -> DeskResult<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", K::TABLE))
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("label.delete", e))?;
        Ok(result.rows_affected() > 0)
    }
}
