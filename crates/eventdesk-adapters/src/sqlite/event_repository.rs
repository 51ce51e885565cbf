use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, instrument};

use eventdesk_core::application::{ListParams, Page};
use eventdesk_core::prelude::*;

use super::query::{fold, push_in_list, push_page, push_search};
use super::rows::{EVENT_COLUMNS, EventRow, EventTagRow, LABEL_COLUMNS, LabelRow};

/// Events in SQLite, with tag links in `event_tag`.
///
/// Writes run in a transaction so an event and its tag links are stored
/// together or not at all. Tag order is kept through `event_tag.position`.
#[derive(Debug, Clone)]
pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Attach category and tags to plain rows, keeping row order.
    async fn enrich(&self, rows: Vec<EventRow>) -> DeskResult<Vec<EventRecord>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let event_ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut category_ids: Vec<String> =
            rows.iter().filter_map(|r| r.category_id.clone()).collect();
        category_ids.sort();
        category_ids.dedup();

        let mut categories: HashMap<String, Category> = HashMap::new();
        if !category_ids.is_empty() {
            let mut qb = QueryBuilder::<Sqlite>::new(format!(
                "SELECT {LABEL_COLUMNS} FROM category WHERE id IN"
            ));
            push_in_list(&mut qb, &category_ids);
            let found: Vec<LabelRow> = qb
                .build_query_as()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| ApplicationError::repository("event.categories", e))?;
            for row in found {
                categories.insert(row.id.clone(), row.into_label()?);
            }
        }

        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT et.event_id, t.id, t.name, t.description, t.created_at, t.updated_at \
             FROM event_tag et JOIN tag t ON t.id = et.tag_id WHERE et.event_id IN",
        );
        push_in_list(&mut qb, &event_ids);
        qb.push(" ORDER BY et.position ASC");
        let links: Vec<EventTagRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("event.tags", e))?;

        let mut tags: HashMap<String, Vec<Tag>> = HashMap::new();
        for link in links {
            tags.entry(link.event_id).or_default().push(link.tag.into_label()?);
        }

        rows.into_iter()
            .map(|row| {
                let category = row
                    .category_id
                    .as_ref()
                    .and_then(|id| categories.get(id).cloned());
                let tags = tags.remove(&row.id).unwrap_or_default();
                Ok(EventRecord {
                    event: row.into_event()?,
                    category,
                    tags,
                })
            })
            .collect()
    }
}

async fn replace_tags(
    conn: &mut SqliteConnection,
    event_id: &EntityId,
    tag_ids: &[EntityId],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM event_tag WHERE event_id = ?")
        .bind(event_id.as_str())
        .execute(&mut *conn)
        .await?;

    let now = Utc::now();
    for (position, tag_id) in tag_ids.iter().enumerate() {
        sqlx::query(
            "INSERT INTO event_tag (id, event_id, tag_id, position, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(EntityId::generate().as_str())
        .bind(event_id.as_str())
        .bind(tag_id.as_str())
        .bind(position as i64)
        .bind(now)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    #[instrument(skip_all, fields(offset = params.offset, limit = params.limit))]
    async fn list(&self, params: &ListParams) -> DeskResult<Page<EventRecord>> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM event");
        push_search(&mut count, params);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("event.count", e))?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {EVENT_COLUMNS} FROM event"));
        push_search(&mut qb, params);
        push_page(&mut qb, params);
        let rows: Vec<EventRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("event.list", e))?;

        debug!(total, returned = rows.len(), "Listed events");
        let items = self.enrich(rows).await?;
        Ok(Page::for_params(items, total.max(0) as u64, params))
    }

    async fn find_by_id(&self, id: &EntityId) -> DeskResult<Option<EventRecord>> {
        let row: Option<EventRow> =
            sqlx::query_as(&format!("SELECT {EVENT_COLUMNS} FROM event WHERE id = ?"))
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| ApplicationError::repository("event.find", e))?;

        match row {
            Some(row) => Ok(self.enrich(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip_all, fields(event_id = %event.id, tags = tag_ids.len()))]
    async fn insert(&self, event: &Event, tag_ids: &[EntityId]) -> DeskResult<()> {
        let op = |e: sqlx::Error| ApplicationError::repository("event.insert", e);
        let mut tx = self.pool.begin().await.map_err(op)?;

        sqlx::query(
            "INSERT INTO event (id, name, name_folded, image, start_date, end_date, location, \
             description, category_id, creator_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(event.id.as_str())
        .bind(&event.name)
        .bind(fold(&event.name))
        .bind(event.image.as_deref())
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(&event.location)
        .bind(event.description.as_deref())
        .bind(event.category_id.as_ref().map(EntityId::as_str))
        .bind(event.creator_id.as_str())
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(op)?;

        replace_tags(&mut tx, &event.id, tag_ids).await.map_err(op)?;
        tx.commit().await.map_err(op)?;
        Ok(())
    }

    #[instrument(skip_all, fields(event_id = %event.id, replace_tags = tag_ids.is_some()))]
    async fn update(&self, event: &Event, tag_ids: Option<Vec<EntityId>>) -> DeskResult<bool> {
        let op = |e: sqlx::Error| ApplicationError::repository("event.update", e);
        let mut tx = self.pool.begin().await.map_err(op)?;

        let result = sqlx::query(
            "UPDATE event SET name = ?, name_folded = ?, image = ?, start_date = ?, end_date = ?, \
             location = ?, description = ?, category_id = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&event.name)
        .bind(fold(&event.name))
        .bind(event.image.as_deref())
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(&event.location)
        .bind(event.description.as_deref())
        .bind(event.category_id.as_ref().map(EntityId::as_str))
        .bind(event.updated_at)
        .bind(event.id.as_str())
        .execute(&mut *tx)
        .await
        .map_err(op)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }
        if let Some(tag_ids) = tag_ids {
            replace_tags(&mut tx, &event.id, &tag_ids).await.map_err(op)?;
        }
        tx.commit().await.map_err(op)?;
        Ok(true)
    }

    #[instrument(skip_all, fields(event_id = %id))]
    async fn delete(&self, id: &EntityId) -> DeskResult<bool> {
        let result = sqlx::query("DELETE FROM event WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::repository("event.delete", e))?;
        Ok(result.rows_affected() > 0)
    }
}
