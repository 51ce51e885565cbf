//! Event use cases.
//!
//! Coerces request payloads (text dates to UTC), checks that referenced
//! categories and tags exist, enforces the date-range rule and delegates
//! storage to the `EventRepository` port.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::{
    application::{
        dto::{CreateEvent, UpdateEvent, non_blank},
        pagination::{ListPolicy, Page, RawListParams},
        ports::{EventRepository, LabelRepository, UserRepository},
        session::SessionUser,
    },
    domain::{
        Category, CategoryKind, DomainError, EntityId, Event, EventPatch, EventRecord, FieldErrors,
        NewEvent, Tag, TagKind, parse_datetime,
    },
    error::DeskResult,
};

pub struct EventService {
    events: Arc<dyn EventRepository>,
    categories: Arc<dyn LabelRepository<CategoryKind>>,
    tags: Arc<dyn LabelRepository<TagKind>>,
    users: Arc<dyn UserRepository>,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        categories: Arc<dyn LabelRepository<CategoryKind>>,
        tags: Arc<dyn LabelRepository<TagKind>>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            events,
            categories,
            tags,
            users,
        }
    }

    #[instrument(skip_all)]
    pub async fn list(&self, raw: &RawListParams) -> DeskResult<Page<EventRecord>> {
        let params = raw.resolve(ListPolicy::EVENTS)?;
        self.events.list(&params).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> DeskResult<EventRecord> {
        let id = EntityId::parse(id)?;
        self.events
            .find_by_id(&id)
            .await?
            .ok_or_else(|| not_found(&id))
    }

    /// Create an event owned by `actor`.
    ///
    /// The actor is mirrored into the user table first so `creator_id`
    /// always satisfies its foreign key.
    #[instrument(skip_all, fields(actor = %actor.id, name = %input.name))]
    pub async fn create(&self, input: CreateEvent, actor: &SessionUser) -> DeskResult<EventRecord> {
        let now = Utc::now();
        let (start_date, end_date) = coerce_range(Some(&input.start_date), Some(&input.end_date))?;
        let (Some(start_date), Some(end_date)) = (start_date, end_date) else {
            return Err(DomainError::field("startDate", "Required").into());
        };

        let category = match &input.category_id {
            Some(id) => Some(self.require_category(id).await?),
            None => None,
        };
        let tags = self.require_tags(input.tags.unwrap_or_default()).await?;

        let event = Event::create(
            NewEvent {
                name: input.name,
                image: non_blank(input.image),
                start_date,
                end_date,
                location: input.location,
                description: non_blank(input.description),
                category_id: input.category_id,
            },
            actor.id.clone(),
            now,
        )?;

        self.users.upsert(&actor.to_user(now)).await?;
        let tag_ids: Vec<EntityId> = tags.iter().map(|t| t.id.clone()).collect();
        self.events.insert(&event, &tag_ids).await?;

        info!(event_id = %event.id, tags = tag_ids.len(), "Event created");
        Ok(EventRecord {
            event,
            category,
            tags,
        })
    }

    /// Apply a partial update. A `tags` array replaces the association.
    #[instrument(skip(self, input, actor), fields(actor = %actor.id))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateEvent,
        actor: &SessionUser,
    ) -> DeskResult<EventRecord> {
        let id = EntityId::parse(id)?;
        let current = self
            .events
            .find_by_id(&id)
            .await?
            .ok_or_else(|| not_found(&id))?;

        let (start_date, end_date) =
            coerce_range(input.start_date.as_ref(), input.end_date.as_ref())?;

        if let Some(Some(category_id)) = &input.category_id {
            self.require_category(category_id).await?;
        }
        let tag_ids = match input.tags {
            Some(ids) => Some(
                self.require_tags(ids)
                    .await?
                    .into_iter()
                    .map(|t| t.id)
                    .collect::<Vec<_>>(),
            ),
            None => None,
        };

        let patch = EventPatch {
            name: input.name,
            image: input.image.map(non_blank),
            start_date,
            end_date,
            location: input.location,
            description: input.description.map(non_blank),
            category_id: input.category_id,
        };
        let next = current.event.apply(patch, Utc::now())?;

        if !self.events.update(&next, tag_ids).await? {
            return Err(not_found(&id));
        }
        info!(event_id = %id, "Event updated");
        self.get(id.as_str()).await
    }

    #[instrument(skip(self, actor), fields(actor = %actor.id))]
    pub async fn delete(&self, id: &str, actor: &SessionUser) -> DeskResult<()> {
        let id = EntityId::parse(id)?;
        if !self.events.delete(&id).await? {
            return Err(not_found(&id));
        }
        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    async fn require_category(&self, id: &EntityId) -> DeskResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                DomainError::field("categoryId", format!("Unknown category: {id}")).into()
            })
    }

    /// Resolve tag ids, de-duplicated, in the order given.
    async fn require_tags(&self, ids: Vec<EntityId>) -> DeskResult<Vec<Tag>> {
        let mut unique: Vec<EntityId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let found = self.tags.find_many(&unique).await?;
        let mut errors = FieldErrors::new();
        let mut ordered = Vec::with_capacity(unique.len());
        for id in &unique {
            match found.iter().find(|t| &t.id == id) {
                Some(tag) => ordered.push(tag.clone()),
                None => errors.add("tags", format!("Unknown tag: {id}")),
            }
        }
        errors.into_result()?;
        Ok(ordered)
    }
}

fn not_found(id: &EntityId) -> crate::error::DeskError {
    DomainError::NotFound {
        entity: "Event",
        id: id.to_string(),
    }
    .into()
}

type Range = (Option<DateTime<Utc>>, Option<DateTime<Utc>>);

fn coerce_range(start: Option<&String>, end: Option<&String>) -> Result<Range, DomainError> {
    let mut errors = FieldErrors::new();
    let mut coerce = |field: &str, raw: Option<&String>| match raw {
        None => None,
        Some(text) => {
            let parsed = parse_datetime(text);
            if parsed.is_none() {
                errors.add(field, "Invalid date");
            }
            parsed
        }
    };
    let range = (coerce("startDate", start), coerce("endDate", end));
    errors.into_result()?;
    Ok(range)
}
