//! Tag and category use cases, one generic service per label kind.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::{
    application::{
        dto::{CreateLabel, UpdateLabel, non_blank},
        pagination::{ListPolicy, Page, RawListParams},
        ports::LabelRepository,
    },
    domain::{EntityId, Label, LabelKind, LabelPatch},
    error::DeskResult,
};

pub struct LabelService<K: LabelKind> {
    repo: Arc<dyn LabelRepository<K>>,
}

pub type TagService = LabelService<crate::domain::TagKind>;
pub type CategoryService = LabelService<crate::domain::CategoryKind>;

impl<K: LabelKind> LabelService<K> {
    pub fn new(repo: Arc<dyn LabelRepository<K>>) -> Self {
        Self { repo }
    }

    #[instrument(skip_all, fields(kind = K::KEY))]
    pub async fn list(&self, raw: &RawListParams) -> DeskResult<Page<Label<K>>> {
        let params = raw.resolve(ListPolicy::LABELS)?;
        self.repo.list(&params).await
    }

    #[instrument(skip(self), fields(kind = K::KEY))]
    pub async fn get(&self, id: &str) -> DeskResult<Label<K>> {
        let id = EntityId::parse(id)?;
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Label::<K>::not_found(&id).into())
    }

    #[instrument(skip_all, fields(kind = K::KEY, name = %input.name))]
    pub async fn create(&self, input: CreateLabel) -> DeskResult<Label<K>> {
        let label = Label::<K>::create(input.name, non_blank(input.description), Utc::now());
        self.repo.insert(&label).await?;
        info!(id = %label.id, "{} created", K::ENTITY);
        Ok(label)
    }

    #[instrument(skip(self, input), fields(kind = K::KEY))]
    pub async fn update(&self, id: &str, input: UpdateLabel) -> DeskResult<Label<K>> {
        let current = self.get(id).await?;
        let next = current.apply(
            LabelPatch {
                name: input.name,
                description: input.description.map(non_blank),
            },
            Utc::now(),
        );
        if !self.repo.update(&next).await? {
            return Err(Label::<K>::not_found(&next.id).into());
        }
        info!(id = %next.id, "{} updated", K::ENTITY);
        Ok(next)
    }

    #[instrument(skip(self), fields(kind = K::KEY))]
    pub async fn delete(&self, id: &str) -> DeskResult<()> {
        let id = EntityId::parse(id)?;
        if !self.repo.delete(&id).await? {
            return Err(Label::<K>::not_found(&id).into());
        }
        info!(%id, "{} deleted", K::ENTITY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::MockLabelRepository;
    use crate::domain::{CategoryKind, DomainError, TagKind};
    use crate::error::DeskError;
    use serde_json::json;

    #[tokio::test]
    async fn create_drops_blank_description() {
        let mut repo = MockLabelRepository::<TagKind>::new();
        repo.expect_insert()
            .withf(|label| label.name == "rust" && label.description.is_none())
            .times(1)
            .returning(|_| Ok(()));
        let service = TagService::new(Arc::new(repo));
        let input =
            CreateLabel::from_payload::<TagKind>(&json!({"name": "rust", "description": " "}))
                .unwrap();
        let tag = service.create(input).await.unwrap();
        assert_eq!(tag.name, "rust");
    }

    #[tokio::test]
    async fn update_keeps_unsupplied_fields() {
        let existing = Label::<CategoryKind>::create("Music", Some("Live".into()), Utc::now());
        let id = existing.id.to_string();
        let mut repo = MockLabelRepository::<CategoryKind>::new();
        repo.expect_find_by_id()
            .return_once(move |_| Ok(Some(existing)));
        repo.expect_update().times(1).returning(|_| Ok(true));

        let service = CategoryService::new(Arc::new(repo));
        let updated = service
            .update(
                &id,
                UpdateLabel {
                    name: Some("Concerts".into()),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Concerts");
        assert_eq!(updated.description.as_deref(), Some("Live"));
    }

    #[tokio::test]
    async fn get_missing_is_not_found_with_kind() {
        let mut repo = MockLabelRepository::<CategoryKind>::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        let err = CategoryService::new(Arc::new(repo)).get("c1").await.unwrap_err();
        assert!(matches!(
            err,
            DeskError::Domain(DomainError::NotFound { entity: "Category", .. })
        ));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let mut repo = MockLabelRepository::<TagKind>::new();
        repo.expect_delete().returning(|_| Ok(false));
        assert!(TagService::new(Arc::new(repo)).delete("t1").await.is_err());
    }
}
