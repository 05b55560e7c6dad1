//! Template service: snapshots list rows into reusable templates.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::item_entry::resolve_entries;
use crate::domain::ports::{
    GroceryItemRepository, TemplateRepository, TemplateRepositoryError, TemplatesCommand,
    TemplatesQuery,
};
use crate::domain::{Error, Template, TemplateDetail, TemplateDraft, TemplateId, TemplateItem};

/// Template service implementing the template driving ports.
///
/// The grocery item repository is only read, to resolve bare references in
/// incoming payloads.
#[derive(Clone)]
pub struct TemplateService<T, G> {
    templates: Arc<T>,
    items: Arc<G>,
}

impl<T, G> TemplateService<T, G> {
    /// Create a service over the template and grocery item repositories.
    pub const fn new(templates: Arc<T>, items: Arc<G>) -> Self {
        Self { templates, items }
    }
}

pub(crate) fn map_template_error(error: TemplateRepositoryError) -> Error {
    match error {
        TemplateRepositoryError::Connection { message } => {
            Error::internal(format!("template repository unavailable: {message}"))
        }
        TemplateRepositoryError::Query { message } => {
            Error::internal(format!("template repository error: {message}"))
        }
    }
}

pub(crate) fn template_not_found(id: TemplateId) -> Error {
    Error::not_found(format!("template {id} not found"))
}

impl<T, G> TemplateService<T, G>
where
    G: GroceryItemRepository,
{
    async fn build(&self, id: TemplateId, draft: TemplateDraft) -> Result<Template, Error> {
        let (name, created_at, entries) = draft.into_parts();
        let resolved = resolve_entries(self.items.as_ref(), entries).await?;
        Ok(Template {
            id,
            name,
            created_at,
            items: resolved.into_iter().map(TemplateItem::from).collect(),
        })
    }
}

#[async_trait]
impl<T, G> TemplatesCommand for TemplateService<T, G>
where
    T: TemplateRepository,
    G: GroceryItemRepository,
{
    async fn create(&self, draft: TemplateDraft) -> Result<Template, Error> {
        let template = self.build(TemplateId::random(), draft).await?;
        self.templates
            .insert(&template)
            .await
            .map_err(map_template_error)?;
        debug!(
            template_id = %template.id,
            items = template.items.len(),
            "template created"
        );
        Ok(template)
    }

    async fn update(&self, id: TemplateId, draft: TemplateDraft) -> Result<Template, Error> {
        let template = self.build(id, draft).await?;
        let found = self
            .templates
            .update(&template)
            .await
            .map_err(map_template_error)?;
        if !found {
            return Err(template_not_found(id));
        }
        Ok(template)
    }

    async fn delete(&self, id: TemplateId) -> Result<(), Error> {
        let found = self
            .templates
            .delete(&id)
            .await
            .map_err(map_template_error)?;
        if found {
            Ok(())
        } else {
            Err(template_not_found(id))
        }
    }
}

#[async_trait]
impl<T, G> TemplatesQuery for TemplateService<T, G>
where
    T: TemplateRepository,
    G: GroceryItemRepository,
{
    async fn list(&self) -> Result<Vec<Template>, Error> {
        self.templates.list().await.map_err(map_template_error)
    }

    async fn detail(&self, id: TemplateId) -> Result<TemplateDetail, Error> {
        self.templates
            .find(&id)
            .await
            .map_err(map_template_error)?
            .map(TemplateDetail::from)
            .ok_or_else(|| template_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockGroceryItemRepository, MockTemplateRepository};
    use crate::domain::{
        ErrorCode, GroceryItem, GroceryItemId, ItemEntry, ItemFields, SnapshotEntry,
        StoredTimestamp,
    };

    type Service = TemplateService<MockTemplateRepository, MockGroceryItemRepository>;

    fn make_service(
        templates: MockTemplateRepository,
        items: MockGroceryItemRepository,
    ) -> Service {
        TemplateService::new(Arc::new(templates), Arc::new(items))
    }

    fn snapshot(name: &str, quantity: f64) -> ItemEntry {
        ItemEntry::Snapshot(SnapshotEntry {
            id: None,
            fields: ItemFields::try_new(name, quantity, "kg").expect("valid fields"),
            checked: None,
        })
    }

    #[tokio::test]
    async fn create_snapshots_referenced_rows() {
        let stored = GroceryItem::new(GroceryItemId::random(), "Pommes", 2.0, "kg", true);
        let stored_id = stored.id;
        let mut items = MockGroceryItemRepository::new();
        items
            .expect_find_many()
            .times(1)
            .return_once(move |_| Ok(vec![stored]));
        let mut templates = MockTemplateRepository::new();
        templates
            .expect_insert()
            .withf(move |template| {
                template.items.len() == 2
                    && template.items.first().map(|item| item.id) == Some(stored_id)
            })
            .times(1)
            .return_once(|_| Ok(()));

        let draft = TemplateDraft::try_new(
            "Semaine",
            StoredTimestamp::now(),
            vec![ItemEntry::Reference(stored_id.to_string()), snapshot("Farine", 1.0)],
        )
        .expect("valid draft");
        let template = make_service(templates, items)
            .create(draft)
            .await
            .expect("create succeeds");

        assert_eq!(template.name, "Semaine");
        assert_eq!(template.items[0].name, "Pommes");
        assert_eq!(template.items[1].name, "Farine");
    }

    #[tokio::test]
    async fn create_with_missing_reference_writes_nothing() {
        let mut items = MockGroceryItemRepository::new();
        items.expect_find_many().times(1).return_once(|_| Ok(Vec::new()));
        let mut templates = MockTemplateRepository::new();
        templates.expect_insert().never();

        let missing = GroceryItemId::random();
        let draft = TemplateDraft::try_new(
            "Semaine",
            StoredTimestamp::now(),
            vec![ItemEntry::Reference(missing.to_string())],
        )
        .expect("valid draft");
        let err = make_service(templates, items)
            .create(draft)
            .await
            .expect_err("missing reference rejected");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["missingIds"], serde_json::json!([missing.to_string()]));
    }

    #[tokio::test]
    async fn detail_reports_merged_groups() {
        let template = Template {
            id: TemplateId::random(),
            name: "Semaine".to_owned(),
            created_at: StoredTimestamp::now(),
            items: vec![
                TemplateItem {
                    id: GroceryItemId::random(),
                    name: "Lait".to_owned(),
                    quantity: 1.0,
                    unit: "l".to_owned(),
                },
                TemplateItem {
                    id: GroceryItemId::random(),
                    name: "lait ".to_owned(),
                    quantity: 2.0,
                    unit: "L".to_owned(),
                },
            ],
        };
        let id = template.id;
        let mut templates = MockTemplateRepository::new();
        templates
            .expect_find()
            .times(1)
            .return_once(move |_| Ok(Some(template)));

        let detail = make_service(templates, MockGroceryItemRepository::new())
            .detail(id)
            .await
            .expect("detail");
        assert_eq!(detail.item_count, 1);
        assert_eq!(detail.merged_items[0].quantity, 3.0);
    }

    #[tokio::test]
    async fn update_of_absent_template_is_not_found() {
        let mut templates = MockTemplateRepository::new();
        templates.expect_update().times(1).return_once(|_| Ok(false));

        let draft = TemplateDraft::try_new("Semaine", StoredTimestamp::now(), Vec::new())
            .expect("valid draft");
        let err = make_service(templates, MockGroceryItemRepository::new())
            .update(TemplateId::random(), draft)
            .await
            .expect_err("absent template");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
