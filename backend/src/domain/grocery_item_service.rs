//! Grocery list service implementing the item command and query ports.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::merge::{Accumulation, accumulate_into, merge_by_identity};
use crate::domain::ports::{
    AccumulateOutcome, GroceryItemRepository, GroceryItemRepositoryError, GroceryItemsCommand,
    GroceryItemsQuery, ItemLookup,
};
use crate::domain::{Error, GroceryItem, GroceryItemDraft, GroceryItemId, ShoppingSummary};

/// Grocery list service backed by a [`GroceryItemRepository`].
#[derive(Clone)]
pub struct GroceryItemService<R> {
    repo: Arc<R>,
}

impl<R> GroceryItemService<R> {
    /// Create a service over `repo`.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

pub(crate) fn map_grocery_item_error(error: GroceryItemRepositoryError) -> Error {
    match error {
        GroceryItemRepositoryError::Connection { message } => {
            Error::internal(format!("grocery item repository unavailable: {message}"))
        }
        GroceryItemRepositoryError::Query { message } => {
            Error::internal(format!("grocery item repository error: {message}"))
        }
    }
}

fn item_not_found(id: GroceryItemId) -> Error {
    Error::not_found(format!("grocery item {id} not found"))
}

#[async_trait]
impl<R> GroceryItemsCommand for GroceryItemService<R>
where
    R: GroceryItemRepository,
{
    async fn create(&self, draft: GroceryItemDraft) -> Result<GroceryItem, Error> {
        let item = draft.into_item(GroceryItemId::random());
        self.repo
            .insert(&item)
            .await
            .map_err(map_grocery_item_error)?;
        debug!(item_id = %item.id, "grocery item created");
        Ok(item)
    }

    async fn update(
        &self,
        id: GroceryItemId,
        draft: GroceryItemDraft,
    ) -> Result<GroceryItem, Error> {
        let item = draft.into_item(id);
        let found = self
            .repo
            .update(&item)
            .await
            .map_err(map_grocery_item_error)?;
        if !found {
            return Err(item_not_found(id));
        }
        Ok(item)
    }

    async fn delete(&self, id: GroceryItemId) -> Result<(), Error> {
        let found = self
            .repo
            .delete(&id)
            .await
            .map_err(map_grocery_item_error)?;
        if found {
            Ok(())
        } else {
            Err(item_not_found(id))
        }
    }

    async fn delete_many(&self, ids: Vec<GroceryItemId>) -> Result<usize, Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let deleted = self
            .repo
            .delete_many(&ids)
            .await
            .map_err(map_grocery_item_error)?;
        debug!(requested = ids.len(), deleted, "grocery items bulk-deleted");
        Ok(deleted)
    }

    async fn accumulate(&self, draft: GroceryItemDraft) -> Result<AccumulateOutcome, Error> {
        let current = self.repo.list().await.map_err(map_grocery_item_error)?;
        match accumulate_into(&current, draft) {
            Accumulation::Updated(item) => {
                let found = self
                    .repo
                    .update(&item)
                    .await
                    .map_err(map_grocery_item_error)?;
                if !found {
                    return Err(item_not_found(item.id));
                }
                Ok(AccumulateOutcome {
                    item,
                    created: false,
                })
            }
            Accumulation::Inserted(draft) => {
                let item = self.create(draft).await?;
                Ok(AccumulateOutcome {
                    item,
                    created: true,
                })
            }
        }
    }
}

#[async_trait]
impl<R> GroceryItemsQuery for GroceryItemService<R>
where
    R: GroceryItemRepository,
{
    async fn list(&self) -> Result<Vec<GroceryItem>, Error> {
        self.repo.list().await.map_err(map_grocery_item_error)
    }

    async fn lookup(&self, ids: Vec<String>) -> Result<ItemLookup, Error> {
        let parsed: Vec<Option<GroceryItemId>> =
            ids.iter().map(|raw| raw.parse().ok()).collect();
        let wanted: Vec<GroceryItemId> = parsed.iter().flatten().copied().collect();
        let found: HashMap<GroceryItemId, GroceryItem> = if wanted.is_empty() {
            HashMap::new()
        } else {
            self.repo
                .find_many(&wanted)
                .await
                .map_err(map_grocery_item_error)?
                .into_iter()
                .map(|item| (item.id, item))
                .collect()
        };

        let mut lookup = ItemLookup {
            items: Vec::new(),
            missing_ids: Vec::new(),
        };
        for (raw, id) in ids.into_iter().zip(parsed) {
            match id.and_then(|id| found.get(&id)) {
                Some(item) => lookup.items.push(item.clone()),
                None => lookup.missing_ids.push(raw),
            }
        }
        Ok(lookup)
    }

    async fn merged(&self) -> Result<Vec<GroceryItem>, Error> {
        let items = self.repo.list().await.map_err(map_grocery_item_error)?;
        Ok(merge_by_identity(items))
    }

    async fn summary(&self) -> Result<ShoppingSummary, Error> {
        let items = self.repo.list().await.map_err(map_grocery_item_error)?;
        Ok(ShoppingSummary::from_items(&items))
    }
}

#[cfg(test)]
#[path = "grocery_item_service_tests.rs"]
mod tests;
