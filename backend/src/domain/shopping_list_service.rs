//! Shopping history service implementing the history driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::item_entry::resolve_entries;
use crate::domain::ports::{
    GroceryItemRepository, ShoppingListRepository, ShoppingListRepositoryError,
    ShoppingListsCommand, ShoppingListsQuery,
};
use crate::domain::{
    Error, ShoppingList, ShoppingListDraft, ShoppingListId, ShoppingListItem, StoredTimestamp,
};

/// History service over the shopping list and grocery item repositories.
#[derive(Clone)]
pub struct ShoppingListService<S, G> {
    lists: Arc<S>,
    items: Arc<G>,
}

impl<S, G> ShoppingListService<S, G> {
    /// Create a service over the history and grocery item repositories.
    pub const fn new(lists: Arc<S>, items: Arc<G>) -> Self {
        Self { lists, items }
    }
}

pub(crate) fn map_shopping_list_error(error: ShoppingListRepositoryError) -> Error {
    match error {
        ShoppingListRepositoryError::Connection { message } => {
            Error::internal(format!("shopping list repository unavailable: {message}"))
        }
        ShoppingListRepositoryError::Query { message } => {
            Error::internal(format!("shopping list repository error: {message}"))
        }
    }
}

pub(crate) fn shopping_list_not_found(id: ShoppingListId) -> Error {
    Error::not_found(format!("shopping list {id} not found"))
}

impl<S, G> ShoppingListService<S, G>
where
    S: ShoppingListRepository,
    G: GroceryItemRepository,
{
    async fn fetch(&self, id: ShoppingListId) -> Result<ShoppingList, Error> {
        self.lists
            .find(&id)
            .await
            .map_err(map_shopping_list_error)?
            .ok_or_else(|| shopping_list_not_found(id))
    }

    async fn build(
        &self,
        id: ShoppingListId,
        created_at: StoredTimestamp,
        draft: ShoppingListDraft,
    ) -> Result<ShoppingList, Error> {
        let resolved = resolve_entries(self.items.as_ref(), draft.entries).await?;
        Ok(ShoppingList {
            id,
            created_at,
            items: resolved.into_iter().map(ShoppingListItem::from).collect(),
        })
    }
}

#[async_trait]
impl<S, G> ShoppingListsCommand for ShoppingListService<S, G>
where
    S: ShoppingListRepository,
    G: GroceryItemRepository,
{
    async fn create(&self, draft: ShoppingListDraft) -> Result<ShoppingList, Error> {
        let created_at = draft.created_at.unwrap_or_else(StoredTimestamp::now);
        let list = self
            .build(ShoppingListId::random(), created_at, draft)
            .await?;
        self.lists
            .insert(&list)
            .await
            .map_err(map_shopping_list_error)?;
        debug!(list_id = %list.id, items = list.items.len(), "history entry created");
        Ok(list)
    }

    async fn update(
        &self,
        id: ShoppingListId,
        draft: ShoppingListDraft,
    ) -> Result<ShoppingList, Error> {
        let created_at = match draft.created_at {
            Some(created_at) => created_at,
            None => self.fetch(id).await?.created_at,
        };
        let list = self.build(id, created_at, draft).await?;
        let found = self
            .lists
            .update(&list)
            .await
            .map_err(map_shopping_list_error)?;
        if !found {
            return Err(shopping_list_not_found(id));
        }
        Ok(list)
    }

    async fn delete(&self, id: ShoppingListId) -> Result<(), Error> {
        let found = self
            .lists
            .delete(&id)
            .await
            .map_err(map_shopping_list_error)?;
        if found {
            Ok(())
        } else {
            Err(shopping_list_not_found(id))
        }
    }
}

#[async_trait]
impl<S, G> ShoppingListsQuery for ShoppingListService<S, G>
where
    S: ShoppingListRepository,
    G: GroceryItemRepository,
{
    async fn list(&self) -> Result<Vec<ShoppingList>, Error> {
        self.lists.list().await.map_err(map_shopping_list_error)
    }

    async fn find(&self, id: ShoppingListId) -> Result<ShoppingList, Error> {
        self.fetch(id).await
    }
}
