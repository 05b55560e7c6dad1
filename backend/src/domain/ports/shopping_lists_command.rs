//! Driving port for shopping history changes.

use async_trait::async_trait;

use crate::domain::{Error, ShoppingList, ShoppingListDraft, ShoppingListId};

/// Driving port for writing history entries directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListsCommand: Send + Sync {
    /// Store a new entry; references are resolved to snapshots.
    async fn create(&self, draft: ShoppingListDraft) -> Result<ShoppingList, Error>;

    /// Replace an entry and its items.
    async fn update(
        &self,
        id: ShoppingListId,
        draft: ShoppingListDraft,
    ) -> Result<ShoppingList, Error>;

    /// Remove an entry.
    async fn delete(&self, id: ShoppingListId) -> Result<(), Error>;
}
