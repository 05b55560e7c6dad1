//! Driving port for shopping history reads.

use async_trait::async_trait;

use crate::domain::{Error, ShoppingList, ShoppingListId};

/// Driving port for reading history entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListsQuery: Send + Sync {
    /// Every entry, newest first.
    async fn list(&self) -> Result<Vec<ShoppingList>, Error>;

    /// One entry.
    async fn find(&self, id: ShoppingListId) -> Result<ShoppingList, Error>;
}
