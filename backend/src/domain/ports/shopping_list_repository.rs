//! Port for shopping history persistence.

use async_trait::async_trait;

use crate::domain::{ShoppingList, ShoppingListId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by shopping history adapters.
    pub enum ShoppingListRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "shopping list repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "shopping list repository query failed: {message}",
    }
}

/// Port for history entries and their item snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// Every entry, newest first.
    async fn list(&self) -> Result<Vec<ShoppingList>, ShoppingListRepositoryError>;

    /// One entry, if it exists.
    async fn find(
        &self,
        id: &ShoppingListId,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError>;

    /// Store a new entry and its items atomically.
    async fn insert(&self, list: &ShoppingList) -> Result<(), ShoppingListRepositoryError>;

    /// Replace an entry and its items. Returns `false` when absent.
    async fn update(&self, list: &ShoppingList) -> Result<bool, ShoppingListRepositoryError>;

    /// Remove an entry and its items. Returns `false` when absent.
    async fn delete(&self, id: &ShoppingListId) -> Result<bool, ShoppingListRepositoryError>;
}
