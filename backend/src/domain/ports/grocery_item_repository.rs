//! Port for persisting rows of the current grocery list.
//!
//! Multi-row writes (`delete_many`, `apply_changes`, `replace_all`) are atomic:
//! adapters either apply every change or none.

use async_trait::async_trait;

use crate::domain::{GroceryItem, GroceryItemId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by grocery item repository adapters.
    pub enum GroceryItemRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "grocery item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "grocery item repository query failed: {message}",
    }
}

/// Port for grocery list storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroceryItemRepository: Send + Sync {
    /// Every row, in insertion order.
    async fn list(&self) -> Result<Vec<GroceryItem>, GroceryItemRepositoryError>;

    /// Rows whose id is in `ids`. Unknown ids are skipped; order is
    /// unspecified.
    async fn find_many(
        &self,
        ids: &[GroceryItemId],
    ) -> Result<Vec<GroceryItem>, GroceryItemRepositoryError>;

    /// Append a new row.
    async fn insert(&self, item: &GroceryItem) -> Result<(), GroceryItemRepositoryError>;

    /// Overwrite the row with the same id. Returns `false` when it is absent.
    async fn update(&self, item: &GroceryItem) -> Result<bool, GroceryItemRepositoryError>;

    /// Remove one row. Returns `false` when it is absent.
    async fn delete(&self, id: &GroceryItemId) -> Result<bool, GroceryItemRepositoryError>;

    /// Remove every listed row and report how many existed.
    async fn delete_many(&self, ids: &[GroceryItemId])
    -> Result<usize, GroceryItemRepositoryError>;

    /// Overwrite `updates` and append `inserts` in one atomic step.
    async fn apply_changes(
        &self,
        updates: &[GroceryItem],
        inserts: &[GroceryItem],
    ) -> Result<(), GroceryItemRepositoryError>;

    /// Replace the whole list with `items` in one atomic step.
    async fn replace_all(&self, items: &[GroceryItem]) -> Result<(), GroceryItemRepositoryError>;
}
