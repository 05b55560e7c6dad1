//! Driving port for changes to the current grocery list.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, GroceryItem, GroceryItemDraft, GroceryItemId};

/// Result of the single-item add path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccumulateOutcome {
    /// Row as stored after the add.
    pub item: GroceryItem,
    /// `true` when a new row was inserted, `false` when an existing row
    /// absorbed the quantity.
    pub created: bool,
}

/// Driving port for list mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroceryItemsCommand: Send + Sync {
    /// Insert a new row under a server-generated id.
    async fn create(&self, draft: GroceryItemDraft) -> Result<GroceryItem, Error>;

    /// Replace every field of an existing row.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when `id` is absent.
    async fn update(&self, id: GroceryItemId, draft: GroceryItemDraft)
    -> Result<GroceryItem, Error>;

    /// Delete one row.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when `id` is absent.
    async fn delete(&self, id: GroceryItemId) -> Result<(), Error>;

    /// Delete every listed row atomically and report how many existed.
    async fn delete_many(&self, ids: Vec<GroceryItemId>) -> Result<usize, Error>;

    /// Add with accumulation: grow the row with the same identity key or
    /// insert a new one.
    async fn accumulate(&self, draft: GroceryItemDraft) -> Result<AccumulateOutcome, Error>;
}
