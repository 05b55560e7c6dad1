//! Driving port for reads of the current grocery list.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, GroceryItem, ShoppingSummary};

/// Batch lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemLookup {
    /// Rows found, in request order.
    pub items: Vec<GroceryItem>,
    /// Requested identifiers that matched no row, as received.
    pub missing_ids: Vec<String>,
}

/// Driving port for list reads and derived views.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroceryItemsQuery: Send + Sync {
    /// Raw rows in insertion order.
    async fn list(&self) -> Result<Vec<GroceryItem>, Error>;

    /// Fetch several rows at once.
    async fn lookup(&self, ids: Vec<String>) -> Result<ItemLookup, Error>;

    /// Rows merged by identity.
    async fn merged(&self) -> Result<Vec<GroceryItem>, Error>;

    /// Export view split by bought state.
    async fn summary(&self) -> Result<ShoppingSummary, Error>;
}
