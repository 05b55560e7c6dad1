//! Shopping history: saved snapshots of past lists.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::item_entry::{ItemEntry, ResolvedEntry};
use super::merge::Mergeable;
use super::{GroceryItem, GroceryItemId, ShoppingListId, StoredTimestamp};

/// Snapshot of one list row at the time the history entry was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    /// Id of the list row the snapshot was taken from.
    pub id: GroceryItemId,
    /// Product name.
    pub name: String,
    /// Amount in `unit`.
    pub quantity: f64,
    /// Unit.
    pub unit: String,
    /// Bought flag at save time.
    #[serde(default)]
    pub checked: bool,
}

impl From<ResolvedEntry> for ShoppingListItem {
    fn from(entry: ResolvedEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.fields.name,
            quantity: entry.fields.quantity,
            unit: entry.fields.unit,
            checked: entry.checked,
        }
    }
}

impl From<&GroceryItem> for ShoppingListItem {
    fn from(item: &GroceryItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            checked: item.checked,
        }
    }
}

impl Mergeable for ShoppingListItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn unit(&self) -> &str {
        &self.unit
    }

    fn quantity(&self) -> f64 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
    }

    fn checked(&self) -> Option<bool> {
        Some(self.checked)
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

/// A history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    /// Identifier.
    pub id: ShoppingListId,
    /// Save time in stored format.
    pub created_at: StoredTimestamp,
    /// Snapshots in list order.
    pub items: Vec<ShoppingListItem>,
}

/// History payload with unresolved entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingListDraft {
    /// Requested save time; omitted on updates to keep the stored value.
    pub created_at: Option<StoredTimestamp>,
    /// Entries to resolve.
    pub entries: Vec<ItemEntry>,
}
