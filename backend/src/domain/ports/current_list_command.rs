//! Driving port for actions that rebuild the current list from other
//! aggregates.
//!
//! Each action is applied to the list in one atomic repository call and
//! returns the list as it stands afterwards.

use async_trait::async_trait;

use crate::domain::{
    ApplyMode, Error, GroceryItem, RecipeId, ShoppingList, ShoppingListId, TemplateId,
};

/// Driving port for template loading, recipe addition and history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentListCommand: Send + Sync {
    /// Load a template onto the list in the given mode.
    async fn apply_template(
        &self,
        id: TemplateId,
        mode: ApplyMode,
    ) -> Result<Vec<GroceryItem>, Error>;

    /// Add a recipe's ingredients, merging and summing with existing rows.
    async fn add_recipe(&self, id: RecipeId) -> Result<Vec<GroceryItem>, Error>;

    /// Replace the list with a history entry's items, unchecked.
    async fn restore(&self, id: ShoppingListId) -> Result<Vec<GroceryItem>, Error>;

    /// Save the list as a history entry, optionally removing the archived
    /// rows from the list.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when the list is empty.
    async fn archive(&self, clear: bool) -> Result<ShoppingList, Error>;
}
