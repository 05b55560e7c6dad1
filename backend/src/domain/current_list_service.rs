//! Actions that rebuild the current list from templates, recipes and
//! history entries.
//!
//! Every list rewrite goes through a single atomic repository call
//! (`replace_all` or `apply_changes`), so a failure leaves the list as it
//! was. Rows created here are always unchecked and uncategorised.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::grocery_item_service::map_grocery_item_error;
use crate::domain::merge::{Mergeable, merge_by_identity, plan_append};
use crate::domain::ports::{
    CurrentListCommand, GroceryItemRepository, RecipeRepository, ShoppingListRepository,
    TemplateRepository,
};
use crate::domain::recipe_service::{map_recipe_error, recipe_not_found};
use crate::domain::shopping_list_service::{map_shopping_list_error, shopping_list_not_found};
use crate::domain::template_service::{map_template_error, template_not_found};
use crate::domain::{
    ApplyMode, Error, GroceryItem, GroceryItemId, RecipeId, ShoppingList, ShoppingListId,
    ShoppingListItem, StoredTimestamp, TemplateId,
};

/// Service implementing [`CurrentListCommand`] over all four repositories.
#[derive(Clone)]
pub struct CurrentListService<G, T, R, S> {
    items: Arc<G>,
    templates: Arc<T>,
    recipes: Arc<R>,
    lists: Arc<S>,
}

impl<G, T, R, S> CurrentListService<G, T, R, S> {
    /// Create a service over the grocery item, template, recipe and history
    /// repositories.
    pub const fn new(items: Arc<G>, templates: Arc<T>, recipes: Arc<R>, lists: Arc<S>) -> Self {
        Self {
            items,
            templates,
            recipes,
            lists,
        }
    }
}

fn fresh_row<M: Mergeable>(entry: &M) -> GroceryItem {
    GroceryItem::new(
        GroceryItemId::random(),
        entry.name(),
        entry.quantity(),
        entry.unit(),
        false,
    )
}

impl<G, T, R, S> CurrentListService<G, T, R, S>
where
    G: GroceryItemRepository,
{
    async fn current(&self) -> Result<Vec<GroceryItem>, Error> {
        self.items.list().await.map_err(map_grocery_item_error)
    }

    async fn replace_with<M: Mergeable + Send>(
        &self,
        entries: Vec<M>,
    ) -> Result<Vec<GroceryItem>, Error> {
        let rows: Vec<GroceryItem> = merge_by_identity(entries).iter().map(fresh_row).collect();
        self.items
            .replace_all(&rows)
            .await
            .map_err(map_grocery_item_error)?;
        Ok(rows)
    }

    async fn append<M: Mergeable + Send>(
        &self,
        entries: Vec<M>,
    ) -> Result<Vec<GroceryItem>, Error> {
        let current = self.current().await?;
        let plan = plan_append(&current, entries);
        if plan.is_empty() {
            return Ok(current);
        }
        let inserts: Vec<GroceryItem> = plan.inserts.iter().map(fresh_row).collect();
        debug!(
            updated = plan.updates.len(),
            inserted = inserts.len(),
            "appending onto current list"
        );
        self.items
            .apply_changes(&plan.updates, &inserts)
            .await
            .map_err(map_grocery_item_error)?;
        self.current().await
    }
}

#[async_trait]
impl<G, T, R, S> CurrentListCommand for CurrentListService<G, T, R, S>
where
    G: GroceryItemRepository,
    T: TemplateRepository,
    R: RecipeRepository,
    S: ShoppingListRepository,
{
    async fn apply_template(
        &self,
        id: TemplateId,
        mode: ApplyMode,
    ) -> Result<Vec<GroceryItem>, Error> {
        let template = self
            .templates
            .find(&id)
            .await
            .map_err(map_template_error)?
            .ok_or_else(|| template_not_found(id))?;
        info!(template_id = %id, ?mode, "loading template onto current list");
        match mode {
            ApplyMode::Replace => self.replace_with(template.items).await,
            ApplyMode::Append => self.append(template.items).await,
        }
    }

    async fn add_recipe(&self, id: RecipeId) -> Result<Vec<GroceryItem>, Error> {
        let recipe = self
            .recipes
            .find(&id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| recipe_not_found(id))?;
        info!(recipe_id = %id, "adding recipe ingredients to current list");
        self.append(recipe.ingredients).await
    }

    async fn restore(&self, id: ShoppingListId) -> Result<Vec<GroceryItem>, Error> {
        let entry = self
            .lists
            .find(&id)
            .await
            .map_err(map_shopping_list_error)?
            .ok_or_else(|| shopping_list_not_found(id))?;
        info!(list_id = %id, "restoring history entry onto current list");
        self.replace_with(entry.items).await
    }

    async fn archive(&self, clear: bool) -> Result<ShoppingList, Error> {
        let current = self.current().await?;
        if current.is_empty() {
            return Err(Error::invalid_request(
                "cannot archive an empty grocery list",
            ));
        }
        let entry = ShoppingList {
            id: ShoppingListId::random(),
            created_at: StoredTimestamp::now(),
            items: current.iter().map(ShoppingListItem::from).collect(),
        };
        self.lists
            .insert(&entry)
            .await
            .map_err(map_shopping_list_error)?;

        if clear {
            let ids: Vec<GroceryItemId> = current.iter().map(|item| item.id).collect();
            self.items
                .delete_many(&ids)
                .await
                .map_err(map_grocery_item_error)?;
        }
        info!(list_id = %entry.id, items = entry.items.len(), clear, "current list archived");
        Ok(entry)
    }
}

#[cfg(test)]
#[path = "current_list_service_tests.rs"]
mod tests;
