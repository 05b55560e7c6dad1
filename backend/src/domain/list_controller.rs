//! Client-side application state and the actions that change it.
//!
//! [`ListController`] owns the only copy of the client's view of the
//! service. Each action makes one call (or a short, fixed sequence of
//! calls) through [`GroceryApi`] and applies the response. On failure the
//! error is logged and returned, and the state is left exactly as it was.

use futures_util::future::try_join4;
use tracing::warn;

use crate::domain::merge::merge_by_identity;
use crate::domain::ports::{
    GroceryApi, GroceryApiError, NewGroceryItem, NewTemplate, RecipePayload,
};
use crate::domain::{
    ApplyMode, GroceryItem, GroceryItemId, Recipe, RecipeId, ShoppingList, ShoppingListId,
    ShoppingSummary, StoredTimestamp, Template, TemplateId, TemplateItem,
};

/// Mirror of the service state held by the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Rows of the current list, unmerged, in service order.
    pub current_list: Vec<GroceryItem>,
    /// Saved templates.
    pub templates: Vec<Template>,
    /// Saved recipes.
    pub recipes: Vec<Recipe>,
    /// History entries, newest first.
    pub history: Vec<ShoppingList>,
}

/// Owner of [`AppState`]; the only place the client state is mutated.
#[derive(Debug)]
pub struct ListController<A> {
    api: A,
    state: AppState,
}

fn logged<T>(
    action: &'static str,
    result: Result<T, GroceryApiError>,
) -> Result<T, GroceryApiError> {
    if let Err(error) = &result {
        warn!(action, %error, "grocery API call failed");
    }
    result
}

fn upsert<T, K>(rows: &mut Vec<T>, row: T, key: impl Fn(&T) -> K)
where
    K: PartialEq,
{
    let wanted = key(&row);
    match rows.iter_mut().find(|existing| key(existing) == wanted) {
        Some(slot) => *slot = row,
        None => rows.push(row),
    }
}

impl<A> ListController<A>
where
    A: GroceryApi,
{
    /// Create a controller with empty state. Call [`Self::refresh`] to load.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: AppState::default(),
        }
    }

    /// Current state.
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Reload every collection from the service.
    pub async fn refresh(&mut self) -> Result<(), GroceryApiError> {
        let (current_list, templates, recipes, history) = logged(
            "refresh",
            try_join4(
                self.api.list_items(),
                self.api.list_templates(),
                self.api.list_recipes(),
                self.api.list_history(),
            )
            .await,
        )?;
        self.state = AppState {
            current_list,
            templates,
            recipes,
            history,
        };
        Ok(())
    }

    /// Add an item, accumulating onto a matching row when one exists.
    pub async fn add_item(
        &mut self,
        item: NewGroceryItem,
    ) -> Result<GroceryItem, GroceryApiError> {
        let stored = logged("add_item", self.api.accumulate_item(&item).await)?;
        upsert(&mut self.state.current_list, stored.clone(), |row| row.id);
        Ok(stored)
    }

    /// Replace a row.
    pub async fn update_item(
        &mut self,
        item: GroceryItem,
    ) -> Result<GroceryItem, GroceryApiError> {
        let stored = logged("update_item", self.api.update_item(&item).await)?;
        upsert(&mut self.state.current_list, stored.clone(), |row| row.id);
        Ok(stored)
    }

    /// Flip the bought flag of a row. Returns `None` for ids not in state.
    pub async fn toggle_item(
        &mut self,
        id: GroceryItemId,
    ) -> Result<Option<GroceryItem>, GroceryApiError> {
        let Some(row) = self.state.current_list.iter().find(|row| row.id == id) else {
            return Ok(None);
        };
        let mut toggled = row.clone();
        toggled.checked = !toggled.checked;
        self.update_item(toggled).await.map(Some)
    }

    /// Delete a row.
    pub async fn remove_item(&mut self, id: GroceryItemId) -> Result<(), GroceryApiError> {
        logged("remove_item", self.api.delete_item(id).await)?;
        self.state.current_list.retain(|row| row.id != id);
        Ok(())
    }

    /// Delete every row with one batch call. Returns the number deleted.
    pub async fn clear_list(&mut self) -> Result<usize, GroceryApiError> {
        if self.state.current_list.is_empty() {
            return Ok(0);
        }
        let ids: Vec<GroceryItemId> = self.state.current_list.iter().map(|row| row.id).collect();
        let deleted = logged("clear_list", self.api.delete_items(&ids).await)?;
        self.state.current_list.clear();
        Ok(deleted)
    }

    /// Save the current list as a template. Does nothing on an empty list.
    pub async fn save_as_template(
        &mut self,
        name: &str,
    ) -> Result<Option<Template>, GroceryApiError> {
        if self.state.current_list.is_empty() {
            return Ok(None);
        }
        let request = NewTemplate {
            name: name.to_owned(),
            created_at: StoredTimestamp::now(),
            items: self.state.current_list.iter().map(|row| row.id).collect(),
        };
        let template = logged("save_as_template", self.api.create_template(&request).await)?;
        self.state.templates.push(template.clone());
        Ok(Some(template))
    }

    /// Delete a template.
    pub async fn delete_template(&mut self, id: TemplateId) -> Result<(), GroceryApiError> {
        logged("delete_template", self.api.delete_template(id).await)?;
        self.state.templates.retain(|template| template.id != id);
        Ok(())
    }

    /// Load a template onto the current list.
    pub async fn load_template(
        &mut self,
        id: TemplateId,
        mode: ApplyMode,
    ) -> Result<(), GroceryApiError> {
        self.state.current_list =
            logged("load_template", self.api.apply_template(id, mode).await)?;
        Ok(())
    }

    /// Create a recipe, stamped with the current time unless the payload
    /// carries a creation time.
    pub async fn add_recipe(
        &mut self,
        mut recipe: RecipePayload,
    ) -> Result<Recipe, GroceryApiError> {
        recipe.created_at.get_or_insert_with(StoredTimestamp::now);
        let stored = logged("add_recipe", self.api.create_recipe(&recipe).await)?;
        self.state.recipes.push(stored.clone());
        Ok(stored)
    }

    /// Replace a recipe.
    pub async fn update_recipe(
        &mut self,
        id: RecipeId,
        recipe: RecipePayload,
    ) -> Result<Recipe, GroceryApiError> {
        let stored = logged("update_recipe", self.api.update_recipe(id, &recipe).await)?;
        upsert(&mut self.state.recipes, stored.clone(), |recipe| recipe.id);
        Ok(stored)
    }

    /// Delete a recipe.
    pub async fn delete_recipe(&mut self, id: RecipeId) -> Result<(), GroceryApiError> {
        logged("delete_recipe", self.api.delete_recipe(id).await)?;
        self.state.recipes.retain(|recipe| recipe.id != id);
        Ok(())
    }

    /// Add a recipe's ingredients to the current list.
    pub async fn add_recipe_to_list(&mut self, id: RecipeId) -> Result<(), GroceryApiError> {
        self.state.current_list =
            logged("add_recipe_to_list", self.api.add_recipe_to_list(id).await)?;
        Ok(())
    }

    /// Archive the current list as a history entry, optionally clearing it.
    /// Does nothing on an empty list.
    pub async fn save_current_list_to_history(
        &mut self,
        clear: bool,
    ) -> Result<Option<ShoppingList>, GroceryApiError> {
        if self.state.current_list.is_empty() {
            return Ok(None);
        }
        let entry = logged(
            "save_current_list_to_history",
            self.api.archive_current(clear).await,
        )?;
        if clear {
            self.state
                .current_list
                .retain(|row| !entry.items.iter().any(|archived| archived.id == row.id));
        }
        self.state.history.insert(0, entry.clone());
        Ok(Some(entry))
    }

    /// Replace the current list with a history entry's items.
    pub async fn load_from_history(&mut self, id: ShoppingListId) -> Result<(), GroceryApiError> {
        self.state.current_list =
            logged("load_from_history", self.api.restore_history(id).await)?;
        Ok(())
    }

    /// Delete a history entry.
    pub async fn delete_history_entry(
        &mut self,
        id: ShoppingListId,
    ) -> Result<(), GroceryApiError> {
        logged("delete_history_entry", self.api.delete_history(id).await)?;
        self.state.history.retain(|entry| entry.id != id);
        Ok(())
    }

    /// Current list merged by identity, as displayed.
    #[must_use]
    pub fn merged_list(&self) -> Vec<GroceryItem> {
        merge_by_identity(self.state.current_list.iter().cloned())
    }

    /// Export view of the current list.
    #[must_use]
    pub fn summary(&self) -> ShoppingSummary {
        ShoppingSummary::from_items(&self.state.current_list)
    }

    /// Merged items of a known template.
    #[must_use]
    pub fn template_items(&self, id: TemplateId) -> Option<Vec<TemplateItem>> {
        self.state
            .templates
            .iter()
            .find(|template| template.id == id)
            .map(Template::merged_items)
    }
}

#[cfg(test)]
#[path = "list_controller_tests.rs"]
mod tests;
