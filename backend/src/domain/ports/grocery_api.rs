//! Port through which the client-side controller reaches the REST service.
//!
//! The request payload types here are the wire bodies the service accepts.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    ApplyMode, GroceryItem, GroceryItemId, Recipe, RecipeId, ShoppingList, ShoppingListId,
    StoredTimestamp, Template, TemplateId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by API client adapters.
    pub enum GroceryApiError {
        /// The request never produced a response.
        Transport { message: String } => "grocery API transport error: {message}",
        /// The service answered with a non-success status.
        Status { status: u16, message: String } =>
            "grocery API returned {status}: {message}",
        /// The response body did not match the expected shape.
        Decode { message: String } => "grocery API response decode failed: {message}",
    }
}

/// Body of the single-item add.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroceryItem {
    /// Product name.
    pub name: String,
    /// Amount in `unit`.
    pub quantity: f64,
    /// Unit.
    pub unit: String,
    /// Optional shelf category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Body for saving the current list as a template. Items are sent as
/// references and snapshotted by the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    /// Display name.
    pub name: String,
    /// Creation time.
    pub created_at: StoredTimestamp,
    /// Referenced list rows.
    pub items: Vec<GroceryItemId>,
}

/// One ingredient line in a recipe body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientPayload {
    /// Product name.
    pub name: String,
    /// Amount in `unit`.
    pub quantity: f64,
    /// Unit.
    pub unit: String,
}

/// Body for creating or replacing a recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    /// Display name.
    pub name: String,
    /// Ingredients in order.
    pub ingredients: Vec<IngredientPayload>,
    /// Preparation steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Illustration URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Creation time; omitted on updates to keep the stored value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<StoredTimestamp>,
}

impl From<&Recipe> for RecipePayload {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|ingredient| IngredientPayload {
                    name: ingredient.name.clone(),
                    quantity: ingredient.quantity,
                    unit: ingredient.unit.clone(),
                })
                .collect(),
            instructions: recipe.instructions.clone(),
            image: recipe.image.clone(),
            created_at: Some(recipe.created_at),
        }
    }
}

/// Port mirroring the REST surface used by the list controller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroceryApi: Send + Sync {
    /// `GET /grocery-items`.
    async fn list_items(&self) -> Result<Vec<GroceryItem>, GroceryApiError>;
    /// `POST /grocery-items/accumulate`.
    async fn accumulate_item(&self, item: &NewGroceryItem)
    -> Result<GroceryItem, GroceryApiError>;
    /// `PUT /grocery-items/{id}`.
    async fn update_item(&self, item: &GroceryItem) -> Result<GroceryItem, GroceryApiError>;
    /// `DELETE /grocery-items/{id}`.
    async fn delete_item(&self, id: GroceryItemId) -> Result<(), GroceryApiError>;
    /// `POST /grocery-items/bulk-delete`.
    async fn delete_items(&self, ids: &[GroceryItemId]) -> Result<usize, GroceryApiError>;

    /// `GET /templates`.
    async fn list_templates(&self) -> Result<Vec<Template>, GroceryApiError>;
    /// `POST /templates`.
    async fn create_template(&self, template: &NewTemplate) -> Result<Template, GroceryApiError>;
    /// `DELETE /templates/{id}`.
    async fn delete_template(&self, id: TemplateId) -> Result<(), GroceryApiError>;
    /// `POST /templates/{id}/apply`.
    async fn apply_template(
        &self,
        id: TemplateId,
        mode: ApplyMode,
    ) -> Result<Vec<GroceryItem>, GroceryApiError>;

    /// `GET /recipes`.
    async fn list_recipes(&self) -> Result<Vec<Recipe>, GroceryApiError>;
    /// `POST /recipes`.
    async fn create_recipe(&self, recipe: &RecipePayload) -> Result<Recipe, GroceryApiError>;
    /// `PUT /recipes/{id}`.
    async fn update_recipe(
        &self,
        id: RecipeId,
        recipe: &RecipePayload,
    ) -> Result<Recipe, GroceryApiError>;
    /// `DELETE /recipes/{id}`.
    async fn delete_recipe(&self, id: RecipeId) -> Result<(), GroceryApiError>;
    /// `POST /recipes/{id}/add-to-list`.
    async fn add_recipe_to_list(&self, id: RecipeId) -> Result<Vec<GroceryItem>, GroceryApiError>;

    /// `GET /shopping-lists`.
    async fn list_history(&self) -> Result<Vec<ShoppingList>, GroceryApiError>;
    /// `POST /shopping-lists/archive`.
    async fn archive_current(&self, clear: bool) -> Result<ShoppingList, GroceryApiError>;
    /// `POST /shopping-lists/{id}/restore`.
    async fn restore_history(
        &self,
        id: ShoppingListId,
    ) -> Result<Vec<GroceryItem>, GroceryApiError>;
    /// `DELETE /shopping-lists/{id}`.
    async fn delete_history(&self, id: ShoppingListId) -> Result<(), GroceryApiError>;
}
