//! Port for recipe persistence.

use async_trait::async_trait;

use crate::domain::{Recipe, RecipeId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe repository query failed: {message}",
    }
}

/// Port for recipe storage. Ingredients are written with their recipe and
/// replaced wholesale on update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Every recipe, oldest first.
    async fn list(&self) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// One recipe, if it exists.
    async fn find(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Store a new recipe and its ingredients atomically.
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError>;

    /// Replace a recipe and its ingredients. Returns `false` when absent.
    async fn update(&self, recipe: &Recipe) -> Result<bool, RecipeRepositoryError>;

    /// Remove a recipe and its ingredients. Returns `false` when absent.
    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError>;
}
