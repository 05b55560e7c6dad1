//! Driving port for recipe reads.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeId};

/// Driving port for reading recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// Every recipe.
    async fn list(&self) -> Result<Vec<Recipe>, Error>;

    /// One recipe.
    async fn find(&self, id: RecipeId) -> Result<Recipe, Error>;
}
