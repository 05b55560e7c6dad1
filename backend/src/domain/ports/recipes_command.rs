//! Driving port for recipe changes.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeDraft, RecipeId};

/// Driving port for creating, replacing and removing recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    /// Store a new recipe; a missing creation time defaults to now.
    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Replace a recipe and its ingredients. A missing creation time keeps
    /// the stored one.
    async fn update(&self, id: RecipeId, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Remove a recipe.
    async fn delete(&self, id: RecipeId) -> Result<(), Error>;
}
