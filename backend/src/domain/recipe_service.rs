//! Recipe service implementing the recipe driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError, RecipesCommand, RecipesQuery};
use crate::domain::{Error, Recipe, RecipeDraft, RecipeId, StoredTimestamp};

/// Recipe service backed by a [`RecipeRepository`].
#[derive(Clone)]
pub struct RecipeService<R> {
    repo: Arc<R>,
}

impl<R> RecipeService<R> {
    /// Create a service over `repo`.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

pub(crate) fn map_recipe_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::internal(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
    }
}

pub(crate) fn recipe_not_found(id: RecipeId) -> Error {
    Error::not_found(format!("recipe {id} not found"))
}

impl<R> RecipeService<R>
where
    R: RecipeRepository,
{
    async fn fetch(&self, id: RecipeId) -> Result<Recipe, Error> {
        self.repo
            .find(&id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| recipe_not_found(id))
    }
}

#[async_trait]
impl<R> RecipesCommand for RecipeService<R>
where
    R: RecipeRepository,
{
    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, Error> {
        let created_at = draft.created_at().unwrap_or_else(StoredTimestamp::now);
        let recipe = draft.into_recipe(RecipeId::random(), created_at);
        self.repo.insert(&recipe).await.map_err(map_recipe_error)?;
        debug!(
            recipe_id = %recipe.id,
            ingredients = recipe.ingredients.len(),
            "recipe created"
        );
        Ok(recipe)
    }

    async fn update(&self, id: RecipeId, draft: RecipeDraft) -> Result<Recipe, Error> {
        let created_at = match draft.created_at() {
            Some(created_at) => created_at,
            None => self.fetch(id).await?.created_at,
        };
        let recipe = draft.into_recipe(id, created_at);
        let found = self.repo.update(&recipe).await.map_err(map_recipe_error)?;
        if !found {
            return Err(recipe_not_found(id));
        }
        Ok(recipe)
    }

    async fn delete(&self, id: RecipeId) -> Result<(), Error> {
        let found = self.repo.delete(&id).await.map_err(map_recipe_error)?;
        if found {
            Ok(())
        } else {
            Err(recipe_not_found(id))
        }
    }
}

#[async_trait]
impl<R> RecipesQuery for RecipeService<R>
where
    R: RecipeRepository,
{
    async fn list(&self) -> Result<Vec<Recipe>, Error> {
        self.repo.list().await.map_err(map_recipe_error)
    }

    async fn find(&self, id: RecipeId) -> Result<Recipe, Error> {
        self.fetch(id).await
    }
}
