//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{Ingredient, IngredientId, Recipe, RecipeId, StoredTimestamp};

use super::diesel_basic_error_mapping::{
    POSITION_OVERFLOW, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{IngredientRow, RecipeRow, RecipeUpdate, row_position};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, recipes};

/// Diesel-backed implementation of the recipe repository port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    map_basic_pool_error(error, RecipeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_basic_diesel_error(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

fn ingredient_rows(recipe: &Recipe) -> Result<Vec<IngredientRow>, RecipeRepositoryError> {
    recipe
        .ingredients
        .iter()
        .enumerate()
        .map(|(index, ingredient)| {
            let position = row_position(index)
                .ok_or_else(|| RecipeRepositoryError::query(POSITION_OVERFLOW))?;
            Ok(IngredientRow {
                id: *ingredient.id.as_uuid(),
                recipe_id: *recipe.id.as_uuid(),
                position,
                name: ingredient.name.clone(),
                quantity: ingredient.quantity,
                unit: ingredient.unit.clone(),
            })
        })
        .collect()
}

fn assemble(rows: Vec<RecipeRow>, children: Vec<IngredientRow>) -> Vec<Recipe> {
    let mut grouped: HashMap<Uuid, Vec<Ingredient>> = HashMap::new();
    for row in children {
        grouped.entry(row.recipe_id).or_default().push(Ingredient {
            id: IngredientId::from_uuid(row.id),
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
        });
    }
    rows.into_iter()
        .map(|row| Recipe {
            id: RecipeId::from_uuid(row.id),
            ingredients: grouped.remove(&row.id).unwrap_or_default(),
            name: row.name,
            instructions: row.instructions,
            image: row.image,
            created_at: StoredTimestamp::from_naive(row.created_at),
        })
        .collect()
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (rows, children) = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<RecipeRow> = recipes::table
                        .order((recipes::created_at.asc(), recipes::id.asc()))
                        .select(RecipeRow::as_select())
                        .load(conn)
                        .await?;
                    let children: Vec<IngredientRow> = ingredients::table
                        .order((ingredients::recipe_id, ingredients::position))
                        .select(IngredientRow::as_select())
                        .load(conn)
                        .await?;
                    Ok((rows, children))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(assemble(rows, children))
    }

    async fn find(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuid = *id.as_uuid();
        let (row, children) = conn
            .transaction(|conn| {
                async move {
                    let row: Option<RecipeRow> = recipes::table
                        .find(uuid)
                        .select(RecipeRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let children: Vec<IngredientRow> = ingredients::table
                        .filter(ingredients::recipe_id.eq(uuid))
                        .order(ingredients::position)
                        .select(IngredientRow::as_select())
                        .load(conn)
                        .await?;
                    Ok((row, children))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(row.and_then(|row| assemble(vec![row], children).pop()))
    }

    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let header = RecipeRow {
            id: *recipe.id.as_uuid(),
            name: recipe.name.clone(),
            instructions: recipe.instructions.clone(),
            image: recipe.image.clone(),
            created_at: recipe.created_at.as_naive(),
        };
        let children = ingredient_rows(recipe)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(recipes::table)
                    .values(&header)
                    .execute(conn)
                    .await?;
                if !children.is_empty() {
                    diesel::insert_into(ingredients::table)
                        .values(&children)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update(&self, recipe: &Recipe) -> Result<bool, RecipeRepositoryError> {
        let uuid = *recipe.id.as_uuid();
        let changes = RecipeUpdate {
            name: &recipe.name,
            instructions: recipe.instructions.as_deref(),
            image: recipe.image.as_deref(),
            created_at: recipe.created_at.as_naive(),
        };
        let children = ingredient_rows(recipe)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let affected = diesel::update(recipes::table.find(uuid))
                    .set(&changes)
                    .execute(conn)
                    .await?;
                if affected == 0 {
                    return Ok(false);
                }
                diesel::delete(ingredients::table.filter(ingredients::recipe_id.eq(uuid)))
                    .execute(conn)
                    .await?;
                if !children.is_empty() {
                    diesel::insert_into(ingredients::table)
                        .values(&children)
                        .execute(conn)
                        .await?;
                }
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(recipes::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
