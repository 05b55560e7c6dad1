//! PostgreSQL-backed `GroceryItemRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{GroceryItemRepository, GroceryItemRepositoryError};
use crate::domain::{GroceryItem, GroceryItemId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{GroceryItemRow, GroceryItemUpdate, NewGroceryItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::grocery_items;

/// Diesel-backed implementation of the grocery item repository port.
#[derive(Clone)]
pub struct DieselGroceryItemRepository {
    pool: DbPool,
}

impl DieselGroceryItemRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GroceryItemRepositoryError {
    map_basic_pool_error(error, GroceryItemRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> GroceryItemRepositoryError {
    map_basic_diesel_error(
        error,
        GroceryItemRepositoryError::query,
        GroceryItemRepositoryError::connection,
    )
}

fn row_to_item(row: GroceryItemRow) -> GroceryItem {
    GroceryItem {
        id: GroceryItemId::from_uuid(row.id),
        name: row.name,
        quantity: row.quantity,
        unit: row.unit,
        checked: row.checked,
        category: row.category,
    }
}

fn new_row(item: &GroceryItem) -> NewGroceryItemRow<'_> {
    NewGroceryItemRow {
        id: *item.id.as_uuid(),
        name: &item.name,
        quantity: item.quantity,
        unit: &item.unit,
        checked: item.checked,
        category: item.category.as_deref(),
    }
}

fn changeset(item: &GroceryItem) -> GroceryItemUpdate<'_> {
    GroceryItemUpdate {
        name: &item.name,
        quantity: item.quantity,
        unit: &item.unit,
        checked: item.checked,
        category: item.category.as_deref(),
    }
}

fn uuids(ids: &[GroceryItemId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

#[async_trait]
impl GroceryItemRepository for DieselGroceryItemRepository {
    async fn list(&self) -> Result<Vec<GroceryItem>, GroceryItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GroceryItemRow> = grocery_items::table
            .order(grocery_items::seq.asc())
            .select(GroceryItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_item).collect())
    }

    async fn find_many(
        &self,
        ids: &[GroceryItemId],
    ) -> Result<Vec<GroceryItem>, GroceryItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GroceryItemRow> = grocery_items::table
            .filter(grocery_items::id.eq_any(uuids(ids)))
            .select(GroceryItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_item).collect())
    }

    async fn insert(&self, item: &GroceryItem) -> Result<(), GroceryItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(grocery_items::table)
            .values(&new_row(item))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, item: &GroceryItem) -> Result<bool, GroceryItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(grocery_items::table.find(item.id.as_uuid()))
            .set(&changeset(item))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &GroceryItemId) -> Result<bool, GroceryItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(grocery_items::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete_many(
        &self,
        ids: &[GroceryItemId],
    ) -> Result<usize, GroceryItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(grocery_items::table.filter(grocery_items::id.eq_any(uuids(ids))))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn apply_changes(
        &self,
        updates: &[GroceryItem],
        inserts: &[GroceryItem],
    ) -> Result<(), GroceryItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_rows: Vec<NewGroceryItemRow<'_>> = inserts.iter().map(new_row).collect();

        conn.transaction(|conn| {
            async move {
                for item in updates {
                    diesel::update(grocery_items::table.find(item.id.as_uuid()))
                        .set(&changeset(item))
                        .execute(conn)
                        .await?;
                }
                if !new_rows.is_empty() {
                    diesel::insert_into(grocery_items::table)
                        .values(&new_rows)
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

    async fn replace_all(&self, items: &[GroceryItem]) -> Result<(), GroceryItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_rows: Vec<NewGroceryItemRow<'_>> = items.iter().map(new_row).collect();

        conn.transaction(|conn| {
            async move {
                diesel::delete(grocery_items::table).execute(conn).await?;
                if !new_rows.is_empty() {
                    diesel::insert_into(grocery_items::table)
                        .values(&new_rows)
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
}
