//! PostgreSQL-backed `ShoppingListRepository` implementation using Diesel ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{ShoppingListRepository, ShoppingListRepositoryError};
use crate::domain::{
    GroceryItemId, ShoppingList, ShoppingListId, ShoppingListItem, StoredTimestamp,
};

use super::diesel_basic_error_mapping::{
    POSITION_OVERFLOW, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{ShoppingListItemRow, ShoppingListRow, row_position};
use super::pool::{DbPool, PoolError};
use super::schema::{shopping_list_items, shopping_lists};

/// Diesel-backed implementation of the shopping history repository port.
#[derive(Clone)]
pub struct DieselShoppingListRepository {
    pool: DbPool,
}

impl DieselShoppingListRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ShoppingListRepositoryError {
    map_basic_pool_error(error, ShoppingListRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ShoppingListRepositoryError {
    map_basic_diesel_error(
        error,
        ShoppingListRepositoryError::query,
        ShoppingListRepositoryError::connection,
    )
}

fn item_rows(
    list: &ShoppingList,
) -> Result<Vec<ShoppingListItemRow>, ShoppingListRepositoryError> {
    list.items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let position = row_position(index)
                .ok_or_else(|| ShoppingListRepositoryError::query(POSITION_OVERFLOW))?;
            Ok(ShoppingListItemRow {
                shopping_list_id: *list.id.as_uuid(),
                position,
                item_id: *item.id.as_uuid(),
                name: item.name.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
                checked: item.checked,
            })
        })
        .collect()
}

fn assemble(
    rows: Vec<ShoppingListRow>,
    children: Vec<ShoppingListItemRow>,
) -> Vec<ShoppingList> {
    let mut grouped: HashMap<Uuid, Vec<ShoppingListItem>> = HashMap::new();
    for row in children {
        grouped
            .entry(row.shopping_list_id)
            .or_default()
            .push(ShoppingListItem {
                id: GroceryItemId::from_uuid(row.item_id),
                name: row.name,
                quantity: row.quantity,
                unit: row.unit,
                checked: row.checked,
            });
    }
    rows.into_iter()
        .map(|row| ShoppingList {
            id: ShoppingListId::from_uuid(row.id),
            created_at: StoredTimestamp::from_naive(row.created_at),
            items: grouped.remove(&row.id).unwrap_or_default(),
        })
        .collect()
}

async fn insert_items(
    conn: &mut diesel_async::AsyncPgConnection,
    rows: &[ShoppingListItemRow],
) -> QueryResult<()> {
    if !rows.is_empty() {
        diesel::insert_into(shopping_list_items::table)
            .values(rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl ShoppingListRepository for DieselShoppingListRepository {
    async fn list(&self) -> Result<Vec<ShoppingList>, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (rows, children) = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<ShoppingListRow> = shopping_lists::table
                        .order((shopping_lists::created_at.desc(), shopping_lists::seq.desc()))
                        .select(ShoppingListRow::as_select())
                        .load(conn)
                        .await?;
                    let children: Vec<ShoppingListItemRow> = shopping_list_items::table
                        .order((
                            shopping_list_items::shopping_list_id,
                            shopping_list_items::position,
                        ))
                        .select(ShoppingListItemRow::as_select())
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

    async fn find(
        &self,
        id: &ShoppingListId,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuid = *id.as_uuid();
        let (row, children) = conn
            .transaction(|conn| {
                async move {
                    let row: Option<ShoppingListRow> = shopping_lists::table
                        .find(uuid)
                        .select(ShoppingListRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let children: Vec<ShoppingListItemRow> = shopping_list_items::table
                        .filter(shopping_list_items::shopping_list_id.eq(uuid))
                        .order(shopping_list_items::position)
                        .select(ShoppingListItemRow::as_select())
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

    async fn insert(&self, list: &ShoppingList) -> Result<(), ShoppingListRepositoryError> {
        let header = ShoppingListRow {
            id: *list.id.as_uuid(),
            created_at: list.created_at.as_naive(),
        };
        let children = item_rows(list)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(shopping_lists::table)
                    .values(&header)
                    .execute(conn)
                    .await?;
                insert_items(conn, &children).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update(&self, list: &ShoppingList) -> Result<bool, ShoppingListRepositoryError> {
        let uuid = *list.id.as_uuid();
        let created_at = list.created_at.as_naive();
        let children = item_rows(list)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let affected = diesel::update(shopping_lists::table.find(uuid))
                    .set(shopping_lists::created_at.eq(created_at))
                    .execute(conn)
                    .await?;
                if affected == 0 {
                    return Ok(false);
                }
                diesel::delete(
                    shopping_list_items::table
                        .filter(shopping_list_items::shopping_list_id.eq(uuid)),
                )
                .execute(conn)
                .await?;
                insert_items(conn, &children).await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &ShoppingListId) -> Result<bool, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(shopping_lists::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
