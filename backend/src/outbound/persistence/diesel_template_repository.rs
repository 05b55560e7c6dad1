//! PostgreSQL-backed `TemplateRepository` implementation using Diesel ORM.
//!
//! A template header and its snapshot rows are always written in one
//! transaction; updates delete and re-insert the snapshots wholesale.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{TemplateRepository, TemplateRepositoryError};
use crate::domain::{GroceryItemId, StoredTimestamp, Template, TemplateId, TemplateItem};

use super::diesel_basic_error_mapping::{
    POSITION_OVERFLOW, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{TemplateItemRow, TemplateRow, TemplateUpdate, row_position};
use super::pool::{DbPool, PoolError};
use super::schema::{template_items, templates};

/// Diesel-backed implementation of the template repository port.
#[derive(Clone)]
pub struct DieselTemplateRepository {
    pool: DbPool,
}

impl DieselTemplateRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TemplateRepositoryError {
    map_basic_pool_error(error, TemplateRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TemplateRepositoryError {
    map_basic_diesel_error(
        error,
        TemplateRepositoryError::query,
        TemplateRepositoryError::connection,
    )
}

fn item_rows(template: &Template) -> Result<Vec<TemplateItemRow>, TemplateRepositoryError> {
    template
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let position = row_position(index)
                .ok_or_else(|| TemplateRepositoryError::query(POSITION_OVERFLOW))?;
            Ok(TemplateItemRow {
                template_id: *template.id.as_uuid(),
                position,
                item_id: *item.id.as_uuid(),
                name: item.name.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
            })
        })
        .collect()
}

fn assemble(rows: Vec<TemplateRow>, items: Vec<TemplateItemRow>) -> Vec<Template> {
    let mut grouped: HashMap<Uuid, Vec<TemplateItem>> = HashMap::new();
    for row in items {
        grouped.entry(row.template_id).or_default().push(TemplateItem {
            id: GroceryItemId::from_uuid(row.item_id),
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
        });
    }
    rows.into_iter()
        .map(|row| Template {
            id: TemplateId::from_uuid(row.id),
            name: row.name,
            created_at: StoredTimestamp::from_naive(row.created_at),
            items: grouped.remove(&row.id).unwrap_or_default(),
        })
        .collect()
}

#[async_trait]
impl TemplateRepository for DieselTemplateRepository {
    async fn list(&self) -> Result<Vec<Template>, TemplateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (rows, items) = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<TemplateRow> = templates::table
                        .order((templates::created_at.asc(), templates::id.asc()))
                        .select(TemplateRow::as_select())
                        .load(conn)
                        .await?;
                    let items: Vec<TemplateItemRow> = template_items::table
                        .order((template_items::template_id, template_items::position))
                        .select(TemplateItemRow::as_select())
                        .load(conn)
                        .await?;
                    Ok((rows, items))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(assemble(rows, items))
    }

    async fn find(&self, id: &TemplateId) -> Result<Option<Template>, TemplateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuid = *id.as_uuid();
        let (row, items) = conn
            .transaction(|conn| {
                async move {
                    let row: Option<TemplateRow> = templates::table
                        .find(uuid)
                        .select(TemplateRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let items: Vec<TemplateItemRow> = template_items::table
                        .filter(template_items::template_id.eq(uuid))
                        .order(template_items::position)
                        .select(TemplateItemRow::as_select())
                        .load(conn)
                        .await?;
                    Ok((row, items))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(row.and_then(|row| assemble(vec![row], items).pop()))
    }

    async fn insert(&self, template: &Template) -> Result<(), TemplateRepositoryError> {
        let header = TemplateRow {
            id: *template.id.as_uuid(),
            name: template.name.clone(),
            created_at: template.created_at.as_naive(),
        };
        let items = item_rows(template)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(templates::table)
                    .values(&header)
                    .execute(conn)
                    .await?;
                if !items.is_empty() {
                    diesel::insert_into(template_items::table)
                        .values(&items)
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

    async fn update(&self, template: &Template) -> Result<bool, TemplateRepositoryError> {
        let uuid = *template.id.as_uuid();
        let changes = TemplateUpdate {
            name: &template.name,
            created_at: template.created_at.as_naive(),
        };
        let items = item_rows(template)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let affected = diesel::update(templates::table.find(uuid))
                    .set(&changes)
                    .execute(conn)
                    .await?;
                if affected == 0 {
                    return Ok(false);
                }
                diesel::delete(template_items::table.filter(template_items::template_id.eq(uuid)))
                    .execute(conn)
                    .await?;
                if !items.is_empty() {
                    diesel::insert_into(template_items::table)
                        .values(&items)
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

    async fn delete(&self, id: &TemplateId) -> Result<bool, TemplateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(templates::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
