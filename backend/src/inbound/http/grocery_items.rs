//! Current-list HTTP handlers.
//!
//! ```text
//! GET    /grocery-items
//! POST   /grocery-items
//! POST   /grocery-items/accumulate
//! POST   /grocery-items/bulk-delete
//! POST   /grocery-items/lookup
//! GET    /grocery-items/merged
//! GET    /grocery-items/summary
//! GET    /grocery-items/export
//! PUT    /grocery-items/{id}
//! DELETE /grocery-items/{id}
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::responses::{DeletedBody, SuccessBody};
use super::state::HttpState;
use super::validation::{FieldName, item_validation_error, parse_path_id, require};
use crate::domain::ports::ItemLookup;
use crate::domain::{
    ApiResult, Error, GroceryItem, GroceryItemDraft, GroceryItemId, ShoppingSummary,
};

const RESOURCE: &str = "grocery item";

/// Body for creating, replacing or accumulating a row.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItemBody {
    #[schema(example = "Pommes")]
    pub name: Option<String>,
    #[schema(example = 2.0)]
    pub quantity: Option<f64>,
    #[schema(example = "kg")]
    pub unit: Option<String>,
    /// Defaults to `false`.
    pub checked: Option<bool>,
    #[schema(example = "Fruits et légumes")]
    pub category: Option<String>,
}

impl GroceryItemBody {
    fn into_draft(self) -> Result<GroceryItemDraft, Error> {
        let name = require(self.name, FieldName::new("name"))?;
        let quantity = require(self.quantity, FieldName::new("quantity"))?;
        let unit = require(self.unit, FieldName::new("unit"))?;
        GroceryItemDraft::try_new(
            &name,
            quantity,
            &unit,
            self.checked.unwrap_or(false),
            self.category,
        )
        .map_err(|error| item_validation_error(&error, None))
    }
}

/// Body carrying a list of raw identifiers.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct IdsBody {
    #[schema(value_type = Vec<String>)]
    pub ids: Option<Vec<String>>,
}

/// List rows in insertion order.
#[utoipa::path(
    get,
    path = "/grocery-items",
    tags = ["grocery-items"],
    responses(
        (status = 200, description = "Current list", body = [GroceryItem]),
        (status = 500, description = "Internal server error", body = Error)
    )
)]
#[get("/grocery-items")]
pub async fn list_items(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<GroceryItem>>> {
    state.items_query.list().await.map(web::Json)
}

/// Add a row. A second row with the same name and unit may be created; use
/// the accumulate endpoint to fold repeated additions.
#[utoipa::path(
    post,
    path = "/grocery-items",
    tags = ["grocery-items"],
    request_body = GroceryItemBody,
    responses(
        (status = 201, description = "Created row", body = GroceryItem),
        (status = 400, description = "Missing or invalid field", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    )
)]
#[post("/grocery-items")]
pub async fn create_item(
    state: web::Data<HttpState>,
    payload: web::Json<GroceryItemBody>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let item = state.items.create(draft).await?;
    Ok(HttpResponse::Created().json(item))
}

/// Add a row, folding it into an existing row with the same identity.
#[utoipa::path(
    post,
    path = "/grocery-items/accumulate",
    tags = ["grocery-items"],
    request_body = GroceryItemBody,
    responses(
        (status = 200, description = "Existing row with increased quantity", body = GroceryItem),
        (status = 201, description = "New row", body = GroceryItem),
        (status = 400, description = "Missing or invalid field", body = Error)
    )
)]
#[post("/grocery-items/accumulate")]
pub async fn accumulate_item(
    state: web::Data<HttpState>,
    payload: web::Json<GroceryItemBody>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let outcome = state.items.accumulate(draft).await?;
    let mut response = if outcome.created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(outcome.item))
}

/// Delete several rows at once. Unknown or malformed ids are ignored.
#[utoipa::path(
    post,
    path = "/grocery-items/bulk-delete",
    tags = ["grocery-items"],
    request_body = IdsBody,
    responses(
        (status = 200, description = "Rows removed", body = DeletedBody),
        (status = 400, description = "Missing ids", body = Error)
    )
)]
#[post("/grocery-items/bulk-delete")]
pub async fn bulk_delete_items(
    state: web::Data<HttpState>,
    payload: web::Json<IdsBody>,
) -> ApiResult<web::Json<DeletedBody>> {
    let ids: Vec<GroceryItemId> = require(payload.into_inner().ids, FieldName::new("ids"))?
        .iter()
        .filter_map(|raw| raw.parse().ok())
        .collect();
    let deleted = state.items.delete_many(ids).await?;
    Ok(web::Json(DeletedBody {
        success: true,
        deleted,
    }))
}

/// Fetch several rows at once, reporting the ids that matched nothing.
#[utoipa::path(
    post,
    path = "/grocery-items/lookup",
    tags = ["grocery-items"],
    request_body = IdsBody,
    responses(
        (status = 200, description = "Found rows and missing ids", body = ItemLookup),
        (status = 400, description = "Missing ids", body = Error)
    )
)]
#[post("/grocery-items/lookup")]
pub async fn lookup_items(
    state: web::Data<HttpState>,
    payload: web::Json<IdsBody>,
) -> ApiResult<web::Json<ItemLookup>> {
    let ids = require(payload.into_inner().ids, FieldName::new("ids"))?;
    state.items_query.lookup(ids).await.map(web::Json)
}

/// Rows merged by name and unit.
#[utoipa::path(
    get,
    path = "/grocery-items/merged",
    tags = ["grocery-items"],
    responses((status = 200, description = "Merged list", body = [GroceryItem]))
)]
#[get("/grocery-items/merged")]
pub async fn merged_items(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<GroceryItem>>> {
    state.items_query.merged().await.map(web::Json)
}

/// Merged list split into what is left to buy and what is already bought.
#[utoipa::path(
    get,
    path = "/grocery-items/summary",
    tags = ["grocery-items"],
    responses((status = 200, description = "Shopping summary", body = ShoppingSummary))
)]
#[get("/grocery-items/summary")]
pub async fn summary(state: web::Data<HttpState>) -> ApiResult<web::Json<ShoppingSummary>> {
    state.items_query.summary().await.map(web::Json)
}

/// Plain-text rendering of the summary.
#[utoipa::path(
    get,
    path = "/grocery-items/export",
    tags = ["grocery-items"],
    responses((status = 200, description = "Printable list", content_type = "text/plain", body = String))
)]
#[get("/grocery-items/export")]
pub async fn export_list(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    // `summary` is the handler's unit struct in this module.
    let report = state.items_query.summary().await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(report.render_text()))
}

/// Replace a row. `checked` defaults to `false`.
#[utoipa::path(
    put,
    path = "/grocery-items/{id}",
    tags = ["grocery-items"],
    params(("id" = String, Path, description = "Row identifier")),
    request_body = GroceryItemBody,
    responses(
        (status = 200, description = "Updated row", body = GroceryItem),
        (status = 400, description = "Missing or invalid field", body = Error),
        (status = 404, description = "Unknown row", body = Error)
    )
)]
#[put("/grocery-items/{id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<GroceryItemBody>,
) -> ApiResult<web::Json<GroceryItem>> {
    let id = parse_path_id(&path, RESOURCE)?;
    let draft = payload.into_inner().into_draft()?;
    state.items.update(id, draft).await.map(web::Json)
}

/// Remove a row.
#[utoipa::path(
    delete,
    path = "/grocery-items/{id}",
    tags = ["grocery-items"],
    params(("id" = String, Path, description = "Row identifier")),
    responses(
        (status = 200, description = "Row removed", body = SuccessBody),
        (status = 404, description = "Unknown row", body = Error)
    )
)]
#[delete("/grocery-items/{id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessBody>> {
    let id = parse_path_id(&path, RESOURCE)?;
    state.items.delete(id).await?;
    Ok(web::Json(SuccessBody::OK))
}

/// Register the handlers; fixed paths precede `{id}` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_items)
        .service(create_item)
        .service(accumulate_item)
        .service(bulk_delete_items)
        .service(lookup_items)
        .service(merged_items)
        .service(summary)
        .service(export_list)
        .service(update_item)
        .service(delete_item);
}

#[cfg(test)]
#[path = "grocery_items_tests.rs"]
mod tests;
