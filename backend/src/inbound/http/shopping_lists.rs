//! Shopping history HTTP handlers.
//!
//! ```text
//! GET    /shopping-lists
//! POST   /shopping-lists
//! POST   /shopping-lists/archive
//! GET    /shopping-lists/{id}
//! PUT    /shopping-lists/{id}
//! DELETE /shopping-lists/{id}
//! POST   /shopping-lists/{id}/restore
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::entries::{EntryBody, parse_entries};
use super::responses::SuccessBody;
use super::state::HttpState;
use super::validation::{FieldName, parse_optional_timestamp, parse_path_id, require};
use crate::domain::{
    ApiResult, Error, GroceryItem, ShoppingList, ShoppingListDraft, ShoppingListId,
};

const RESOURCE: &str = "shopping list";

/// Body for recording or replacing a history entry.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListBody {
    /// Required on creation; the stored value is kept when omitted on update.
    #[schema(example = "2024-03-05T14:30:00.000Z")]
    pub created_at: Option<String>,
    pub items: Option<Vec<EntryBody>>,
}

impl ShoppingListBody {
    fn into_draft(self, created_at_required: bool) -> Result<ShoppingListDraft, Error> {
        let field = FieldName::new("createdAt");
        let raw_created_at = if created_at_required {
            Some(require(self.created_at, field)?)
        } else {
            self.created_at
        };
        let created_at = parse_optional_timestamp(raw_created_at, field)?;
        let items = require(self.items, FieldName::new("items"))?;
        Ok(ShoppingListDraft {
            created_at,
            entries: parse_entries(items, FieldName::new("items"))?,
        })
    }
}

/// Body for archiving the current list.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
pub struct ArchiveBody {
    /// Remove the archived rows from the current list afterwards.
    #[serde(default)]
    pub clear: bool,
}

/// History entries, newest first.
#[utoipa::path(
    get,
    path = "/shopping-lists",
    tags = ["shopping-lists"],
    responses((status = 200, description = "History", body = [ShoppingList]))
)]
#[get("/shopping-lists")]
pub async fn list_shopping_lists(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ShoppingList>>> {
    state.shopping_lists_query.list().await.map(web::Json)
}

/// Record a history entry.
#[utoipa::path(
    post,
    path = "/shopping-lists",
    tags = ["shopping-lists"],
    request_body = ShoppingListBody,
    responses(
        (status = 201, description = "Created entry", body = ShoppingList),
        (status = 400, description = "Invalid body or unknown referenced items", body = Error)
    )
)]
#[post("/shopping-lists")]
pub async fn create_shopping_list(
    state: web::Data<HttpState>,
    payload: web::Json<ShoppingListBody>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft(true)?;
    let list = state.shopping_lists.create(draft).await?;
    Ok(HttpResponse::Created().json(list))
}

/// Snapshot the current list into a new history entry.
#[utoipa::path(
    post,
    path = "/shopping-lists/archive",
    tags = ["shopping-lists"],
    request_body = ArchiveBody,
    responses(
        (status = 201, description = "Created entry", body = ShoppingList),
        (status = 400, description = "Current list is empty", body = Error)
    )
)]
#[post("/shopping-lists/archive")]
pub async fn archive_current_list(
    state: web::Data<HttpState>,
    payload: web::Json<ArchiveBody>,
) -> ApiResult<HttpResponse> {
    let list = state.current_list.archive(payload.clear).await?;
    Ok(HttpResponse::Created().json(list))
}

/// One history entry.
#[utoipa::path(
    get,
    path = "/shopping-lists/{id}",
    tags = ["shopping-lists"],
    params(("id" = String, Path, description = "History entry identifier")),
    responses(
        (status = 200, description = "History entry", body = ShoppingList),
        (status = 404, description = "Unknown entry", body = Error)
    )
)]
#[get("/shopping-lists/{id}")]
pub async fn get_shopping_list(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ShoppingList>> {
    let id: ShoppingListId = parse_path_id(&path, RESOURCE)?;
    state.shopping_lists_query.find(id).await.map(web::Json)
}

/// Replace a history entry and its items.
#[utoipa::path(
    put,
    path = "/shopping-lists/{id}",
    tags = ["shopping-lists"],
    params(("id" = String, Path, description = "History entry identifier")),
    request_body = ShoppingListBody,
    responses(
        (status = 200, description = "Updated entry", body = ShoppingList),
        (status = 400, description = "Invalid body", body = Error),
        (status = 404, description = "Unknown entry", body = Error)
    )
)]
#[put("/shopping-lists/{id}")]
pub async fn update_shopping_list(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ShoppingListBody>,
) -> ApiResult<web::Json<ShoppingList>> {
    let id = parse_path_id(&path, RESOURCE)?;
    let draft = payload.into_inner().into_draft(false)?;
    state.shopping_lists.update(id, draft).await.map(web::Json)
}

/// Remove a history entry.
#[utoipa::path(
    delete,
    path = "/shopping-lists/{id}",
    tags = ["shopping-lists"],
    params(("id" = String, Path, description = "History entry identifier")),
    responses(
        (status = 200, description = "Entry removed", body = SuccessBody),
        (status = 404, description = "Unknown entry", body = Error)
    )
)]
#[delete("/shopping-lists/{id}")]
pub async fn delete_shopping_list(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessBody>> {
    let id = parse_path_id(&path, RESOURCE)?;
    state.shopping_lists.delete(id).await?;
    Ok(web::Json(SuccessBody::OK))
}

/// Replace the current list with the entry's items, merged and unchecked.
#[utoipa::path(
    post,
    path = "/shopping-lists/{id}/restore",
    tags = ["shopping-lists"],
    params(("id" = String, Path, description = "History entry identifier")),
    responses(
        (status = 200, description = "Restored current list", body = [GroceryItem]),
        (status = 404, description = "Unknown entry", body = Error)
    )
)]
#[post("/shopping-lists/{id}/restore")]
pub async fn restore_shopping_list(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<GroceryItem>>> {
    let id = parse_path_id(&path, RESOURCE)?;
    state.current_list.restore(id).await.map(web::Json)
}

/// Register the handlers; `archive` precedes the `{id}` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_shopping_lists)
        .service(create_shopping_list)
        .service(archive_current_list)
        .service(restore_shopping_list)
        .service(get_shopping_list)
        .service(update_shopping_list)
        .service(delete_shopping_list);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::StoredTimestamp;
    use crate::inbound::http::test_utils::{MockPorts, test_app};

    fn archived() -> ShoppingList {
        ShoppingList {
            id: ShoppingListId::random(),
            created_at: StoredTimestamp::now(),
            items: Vec::new(),
        }
    }

    #[rstest]
    #[case::keep(json!({}), false)]
    #[case::clear(json!({"clear": true}), true)]
    #[actix_web::test]
    async fn archive_forwards_the_clear_flag(#[case] payload: Value, #[case] expected: bool) {
        let mut ports = MockPorts::default();
        ports
            .current_list
            .expect_archive()
            .withf(move |clear| *clear == expected)
            .times(1)
            .returning(|_| Ok(archived()));
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/shopping-lists/archive")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn archive_of_an_empty_list_is_a_bad_request() {
        let mut ports = MockPorts::default();
        ports
            .current_list
            .expect_archive()
            .returning(|_| Err(Error::invalid_request("the current list is empty")));
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/shopping-lists/archive")
            .set_json(json!({}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn create_requires_created_at() {
        let mut ports = MockPorts::default();
        ports.shopping_lists.expect_create().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/shopping-lists")
            .set_json(json!({"items": []}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "createdAt");
    }

    #[actix_web::test]
    async fn update_may_omit_created_at() {
        let mut ports = MockPorts::default();
        ports
            .shopping_lists
            .expect_update()
            .withf(|_, draft| draft.created_at.is_none() && draft.entries.is_empty())
            .times(1)
            .returning(|_, _| Ok(archived()));
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/shopping-lists/{}", ShoppingListId::random()))
            .set_json(json!({"items": []}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn missing_references_surface_their_ids() {
        let mut ports = MockPorts::default();
        ports.shopping_lists.expect_create().returning(|_| {
            Err(Error::invalid_request("some referenced grocery items do not exist")
                .with_details(json!({"code": "missing_items", "missingIds": ["gone"]})))
        });
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/shopping-lists")
            .set_json(json!({"createdAt": "2024-03-05 14:30:00", "items": ["gone"]}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["missingIds"], json!(["gone"]));
    }
}
