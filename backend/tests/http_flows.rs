//! End-to-end HTTP flows over the in-memory store.
//!
//! The app is assembled the same way the server binary does it, so these
//! tests exercise routing, validation, services and storage together.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use grocery_backend::Trace;
use grocery_backend::inbound::http::state::HttpState;
use grocery_backend::inbound::http::{configure, json_config};
use grocery_backend::outbound::memory::InMemoryStore;

async fn app() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::from_repositories(store.clone(), store.clone(), store.clone(), store);
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

async fn call<S>(app: &S, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let builder = match method {
        "POST" => actix_test::TestRequest::post(),
        "PUT" => actix_test::TestRequest::put(),
        "DELETE" => actix_test::TestRequest::delete(),
        _ => actix_test::TestRequest::get(),
    }
    .uri(uri);
    let request = match body {
        Some(payload) => builder.set_json(payload).to_request(),
        None => builder.to_request(),
    };
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn add_item<S>(app: &S, name: &str, quantity: f64, unit: &str, checked: bool) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = call(
        app,
        "POST",
        "/grocery-items",
        Some(json!({"name": name, "quantity": quantity, "unit": unit, "checked": checked})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["id"].as_str().expect("created row has an id").to_owned()
}

fn name_quantities(list: &Value) -> Vec<(String, f64)> {
    list.as_array()
        .expect("array body")
        .iter()
        .map(|row| {
            (
                row["name"].as_str().expect("name").to_owned(),
                row["quantity"].as_f64().expect("quantity"),
            )
        })
        .collect()
}

#[actix_web::test]
async fn invalid_item_is_rejected_and_nothing_is_stored() {
    let app = app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/grocery-items",
        Some(json!({"name": "Pommes", "unit": "kg"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert!(body["traceId"].is_string());

    let (_, list) = call(&app, "GET", "/grocery-items", None).await;
    assert_eq!(list, json!([]));
}

#[rstest]
#[case::zero_quantity(json!({"name": "Pommes", "quantity": 0, "unit": "kg"}))]
#[case::blank_name(json!({"name": "   ", "quantity": 1, "unit": "kg"}))]
#[case::malformed_json(json!("not an object"))]
#[actix_web::test]
async fn malformed_item_bodies_are_bad_requests(#[case] payload: Value) {
    let app = app().await;
    let (status, body) = call(&app, "POST", "/grocery-items", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn merged_view_folds_rows_by_identity() {
    let app = app().await;
    add_item(&app, "Pommes", 2.0, "kg", false).await;
    add_item(&app, "pommes", 1.0, "Kg", true).await;

    let (status, merged) = call(&app, "GET", "/grocery-items/merged", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = merged.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    let row = rows.first().expect("one merged row");
    assert_eq!(row["name"], "Pommes");
    assert_eq!(row["quantity"], 3.0);
    assert_eq!(row["unit"], "kg");
    assert_eq!(row["checked"], false);

    let (_, raw) = call(&app, "GET", "/grocery-items", None).await;
    assert_eq!(raw.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn accumulate_folds_into_an_existing_row() {
    let app = app().await;
    add_item(&app, "Lait", 1.0, "l", false).await;

    let (status, body) = call(
        &app,
        "POST",
        "/grocery-items/accumulate",
        Some(json!({"name": " lait ", "quantity": 0.5, "unit": "L"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lait");
    assert_eq!(body["quantity"], 1.5);

    let (status, _) = call(
        &app,
        "POST",
        "/grocery-items/accumulate",
        Some(json!({"name": "Beurre", "quantity": 250, "unit": "g"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = call(&app, "GET", "/grocery-items", None).await;
    assert_eq!(
        name_quantities(&list),
        vec![("Lait".to_owned(), 1.5), ("Beurre".to_owned(), 250.0)]
    );
}

#[actix_web::test]
async fn bulk_delete_reports_the_removed_count() {
    let app = app().await;
    let first = add_item(&app, "Pain", 1.0, "pièce(s)", false).await;
    add_item(&app, "Oeufs", 6.0, "pièce(s)", false).await;

    let (status, body) = call(
        &app,
        "POST",
        "/grocery-items/bulk-delete",
        Some(json!({"ids": [first, "not-a-uuid"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "deleted": 1}));

    let (_, list) = call(&app, "GET", "/grocery-items", None).await;
    assert_eq!(name_quantities(&list), vec![("Oeufs".to_owned(), 6.0)]);
}

#[rstest]
#[case::unknown("/grocery-items/6d0f9c4e-2b7a-4c55-9a8e-3f1d2c4b5a69")]
#[case::malformed("/grocery-items/not-a-uuid")]
#[actix_web::test]
async fn deleting_a_missing_item_is_not_found(#[case] uri: &str) {
    let app = app().await;
    let (status, body) = call(&app, "DELETE", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn templates_snapshot_references_and_reject_unknown_ids() {
    let app = app().await;
    let pain = add_item(&app, "Pain", 2.0, "pièce(s)", true).await;

    let (status, body) = call(
        &app,
        "POST",
        "/templates",
        Some(json!({
            "name": "Semaine",
            "createdAt": "2024-03-05T14:30:00.000Z",
            "items": ["6d0f9c4e-2b7a-4c55-9a8e-3f1d2c4b5a69"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");

    let (status, created) = call(
        &app,
        "POST",
        "/templates",
        Some(json!({
            "name": "Semaine",
            "createdAt": "2024-03-05T14:30:00.000Z",
            "items": [pain.clone(), {"name": "pain", "quantity": 1, "unit": "Pièce(s)"}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["createdAt"], "2024-03-05 14:30:00");

    // The snapshot is independent of the source row.
    call(&app, "DELETE", &format!("/grocery-items/{pain}"), None).await;

    let id = created["id"].as_str().expect("template id");
    let (status, detail) = call(&app, "GET", &format!("/templates/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(detail["itemCount"], 1);
    assert_eq!(name_quantities(&detail["mergedItems"]), vec![("Pain".to_owned(), 3.0)]);
}

#[actix_web::test]
async fn applying_a_template_replaces_or_appends() {
    let app = app().await;
    add_item(&app, "Lait", 1.0, "l", true).await;

    let (_, template) = call(
        &app,
        "POST",
        "/templates",
        Some(json!({
            "name": "Base",
            "createdAt": "2024-03-05 14:30:00",
            "items": [
                {"name": "Lait", "quantity": 2, "unit": "l"},
                {"name": "Riz", "quantity": 500, "unit": "g"}
            ],
        })),
    )
    .await;
    let id = template["id"].as_str().expect("template id").to_owned();

    let (status, appended) = call(
        &app,
        "POST",
        &format!("/templates/{id}/apply"),
        Some(json!({"mode": "append"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        name_quantities(&appended),
        vec![("Lait".to_owned(), 3.0), ("Riz".to_owned(), 500.0)]
    );

    let (status, replaced) =
        call(&app, "POST", &format!("/templates/{id}/apply"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        name_quantities(&replaced),
        vec![("Lait".to_owned(), 2.0), ("Riz".to_owned(), 500.0)]
    );
    assert!(
        replaced
            .as_array()
            .expect("array body")
            .iter()
            .all(|row| row["checked"] == false)
    );
}

#[actix_web::test]
async fn recipe_ingredients_are_summed_into_the_list() {
    let app = app().await;
    add_item(&app, "Farine", 100.0, "g", false).await;

    let (status, recipe) = call(
        &app,
        "POST",
        "/recipes",
        Some(json!({
            "name": "Crêpes",
            "createdAt": "2024-03-05T14:30:00Z",
            "ingredients": [
                {"name": "farine", "quantity": 250, "unit": "G"},
                {"name": "Lait", "quantity": 0.5, "unit": "l"}
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = recipe["id"].as_str().expect("recipe id");

    let (status, list) = call(&app, "POST", &format!("/recipes/{id}/add-to-list"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        name_quantities(&list),
        vec![("Farine".to_owned(), 350.0), ("Lait".to_owned(), 0.5)]
    );
}

#[actix_web::test]
async fn archive_clears_and_restore_rebuilds_the_list() {
    let app = app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/shopping-lists/archive",
        Some(json!({"clear": true})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "empty list: {body}");

    add_item(&app, "Pommes", 2.0, "kg", true).await;
    add_item(&app, "pommes", 1.0, "kg", false).await;

    let (status, entry) = call(
        &app,
        "POST",
        "/shopping-lists/archive",
        Some(json!({"clear": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["items"].as_array().map(Vec::len), Some(2));

    let (_, list) = call(&app, "GET", "/grocery-items", None).await;
    assert_eq!(list, json!([]));

    let id = entry["id"].as_str().expect("entry id");
    let (status, restored) =
        call(&app, "POST", &format!("/shopping-lists/{id}/restore"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(name_quantities(&restored), vec![("Pommes".to_owned(), 3.0)]);
    assert_eq!(
        restored.as_array().and_then(|rows| rows.first()).map(|row| row["checked"].clone()),
        Some(json!(false))
    );
}

#[actix_web::test]
async fn history_is_listed_newest_first() {
    let app = app().await;
    for created_at in ["2024-01-01T08:00:00Z", "2024-03-01T08:00:00Z", "2024-02-01 08:00:00"] {
        let (status, _) = call(
            &app,
            "POST",
            "/shopping-lists",
            Some(json!({
                "createdAt": created_at,
                "items": [{"name": "Pain", "quantity": 1, "unit": "pièce(s)"}],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, history) = call(&app, "GET", "/shopping-lists", None).await;
    assert_eq!(status, StatusCode::OK);
    let stamps: Vec<&str> = history
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|entry| entry["createdAt"].as_str())
        .collect();
    assert_eq!(
        stamps,
        vec!["2024-03-01 08:00:00", "2024-02-01 08:00:00", "2024-01-01 08:00:00"]
    );
}

#[actix_web::test]
async fn back_to_back_archives_list_the_latest_first() {
    let app = app().await;
    add_item(&app, "Pain", 1.0, "pièce(s)", false).await;
    let (status, _) = call(&app, "POST", "/shopping-lists/archive", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    add_item(&app, "Lait", 1.0, "l", false).await;
    let (status, latest) = call(&app, "POST", "/shopping-lists/archive", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, history) = call(&app, "GET", "/shopping-lists", None).await;
    let first = history
        .as_array()
        .and_then(|entries| entries.first())
        .expect("history entry");
    assert_eq!(first["id"], latest["id"]);
    assert_eq!(first["items"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn unparseable_created_at_is_rejected() {
    let app = app().await;
    let (status, body) = call(
        &app,
        "POST",
        "/shopping-lists",
        Some(json!({"createdAt": "yesterday", "items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "createdAt");
}

#[actix_web::test]
async fn export_renders_plain_text() {
    let app = app().await;
    add_item(&app, "Pommes", 2.0, "kg", false).await;

    let request = actix_test::TestRequest::get()
        .uri("/grocery-items/export")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = actix_test::read_body(response).await;
    let text = String::from_utf8(body.to_vec()).expect("utf-8 export");
    assert!(text.contains("Pommes"));
}
