//! Template HTTP handlers.
//!
//! ```text
//! GET    /templates
//! POST   /templates
//! GET    /templates/{id}
//! PUT    /templates/{id}
//! DELETE /templates/{id}
//! POST   /templates/{id}/apply
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::entries::{EntryBody, parse_entries};
use super::responses::SuccessBody;
use super::state::HttpState;
use super::validation::{FieldName, invalid_value_error, parse_path_id, parse_timestamp, require};
use crate::domain::{
    ApiResult, ApplyMode, Error, GroceryItem, Template, TemplateDetail, TemplateDraft, TemplateId,
};

const RESOURCE: &str = "template";

/// Body for creating or replacing a template.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBody {
    #[schema(example = "Courses de la semaine")]
    pub name: Option<String>,
    #[schema(example = "2024-03-05T14:30:00.000Z")]
    pub created_at: Option<String>,
    pub items: Option<Vec<EntryBody>>,
}

impl TemplateBody {
    fn into_draft(self) -> Result<TemplateDraft, Error> {
        let name = require(self.name, FieldName::new("name"))?;
        let raw_created_at = require(self.created_at, FieldName::new("createdAt"))?;
        let created_at = parse_timestamp(&raw_created_at, FieldName::new("createdAt"))?;
        let items = require(self.items, FieldName::new("items"))?;
        let entries = parse_entries(items, FieldName::new("items"))?;
        TemplateDraft::try_new(&name, created_at, entries)
            .map_err(|error| invalid_value_error(FieldName::new("name"), None, error))
    }
}

/// Body selecting how a template lands on the current list.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
pub struct ApplyBody {
    /// `replace` (default) or `append`.
    #[serde(default)]
    pub mode: ApplyMode,
}

/// All templates with their raw snapshots.
#[utoipa::path(
    get,
    path = "/templates",
    tags = ["templates"],
    responses((status = 200, description = "Templates", body = [Template]))
)]
#[get("/templates")]
pub async fn list_templates(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Template>>> {
    state.templates_query.list().await.map(web::Json)
}

/// Save a template. References are snapshotted from the current list.
#[utoipa::path(
    post,
    path = "/templates",
    tags = ["templates"],
    request_body = TemplateBody,
    responses(
        (status = 201, description = "Created template", body = Template),
        (status = 400, description = "Invalid body or unknown referenced items", body = Error)
    )
)]
#[post("/templates")]
pub async fn create_template(
    state: web::Data<HttpState>,
    payload: web::Json<TemplateBody>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let template = state.templates.create(draft).await?;
    Ok(HttpResponse::Created().json(template))
}

/// One template with its merged view.
#[utoipa::path(
    get,
    path = "/templates/{id}",
    tags = ["templates"],
    params(("id" = String, Path, description = "Template identifier")),
    responses(
        (status = 200, description = "Template detail", body = TemplateDetail),
        (status = 404, description = "Unknown template", body = Error)
    )
)]
#[get("/templates/{id}")]
pub async fn get_template(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TemplateDetail>> {
    let id: TemplateId = parse_path_id(&path, RESOURCE)?;
    state.templates_query.detail(id).await.map(web::Json)
}

/// Replace a template and its snapshots.
#[utoipa::path(
    put,
    path = "/templates/{id}",
    tags = ["templates"],
    params(("id" = String, Path, description = "Template identifier")),
    request_body = TemplateBody,
    responses(
        (status = 200, description = "Updated template", body = Template),
        (status = 400, description = "Invalid body", body = Error),
        (status = 404, description = "Unknown template", body = Error)
    )
)]
#[put("/templates/{id}")]
pub async fn update_template(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<TemplateBody>,
) -> ApiResult<web::Json<Template>> {
    let id = parse_path_id(&path, RESOURCE)?;
    let draft = payload.into_inner().into_draft()?;
    state.templates.update(id, draft).await.map(web::Json)
}

/// Remove a template.
#[utoipa::path(
    delete,
    path = "/templates/{id}",
    tags = ["templates"],
    params(("id" = String, Path, description = "Template identifier")),
    responses(
        (status = 200, description = "Template removed", body = SuccessBody),
        (status = 404, description = "Unknown template", body = Error)
    )
)]
#[delete("/templates/{id}")]
pub async fn delete_template(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessBody>> {
    let id = parse_path_id(&path, RESOURCE)?;
    state.templates.delete(id).await?;
    Ok(web::Json(SuccessBody::OK))
}

/// Load a template onto the current list and return the resulting list.
#[utoipa::path(
    post,
    path = "/templates/{id}/apply",
    tags = ["templates"],
    params(("id" = String, Path, description = "Template identifier")),
    request_body = ApplyBody,
    responses(
        (status = 200, description = "Current list after applying", body = [GroceryItem]),
        (status = 404, description = "Unknown template", body = Error)
    )
)]
#[post("/templates/{id}/apply")]
pub async fn apply_template(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ApplyBody>,
) -> ApiResult<web::Json<Vec<GroceryItem>>> {
    let id = parse_path_id(&path, RESOURCE)?;
    state
        .current_list
        .apply_template(id, payload.mode)
        .await
        .map(web::Json)
}

/// Register the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_templates)
        .service(create_template)
        .service(apply_template)
        .service(get_template)
        .service(update_template)
        .service(delete_template);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{ItemEntry, StoredTimestamp, TemplateItem};
    use crate::inbound::http::test_utils::{MockPorts, test_app};

    fn stored(draft: TemplateDraft) -> Template {
        let (name, created_at, _) = draft.into_parts();
        Template {
            id: TemplateId::random(),
            name,
            created_at,
            items: Vec::new(),
        }
    }

    #[actix_web::test]
    async fn create_normalises_created_at_and_keeps_entry_kinds() {
        let mut ports = MockPorts::default();
        ports
            .templates
            .expect_create()
            .withf(|draft| {
                draft.created_at().to_string() == "2024-03-05 14:30:00"
                    && matches!(
                        draft.clone().into_parts().2.as_slice(),
                        [ItemEntry::Reference(_), ItemEntry::Snapshot(_)]
                    )
            })
            .times(1)
            .returning(|draft| Ok(stored(draft)));
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/templates")
            .set_json(json!({
                "name": "Semaine",
                "createdAt": "2024-03-05T14:30:00.000Z",
                "items": [
                    "9b2f5a64-3c1f-4d3b-8a57-0e7f3c2a1b10",
                    {"name": "Pain", "quantity": 2, "unit": "pièce(s)"}
                ],
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["createdAt"], "2024-03-05 14:30:00");
    }

    #[rstest]
    #[case::no_name(json!({"createdAt": "2024-03-05 14:30:00", "items": []}), "name")]
    #[case::no_created_at(json!({"name": "Semaine", "items": []}), "createdAt")]
    #[case::no_items(json!({"name": "Semaine", "createdAt": "2024-03-05 14:30:00"}), "items")]
    #[actix_web::test]
    async fn create_requires_every_field(#[case] payload: Value, #[case] field: &str) {
        let mut ports = MockPorts::default();
        ports.templates.expect_create().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/templates")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn garbage_created_at_is_rejected() {
        let mut ports = MockPorts::default();
        ports.templates.expect_create().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/templates")
            .set_json(json!({"name": "Semaine", "createdAt": "lundi", "items": []}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["code"], "invalid_timestamp");
        assert_eq!(body["details"]["value"], "lundi");
    }

    #[actix_web::test]
    async fn detail_reports_merged_items() {
        let mut ports = MockPorts::default();
        ports.templates_query.expect_detail().returning(|id| {
            let item = |name: &str, quantity| TemplateItem {
                id: crate::domain::GroceryItemId::random(),
                name: name.to_owned(),
                quantity,
                unit: "kg".to_owned(),
            };
            Ok(TemplateDetail::from(Template {
                id,
                name: "Semaine".to_owned(),
                created_at: StoredTimestamp::now(),
                items: vec![item("Pommes", 2.0), item("pommes", 1.0)],
            }))
        });
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/templates/{}", TemplateId::random()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["itemCount"], 1);
        assert_eq!(body["mergedItems"][0]["quantity"], 3.0);
        assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
    }

    #[rstest]
    #[case::explicit_append(json!({"mode": "append"}), ApplyMode::Append)]
    #[case::default_replace(json!({}), ApplyMode::Replace)]
    #[actix_web::test]
    async fn apply_forwards_the_mode(#[case] payload: Value, #[case] expected: ApplyMode) {
        let mut ports = MockPorts::default();
        ports
            .current_list
            .expect_apply_template()
            .withf(move |_, mode| *mode == expected)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/templates/{}/apply", TemplateId::random()))
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}
