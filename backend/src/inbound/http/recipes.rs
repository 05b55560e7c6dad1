//! Recipe HTTP handlers.
//!
//! ```text
//! GET    /recipes
//! POST   /recipes
//! GET    /recipes/{id}
//! PUT    /recipes/{id}
//! DELETE /recipes/{id}
//! POST   /recipes/{id}/add-to-list
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::responses::SuccessBody;
use super::state::HttpState;
use super::validation::{
    FieldName, Nested, invalid_value_error, item_validation_error, parse_optional_timestamp,
    parse_path_id, require, require_nested,
};
use crate::domain::{
    ApiResult, Error, GroceryItem, ItemFields, Recipe, RecipeDraft, RecipeId,
    RecipeValidationError, StoredTimestamp,
};

const RESOURCE: &str = "recipe";

/// One ingredient line.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct IngredientBody {
    #[schema(example = "Farine")]
    pub name: Option<String>,
    #[schema(example = 250.0)]
    pub quantity: Option<f64>,
    #[schema(example = "g")]
    pub unit: Option<String>,
}

impl IngredientBody {
    fn into_fields(self, nested: Nested) -> Result<ItemFields, Error> {
        let name = require_nested(self.name, FieldName::new("name"), nested)?;
        let quantity = require_nested(self.quantity, FieldName::new("quantity"), nested)?;
        let unit = require_nested(self.unit, FieldName::new("unit"), nested)?;
        ItemFields::try_new(&name, quantity, &unit)
            .map_err(|error| item_validation_error(&error, Some(nested)))
    }
}

/// Body for creating or replacing a recipe.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeBody {
    #[schema(example = "Crêpes")]
    pub name: Option<String>,
    /// Required on creation; the stored value is kept when omitted on update.
    #[schema(example = "2024-03-05T14:30:00.000Z")]
    pub created_at: Option<String>,
    pub ingredients: Option<Vec<IngredientBody>>,
    pub instructions: Option<String>,
    pub image: Option<String>,
}

fn recipe_validation_error(error: &RecipeValidationError) -> Error {
    let field = match error {
        RecipeValidationError::BlankName => FieldName::new("name"),
        RecipeValidationError::InvalidImage { .. } => FieldName::new("image"),
    };
    invalid_value_error(field, None, error)
}

impl RecipeBody {
    fn into_draft(self, created_at: Option<StoredTimestamp>) -> Result<RecipeDraft, Error> {
        let name = require(self.name, FieldName::new("name"))?;
        let parent = FieldName::new("ingredients");
        let ingredients = require(self.ingredients, parent)?
            .into_iter()
            .enumerate()
            .map(|(index, ingredient)| ingredient.into_fields(Nested { parent, index }))
            .collect::<Result<Vec<_>, _>>()?;
        RecipeDraft::try_new(
            &name,
            ingredients,
            self.instructions,
            self.image,
            created_at,
        )
        .map_err(|error| recipe_validation_error(&error))
    }

    fn into_new_draft(mut self) -> Result<RecipeDraft, Error> {
        let raw = require(self.created_at.take(), FieldName::new("createdAt"))?;
        let created_at = parse_optional_timestamp(Some(raw), FieldName::new("createdAt"))?;
        self.into_draft(created_at)
    }

    fn into_replacement_draft(mut self) -> Result<RecipeDraft, Error> {
        let created_at =
            parse_optional_timestamp(self.created_at.take(), FieldName::new("createdAt"))?;
        self.into_draft(created_at)
    }
}

/// All recipes.
#[utoipa::path(
    get,
    path = "/recipes",
    tags = ["recipes"],
    responses((status = 200, description = "Recipes", body = [Recipe]))
)]
#[get("/recipes")]
pub async fn list_recipes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Recipe>>> {
    state.recipes_query.list().await.map(web::Json)
}

/// Save a recipe.
#[utoipa::path(
    post,
    path = "/recipes",
    tags = ["recipes"],
    request_body = RecipeBody,
    responses(
        (status = 201, description = "Created recipe", body = Recipe),
        (status = 400, description = "Missing or invalid field", body = Error)
    )
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    payload: web::Json<RecipeBody>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_new_draft()?;
    let recipe = state.recipes.create(draft).await?;
    Ok(HttpResponse::Created().json(recipe))
}

/// One recipe.
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tags = ["recipes"],
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe", body = Recipe),
        (status = 404, description = "Unknown recipe", body = Error)
    )
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Recipe>> {
    let id: RecipeId = parse_path_id(&path, RESOURCE)?;
    state.recipes_query.find(id).await.map(web::Json)
}

/// Replace a recipe and its ingredients.
#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tags = ["recipes"],
    params(("id" = String, Path, description = "Recipe identifier")),
    request_body = RecipeBody,
    responses(
        (status = 200, description = "Updated recipe", body = Recipe),
        (status = 400, description = "Missing or invalid field", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    )
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecipeBody>,
) -> ApiResult<web::Json<Recipe>> {
    let id = parse_path_id(&path, RESOURCE)?;
    let draft = payload.into_inner().into_replacement_draft()?;
    state.recipes.update(id, draft).await.map(web::Json)
}

/// Remove a recipe.
#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tags = ["recipes"],
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe removed", body = SuccessBody),
        (status = 404, description = "Unknown recipe", body = Error)
    )
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessBody>> {
    let id = parse_path_id(&path, RESOURCE)?;
    state.recipes.delete(id).await?;
    Ok(web::Json(SuccessBody::OK))
}

/// Add the recipe's ingredients to the current list, summing quantities
/// into rows with the same name and unit.
#[utoipa::path(
    post,
    path = "/recipes/{id}/add-to-list",
    tags = ["recipes"],
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Current list after adding", body = [GroceryItem]),
        (status = 404, description = "Unknown recipe", body = Error)
    )
)]
#[post("/recipes/{id}/add-to-list")]
pub async fn add_recipe_to_list(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<GroceryItem>>> {
    let id = parse_path_id(&path, RESOURCE)?;
    state.current_list.add_recipe(id).await.map(web::Json)
}

/// Register the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_recipes)
        .service(create_recipe)
        .service(add_recipe_to_list)
        .service(get_recipe)
        .service(update_recipe)
        .service(delete_recipe);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, test_app};

    fn crepes() -> Value {
        json!({
            "name": "Crêpes",
            "createdAt": "2024-03-05T14:30:00Z",
            "ingredients": [
                {"name": "Farine", "quantity": 250, "unit": "g"},
                {"name": "Lait", "quantity": 0.5, "unit": "l"}
            ],
            "image": "https://example.test/crepes.jpg",
        })
    }

    #[actix_web::test]
    async fn create_returns_created_recipe() {
        let mut ports = MockPorts::default();
        ports
            .recipes
            .expect_create()
            .withf(|draft| {
                draft.created_at().map(|ts| ts.to_string()).as_deref()
                    == Some("2024-03-05 14:30:00")
            })
            .times(1)
            .returning(|draft| {
                let created_at = draft.created_at().unwrap_or_else(StoredTimestamp::now);
                Ok(draft.into_recipe(RecipeId::random(), created_at))
            });
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/recipes")
            .set_json(crepes())
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["ingredients"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["createdAt"], "2024-03-05 14:30:00");
    }

    #[actix_web::test]
    async fn ingredient_without_unit_is_rejected() {
        let mut ports = MockPorts::default();
        ports.recipes.expect_create().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let mut payload = crepes();
        payload["ingredients"][1] = json!({"name": "Lait", "quantity": 0.5});
        let request = actix_test::TestRequest::post()
            .uri("/recipes")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "ingredients[1].unit");
    }

    #[actix_web::test]
    async fn relative_image_is_rejected() {
        let mut ports = MockPorts::default();
        ports.recipes.expect_create().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let mut payload = crepes();
        payload["image"] = json!("crepes.jpg");
        let request = actix_test::TestRequest::post()
            .uri("/recipes")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "image");
    }

    #[actix_web::test]
    async fn update_without_created_at_leaves_it_to_the_service() {
        let mut ports = MockPorts::default();
        ports
            .recipes
            .expect_update()
            .withf(|_, draft| draft.created_at().is_none())
            .times(1)
            .returning(|id, draft| Ok(draft.into_recipe(id, StoredTimestamp::now())));
        let app = actix_test::init_service(test_app(ports)).await;

        let mut payload = crepes();
        if let Some(object) = payload.as_object_mut() {
            object.remove("createdAt");
        }
        let request = actix_test::TestRequest::put()
            .uri(&format!("/recipes/{}", RecipeId::random()))
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn add_to_list_returns_the_current_list() {
        let mut ports = MockPorts::default();
        ports.current_list.expect_add_recipe().times(1).returning(|_| {
            Ok(vec![GroceryItem::new(
                crate::domain::GroceryItemId::random(),
                "Farine",
                250.0,
                "g",
                false,
            )])
        });
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/recipes/{}/add-to-list", RecipeId::random()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body[0]["name"], "Farine");
    }
}
