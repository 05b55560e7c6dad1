//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every REST path from the inbound layer together with
//! the domain and request schemas they reference. The document is served by
//! Swagger UI in debug builds and printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::ports::ItemLookup;
use crate::domain::{
    ApplyMode, Error, ErrorCode, GroceryItem, Ingredient, Recipe, ShoppingList, ShoppingListItem,
    ShoppingSummary, Template, TemplateDetail, TemplateItem, Vocabulary,
};
use crate::inbound::http::entries::{EntryBody, SnapshotBody};
use crate::inbound::http::grocery_items::{GroceryItemBody, IdsBody};
use crate::inbound::http::recipes::{IngredientBody, RecipeBody};
use crate::inbound::http::responses::{DeletedBody, SuccessBody};
use crate::inbound::http::shopping_lists::{ArchiveBody, ShoppingListBody};
use crate::inbound::http::templates::{ApplyBody, TemplateBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Grocery list API",
        description = "Current shopping list, templates, recipes and shopping history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::grocery_items::list_items,
        crate::inbound::http::grocery_items::create_item,
        crate::inbound::http::grocery_items::accumulate_item,
        crate::inbound::http::grocery_items::bulk_delete_items,
        crate::inbound::http::grocery_items::lookup_items,
        crate::inbound::http::grocery_items::merged_items,
        crate::inbound::http::grocery_items::summary,
        crate::inbound::http::grocery_items::export_list,
        crate::inbound::http::grocery_items::update_item,
        crate::inbound::http::grocery_items::delete_item,
        crate::inbound::http::templates::list_templates,
        crate::inbound::http::templates::create_template,
        crate::inbound::http::templates::get_template,
        crate::inbound::http::templates::update_template,
        crate::inbound::http::templates::delete_template,
        crate::inbound::http::templates::apply_template,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::recipes::add_recipe_to_list,
        crate::inbound::http::shopping_lists::list_shopping_lists,
        crate::inbound::http::shopping_lists::create_shopping_list,
        crate::inbound::http::shopping_lists::archive_current_list,
        crate::inbound::http::shopping_lists::get_shopping_list,
        crate::inbound::http::shopping_lists::update_shopping_list,
        crate::inbound::http::shopping_lists::delete_shopping_list,
        crate::inbound::http::shopping_lists::restore_shopping_list,
        crate::inbound::http::vocabulary::get_vocabulary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        GroceryItem,
        Template,
        TemplateItem,
        TemplateDetail,
        ApplyMode,
        Recipe,
        Ingredient,
        ShoppingList,
        ShoppingListItem,
        ShoppingSummary,
        Vocabulary,
        ItemLookup,
        GroceryItemBody,
        IdsBody,
        TemplateBody,
        ApplyBody,
        EntryBody,
        SnapshotBody,
        RecipeBody,
        IngredientBody,
        ShoppingListBody,
        ArchiveBody,
        SuccessBody,
        DeletedBody,
    )),
    tags(
        (name = "grocery-items", description = "The current shopping list"),
        (name = "templates", description = "Reusable lists"),
        (name = "recipes", description = "Recipes and their ingredients"),
        (name = "shopping-lists", description = "Shopping history"),
        (name = "vocabulary", description = "Suggested units and categories"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
