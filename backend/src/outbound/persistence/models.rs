//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Child rows (template
//! items, ingredients, history items) are written and read whole, so one
//! struct serves both directions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    grocery_items, ingredients, recipes, shopping_list_items, shopping_lists, template_items,
    templates,
};

/// Convert a list index into the `position` column type.
pub(crate) fn row_position(index: usize) -> Option<i32> {
    i32::try_from(index).ok()
}

// ---------------------------------------------------------------------------
// Grocery items
// ---------------------------------------------------------------------------

/// Row read from `grocery_items`; `seq` is only used for ordering.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = grocery_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroceryItemRow {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub checked: bool,
    pub category: Option<String>,
}

/// Insertable grocery item.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = grocery_items)]
pub(crate) struct NewGroceryItemRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub quantity: f64,
    pub unit: &'a str,
    pub checked: bool,
    pub category: Option<&'a str>,
}

/// Full replacement of a grocery item; a `None` category clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = grocery_items)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct GroceryItemUpdate<'a> {
    pub name: &'a str,
    pub quantity: f64,
    pub unit: &'a str,
    pub checked: bool,
    pub category: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TemplateRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = templates)]
pub(crate) struct TemplateUpdate<'a> {
    pub name: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = template_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TemplateItemRow {
    pub template_id: Uuid,
    pub position: i32,
    pub item_id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub name: String,
    pub instructions: Option<String>,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Full replacement of a recipe header; `None` clears optional text.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct RecipeUpdate<'a> {
    pub name: &'a str,
    pub instructions: Option<&'a str>,
    pub image: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub position: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

// ---------------------------------------------------------------------------
// Shopping history
// ---------------------------------------------------------------------------

/// History header; `seq` is generated and only used for ordering.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = shopping_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShoppingListRow {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = shopping_list_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShoppingListItemRow {
    pub shopping_list_id: Uuid,
    pub position: i32,
    pub item_id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub checked: bool,
}
