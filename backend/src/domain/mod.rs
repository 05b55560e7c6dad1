//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: keep the grocery rules (validation, merge-by-identity, reference
//! resolution, timestamp normalisation) independent of HTTP and storage.
//! Inbound adapters call the driving ports implemented by the services here;
//! services reach storage only through the repository ports.
//!
//! Public surface:
//! - [`GroceryItem`], [`Template`], [`Recipe`], [`ShoppingList`]: the
//!   persisted aggregates.
//! - [`merge`]: the merge-by-identity rule shared by every view.
//! - [`Error`] / [`ErrorCode`]: API error payload.
//! - [`ListController`]: client-side state holder driven through
//!   [`ports::GroceryApi`].

mod current_list_service;
pub mod error;
mod grocery_item;
mod grocery_item_service;
mod ids;
pub mod item_entry;
mod list_controller;
pub mod merge;
pub mod ports;
mod recipe;
mod recipe_service;
mod shopping_list;
mod shopping_list_service;
mod summary;
mod template;
mod template_service;
pub mod timestamp;
mod trace_id;
mod vocabulary;

pub use self::current_list_service::CurrentListService;
pub use self::error::{DomainError as Error, ErrorCode};
pub use self::grocery_item::{GroceryItem, GroceryItemDraft, ItemFields, ItemValidationError};
pub use self::grocery_item_service::GroceryItemService;
pub use self::ids::{GroceryItemId, IngredientId, RecipeId, ShoppingListId, TemplateId};
pub use self::item_entry::{ItemEntry, SnapshotEntry};
pub use self::list_controller::{AppState, ListController};
pub use self::recipe::{Ingredient, Recipe, RecipeDraft, RecipeValidationError};
pub use self::recipe_service::RecipeService;
pub use self::shopping_list::{ShoppingList, ShoppingListDraft, ShoppingListItem};
pub use self::shopping_list_service::ShoppingListService;
pub use self::summary::ShoppingSummary;
pub use self::template::{
    ApplyMode, Template, TemplateDetail, TemplateDraft, TemplateItem, TemplateValidationError,
};
pub use self::template_service::TemplateService;
pub use self::timestamp::{StoredTimestamp, TimestampError, normalize_timestamp};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::vocabulary::{COMMON_UNITS, FOOD_CATEGORIES, Vocabulary};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use grocery_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("template not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
