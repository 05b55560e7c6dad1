//! Domain ports.
//!
//! Driven ports (`*Repository`, [`GroceryApi`]) are implemented by outbound
//! adapters; driving ports (`*Command`, `*Query`) are implemented by the
//! domain services and consumed by inbound adapters.

mod macros;

mod current_list_command;
mod grocery_api;
mod grocery_item_repository;
mod grocery_items_command;
mod grocery_items_query;
mod recipe_repository;
mod recipes_command;
mod recipes_query;
mod shopping_list_repository;
mod shopping_lists_command;
mod shopping_lists_query;
mod template_repository;
mod templates_command;
mod templates_query;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use current_list_command::MockCurrentListCommand;
pub use current_list_command::CurrentListCommand;
#[cfg(test)]
pub use grocery_api::MockGroceryApi;
pub use grocery_api::{
    GroceryApi, GroceryApiError, IngredientPayload, NewGroceryItem, NewTemplate, RecipePayload,
};
#[cfg(test)]
pub use grocery_item_repository::MockGroceryItemRepository;
pub use grocery_item_repository::{GroceryItemRepository, GroceryItemRepositoryError};
#[cfg(test)]
pub use grocery_items_command::MockGroceryItemsCommand;
pub use grocery_items_command::{AccumulateOutcome, GroceryItemsCommand};
#[cfg(test)]
pub use grocery_items_query::MockGroceryItemsQuery;
pub use grocery_items_query::{GroceryItemsQuery, ItemLookup};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use recipes_command::MockRecipesCommand;
pub use recipes_command::RecipesCommand;
#[cfg(test)]
pub use recipes_query::MockRecipesQuery;
pub use recipes_query::RecipesQuery;
#[cfg(test)]
pub use shopping_list_repository::MockShoppingListRepository;
pub use shopping_list_repository::{ShoppingListRepository, ShoppingListRepositoryError};
#[cfg(test)]
pub use shopping_lists_command::MockShoppingListsCommand;
pub use shopping_lists_command::ShoppingListsCommand;
#[cfg(test)]
pub use shopping_lists_query::MockShoppingListsQuery;
pub use shopping_lists_query::ShoppingListsQuery;
#[cfg(test)]
pub use template_repository::MockTemplateRepository;
pub use template_repository::{TemplateRepository, TemplateRepositoryError};
#[cfg(test)]
pub use templates_command::MockTemplatesCommand;
pub use templates_command::TemplatesCommand;
#[cfg(test)]
pub use templates_query::MockTemplatesQuery;
pub use templates_query::TemplatesQuery;
