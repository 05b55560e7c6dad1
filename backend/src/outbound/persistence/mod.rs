//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows (`models.rs`, `schema.rs`) and
//! domain types; neither rows nor Diesel errors leave this module. Every
//! multi-statement write runs in one database transaction.
//!
//! # Example
//!
//! ```ignore
//! use grocery_backend::outbound::persistence::{DbPool, DieselGroceryItemRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/groceries")).await?;
//! let repo = DieselGroceryItemRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_grocery_item_repository;
mod diesel_recipe_repository;
mod diesel_shopping_list_repository;
mod diesel_template_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_grocery_item_repository::DieselGroceryItemRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_shopping_list_repository::DieselShoppingListRepository;
pub use diesel_template_repository::DieselTemplateRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
