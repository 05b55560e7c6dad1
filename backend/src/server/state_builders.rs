//! Builders for the HTTP state from the configured storage backend.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use grocery_backend::inbound::http::state::HttpState;
use grocery_backend::outbound::memory::InMemoryStore;
use grocery_backend::outbound::persistence::{
    DbPool, DieselGroceryItemRepository, DieselRecipeRepository, DieselShoppingListRepository,
    DieselTemplateRepository,
};

fn diesel_state(pool: &DbPool) -> HttpState {
    HttpState::from_repositories(
        Arc::new(DieselGroceryItemRepository::new(pool.clone())),
        Arc::new(DieselTemplateRepository::new(pool.clone())),
        Arc::new(DieselRecipeRepository::new(pool.clone())),
        Arc::new(DieselShoppingListRepository::new(pool.clone())),
    )
}

fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::from_repositories(store.clone(), store.clone(), store.clone(), store)
}

/// Build handler state: PostgreSQL repositories when a pool is configured,
/// otherwise one shared in-memory store.
pub(super) fn build_http_state(db_pool: Option<&DbPool>) -> web::Data<HttpState> {
    let state = match db_pool {
        Some(pool) => {
            info!("serving from PostgreSQL");
            diesel_state(pool)
        }
        None => {
            info!("serving from the in-memory store; data is lost on restart");
            in_memory_state()
        }
    };
    web::Data::new(state)
}
