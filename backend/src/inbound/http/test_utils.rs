//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::error::json_config;
use super::state::HttpState;
use crate::Trace;
use crate::domain::ports::{
    MockCurrentListCommand, MockGroceryItemsCommand, MockGroceryItemsQuery, MockRecipesCommand,
    MockRecipesQuery, MockShoppingListsCommand, MockShoppingListsQuery, MockTemplatesCommand,
    MockTemplatesQuery,
};

/// One mock per driving port. Handlers under test configure only the mocks
/// they reach; an unexpected call fails the test.
#[derive(Default)]
pub struct MockPorts {
    pub items: MockGroceryItemsCommand,
    pub items_query: MockGroceryItemsQuery,
    pub templates: MockTemplatesCommand,
    pub templates_query: MockTemplatesQuery,
    pub recipes: MockRecipesCommand,
    pub recipes_query: MockRecipesQuery,
    pub shopping_lists: MockShoppingListsCommand,
    pub shopping_lists_query: MockShoppingListsQuery,
    pub current_list: MockCurrentListCommand,
}

impl MockPorts {
    fn into_state(self) -> HttpState {
        HttpState {
            items: Arc::new(self.items),
            items_query: Arc::new(self.items_query),
            templates: Arc::new(self.templates),
            templates_query: Arc::new(self.templates_query),
            recipes: Arc::new(self.recipes),
            recipes_query: Arc::new(self.recipes_query),
            shopping_lists: Arc::new(self.shopping_lists),
            shopping_lists_query: Arc::new(self.shopping_lists_query),
            current_list: Arc::new(self.current_list),
        }
    }
}

/// Build the full route table over mocked ports.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(json_config())
        .wrap(Trace)
        .configure(super::configure)
}
