//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CurrentListCommand, GroceryItemRepository, GroceryItemsCommand, GroceryItemsQuery,
    RecipeRepository, RecipesCommand, RecipesQuery, ShoppingListRepository, ShoppingListsCommand,
    ShoppingListsQuery, TemplateRepository, TemplatesCommand, TemplatesQuery,
};
use crate::domain::{
    CurrentListService, GroceryItemService, RecipeService, ShoppingListService, TemplateService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub items: Arc<dyn GroceryItemsCommand>,
    pub items_query: Arc<dyn GroceryItemsQuery>,
    pub templates: Arc<dyn TemplatesCommand>,
    pub templates_query: Arc<dyn TemplatesQuery>,
    pub recipes: Arc<dyn RecipesCommand>,
    pub recipes_query: Arc<dyn RecipesQuery>,
    pub shopping_lists: Arc<dyn ShoppingListsCommand>,
    pub shopping_lists_query: Arc<dyn ShoppingListsQuery>,
    pub current_list: Arc<dyn CurrentListCommand>,
}

impl HttpState {
    /// Wire every domain service over one set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use grocery_backend::inbound::http::state::HttpState;
    /// use grocery_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    /// );
    /// let _items = state.items.clone();
    /// ```
    pub fn from_repositories<G, T, R, S>(
        items: Arc<G>,
        templates: Arc<T>,
        recipes: Arc<R>,
        lists: Arc<S>,
    ) -> Self
    where
        G: GroceryItemRepository + 'static,
        T: TemplateRepository + 'static,
        R: RecipeRepository + 'static,
        S: ShoppingListRepository + 'static,
    {
        let item_service = Arc::new(GroceryItemService::new(items.clone()));
        let template_service = Arc::new(TemplateService::new(templates.clone(), items.clone()));
        let recipe_service = Arc::new(RecipeService::new(recipes.clone()));
        let list_service = Arc::new(ShoppingListService::new(lists.clone(), items.clone()));
        let current_list = Arc::new(CurrentListService::new(items, templates, recipes, lists));
        Self {
            items: item_service.clone(),
            items_query: item_service,
            templates: template_service.clone(),
            templates_query: template_service,
            recipes: recipe_service.clone(),
            recipes_query: recipe_service,
            shopping_lists: list_service.clone(),
            shopping_lists_query: list_service,
            current_list,
        }
    }
}
