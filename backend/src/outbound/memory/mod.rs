//! In-process repository adapter.
//!
//! [`InMemoryStore`] implements every repository port over one mutex, so
//! each call observes and produces a consistent snapshot and multi-row
//! writes are trivially atomic. It backs the integration tests and
//! deployments started with `GROCERY_IN_MEMORY=true`. Nothing survives a
//! restart.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    GroceryItemRepository, GroceryItemRepositoryError, RecipeRepository, RecipeRepositoryError,
    ShoppingListRepository, ShoppingListRepositoryError, TemplateRepository,
    TemplateRepositoryError,
};
use crate::domain::{
    GroceryItem, GroceryItemId, Recipe, RecipeId, ShoppingList, ShoppingListId, Template,
    TemplateId,
};

#[derive(Debug, Default)]
struct Tables {
    items: Vec<GroceryItem>,
    templates: Vec<Template>,
    recipes: Vec<Recipe>,
    lists: Vec<ShoppingList>,
}

/// Shared in-memory tables for all four aggregates.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Overwrite the row with the same id; report whether it existed.
fn replace_by<T, K: PartialEq>(rows: &mut [T], row: &T, key: impl Fn(&T) -> K) -> bool
where
    T: Clone,
{
    let wanted = key(row);
    match rows.iter_mut().find(|existing| key(existing) == wanted) {
        Some(slot) => {
            slot.clone_from(row);
            true
        }
        None => false,
    }
}

/// Remove the row with the given key; report whether it existed.
fn remove_by<T, K: PartialEq>(rows: &mut Vec<T>, wanted: &K, key: impl Fn(&T) -> K) -> bool {
    let before = rows.len();
    rows.retain(|row| key(row) != *wanted);
    rows.len() != before
}

#[async_trait]
impl GroceryItemRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<GroceryItem>, GroceryItemRepositoryError> {
        Ok(self.tables().items.clone())
    }

    async fn find_many(
        &self,
        ids: &[GroceryItemId],
    ) -> Result<Vec<GroceryItem>, GroceryItemRepositoryError> {
        let wanted: HashSet<&GroceryItemId> = ids.iter().collect();
        Ok(self
            .tables()
            .items
            .iter()
            .filter(|item| wanted.contains(&item.id))
            .cloned()
            .collect())
    }

    async fn insert(&self, item: &GroceryItem) -> Result<(), GroceryItemRepositoryError> {
        let mut tables = self.tables();
        if tables.items.iter().any(|existing| existing.id == item.id) {
            return Err(GroceryItemRepositoryError::query("row already exists"));
        }
        tables.items.push(item.clone());
        Ok(())
    }

    async fn update(&self, item: &GroceryItem) -> Result<bool, GroceryItemRepositoryError> {
        Ok(replace_by(&mut self.tables().items, item, |row| row.id))
    }

    async fn delete(&self, id: &GroceryItemId) -> Result<bool, GroceryItemRepositoryError> {
        Ok(remove_by(&mut self.tables().items, id, |row| row.id))
    }

    async fn delete_many(
        &self,
        ids: &[GroceryItemId],
    ) -> Result<usize, GroceryItemRepositoryError> {
        let wanted: HashSet<&GroceryItemId> = ids.iter().collect();
        let mut tables = self.tables();
        let before = tables.items.len();
        tables.items.retain(|item| !wanted.contains(&item.id));
        Ok(before - tables.items.len())
    }

    async fn apply_changes(
        &self,
        updates: &[GroceryItem],
        inserts: &[GroceryItem],
    ) -> Result<(), GroceryItemRepositoryError> {
        let mut tables = self.tables();
        for item in updates {
            replace_by(&mut tables.items, item, |row| row.id);
        }
        tables.items.extend_from_slice(inserts);
        Ok(())
    }

    async fn replace_all(&self, items: &[GroceryItem]) -> Result<(), GroceryItemRepositoryError> {
        self.tables().items = items.to_vec();
        Ok(())
    }
}

#[async_trait]
impl TemplateRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Template>, TemplateRepositoryError> {
        Ok(self.tables().templates.clone())
    }

    async fn find(&self, id: &TemplateId) -> Result<Option<Template>, TemplateRepositoryError> {
        Ok(self
            .tables()
            .templates
            .iter()
            .find(|template| template.id == *id)
            .cloned())
    }

    async fn insert(&self, template: &Template) -> Result<(), TemplateRepositoryError> {
        self.tables().templates.push(template.clone());
        Ok(())
    }

    async fn update(&self, template: &Template) -> Result<bool, TemplateRepositoryError> {
        Ok(replace_by(&mut self.tables().templates, template, |row| {
            row.id
        }))
    }

    async fn delete(&self, id: &TemplateId) -> Result<bool, TemplateRepositoryError> {
        Ok(remove_by(&mut self.tables().templates, id, |row| row.id))
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        Ok(self.tables().recipes.clone())
    }

    async fn find(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(self
            .tables()
            .recipes
            .iter()
            .find(|recipe| recipe.id == *id)
            .cloned())
    }

    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        self.tables().recipes.push(recipe.clone());
        Ok(())
    }

    async fn update(&self, recipe: &Recipe) -> Result<bool, RecipeRepositoryError> {
        Ok(replace_by(&mut self.tables().recipes, recipe, |row| row.id))
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        Ok(remove_by(&mut self.tables().recipes, id, |row| row.id))
    }
}

#[async_trait]
impl ShoppingListRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<ShoppingList>, ShoppingListRepositoryError> {
        // Reversed first so equal timestamps keep the latest insert first,
        // matching `ORDER BY created_at DESC, seq DESC`.
        let mut lists = self.tables().lists.clone();
        lists.reverse();
        lists.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(lists)
    }

    async fn find(
        &self,
        id: &ShoppingListId,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError> {
        Ok(self
            .tables()
            .lists
            .iter()
            .find(|list| list.id == *id)
            .cloned())
    }

    async fn insert(&self, list: &ShoppingList) -> Result<(), ShoppingListRepositoryError> {
        self.tables().lists.push(list.clone());
        Ok(())
    }

    async fn update(&self, list: &ShoppingList) -> Result<bool, ShoppingListRepositoryError> {
        Ok(replace_by(&mut self.tables().lists, list, |row| row.id))
    }

    async fn delete(&self, id: &ShoppingListId) -> Result<bool, ShoppingListRepositoryError> {
        Ok(remove_by(&mut self.tables().lists, id, |row| row.id))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::StoredTimestamp;

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn row(name: &str) -> GroceryItem {
        GroceryItem::new(GroceryItemId::random(), name, 1.0, "kg", false)
    }

    #[rstest]
    #[tokio::test]
    async fn rows_keep_insertion_order(store: InMemoryStore) {
        for name in ["Pommes", "Lait", "Pain"] {
            GroceryItemRepository::insert(&store, &row(name))
                .await
                .expect("insert");
        }
        let names: Vec<String> = GroceryItemRepository::list(&store)
            .await
            .expect("list")
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, ["Pommes", "Lait", "Pain"]);
    }

    #[rstest]
    #[tokio::test]
    async fn bulk_delete_counts_only_existing_rows(store: InMemoryStore) {
        let kept = row("Lait");
        let gone = row("Pain");
        GroceryItemRepository::insert(&store, &kept).await.expect("insert");
        GroceryItemRepository::insert(&store, &gone).await.expect("insert");

        let deleted = store
            .delete_many(&[gone.id, GroceryItemId::random()])
            .await
            .expect("bulk delete");
        assert_eq!(deleted, 1);
        assert_eq!(
            GroceryItemRepository::list(&store).await.expect("list"),
            vec![kept]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn equal_timestamps_list_the_latest_insert_first(store: InMemoryStore) {
        let created_at = StoredTimestamp::parse("2024-03-01 09:00:00").expect("timestamp");
        let ids: Vec<ShoppingListId> = (0..3).map(|_| ShoppingListId::random()).collect();
        for id in &ids {
            let list = ShoppingList {
                id: *id,
                created_at,
                items: Vec::new(),
            };
            ShoppingListRepository::insert(&store, &list)
                .await
                .expect("insert");
        }
        let listed: Vec<ShoppingListId> = ShoppingListRepository::list(&store)
            .await
            .expect("list")
            .iter()
            .map(|list| list.id)
            .collect();
        let expected: Vec<ShoppingListId> = ids.into_iter().rev().collect();
        assert_eq!(listed, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn history_lists_newest_first(store: InMemoryStore) {
        for stamp in ["2024-01-01 09:00:00", "2024-03-01 09:00:00", "2024-02-01 09:00:00"] {
            let list = ShoppingList {
                id: ShoppingListId::random(),
                created_at: StoredTimestamp::parse(stamp).expect("timestamp"),
                items: Vec::new(),
            };
            ShoppingListRepository::insert(&store, &list)
                .await
                .expect("insert");
        }
        let stamps: Vec<String> = ShoppingListRepository::list(&store)
            .await
            .expect("list")
            .iter()
            .map(|list| list.created_at.to_string())
            .collect();
        assert_eq!(
            stamps,
            ["2024-03-01 09:00:00", "2024-02-01 09:00:00", "2024-01-01 09:00:00"]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn updates_of_absent_rows_report_false(store: InMemoryStore) {
        let updated = GroceryItemRepository::update(&store, &row("Lait"))
            .await
            .expect("update");
        assert!(!updated);
        let deleted = TemplateRepository::delete(&store, &TemplateId::random())
            .await
            .expect("delete");
        assert!(!deleted);
    }
}
