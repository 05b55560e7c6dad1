//! Tests for the grocery list service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockGroceryItemRepository;

fn make_service(repo: MockGroceryItemRepository) -> GroceryItemService<MockGroceryItemRepository> {
    GroceryItemService::new(Arc::new(repo))
}

fn draft(name: &str, quantity: f64, unit: &str) -> GroceryItemDraft {
    GroceryItemDraft::try_new(name, quantity, unit, false, None).expect("valid draft")
}

#[tokio::test]
async fn create_assigns_a_fresh_id_and_stores_the_row() {
    let mut repo = MockGroceryItemRepository::new();
    repo.expect_insert()
        .withf(|item| item.name == "Pommes" && item.quantity == 2.0)
        .times(1)
        .return_once(|_| Ok(()));

    let item = make_service(repo)
        .create(draft("Pommes", 2.0, "kg"))
        .await
        .expect("create succeeds");
    assert_eq!(item.unit, "kg");
    assert!(!item.checked);
}

#[tokio::test]
async fn update_of_absent_row_is_not_found() {
    let mut repo = MockGroceryItemRepository::new();
    repo.expect_update().times(1).return_once(|_| Ok(false));

    let err = make_service(repo)
        .update(GroceryItemId::random(), draft("Lait", 1.0, "l"))
        .await
        .expect_err("absent row");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_absence(#[case] existed: bool, #[case] expected: Option<ErrorCode>) {
    let mut repo = MockGroceryItemRepository::new();
    repo.expect_delete().times(1).return_once(move |_| Ok(existed));

    let result = make_service(repo).delete(GroceryItemId::random()).await;
    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[tokio::test]
async fn repository_failures_become_internal_errors() {
    let mut repo = MockGroceryItemRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Err(GroceryItemRepositoryError::connection("pool exhausted")));

    let err = GroceryItemsQuery::list(&make_service(repo))
        .await
        .expect_err("failure surfaces");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(err.message().contains("pool exhausted"));
}

#[tokio::test]
async fn accumulate_grows_the_matching_row() {
    let existing = GroceryItem::new(GroceryItemId::random(), "Pommes", 2.0, "kg", true);
    let existing_id = existing.id;
    let mut repo = MockGroceryItemRepository::new();
    repo.expect_list().times(1).return_once(move || Ok(vec![existing]));
    repo.expect_update()
        .withf(move |item| item.id == existing_id && item.quantity == 3.0 && item.checked)
        .times(1)
        .return_once(|_| Ok(true));
    repo.expect_insert().never();

    let outcome = make_service(repo)
        .accumulate(draft(" pommes ", 1.0, "KG"))
        .await
        .expect("accumulate succeeds");
    assert!(!outcome.created);
    assert_eq!(outcome.item.id, existing_id);
    assert_eq!(outcome.item.name, "Pommes");
}

#[tokio::test]
async fn accumulate_inserts_when_no_row_matches() {
    let existing = GroceryItem::new(GroceryItemId::random(), "Pommes", 2.0, "kg", false);
    let mut repo = MockGroceryItemRepository::new();
    repo.expect_list().times(1).return_once(move || Ok(vec![existing]));
    repo.expect_insert().times(1).return_once(|_| Ok(()));
    repo.expect_update().never();

    let outcome = make_service(repo)
        .accumulate(draft("Pommes", 500.0, "g"))
        .await
        .expect("accumulate succeeds");
    assert!(outcome.created);
    assert_eq!(outcome.item.unit, "g");
}

#[tokio::test]
async fn lookup_keeps_request_order_and_reports_missing_ids() {
    let lait = GroceryItem::new(GroceryItemId::random(), "Lait", 1.0, "l", false);
    let pain = GroceryItem::new(GroceryItemId::random(), "Pain", 2.0, "pièce(s)", false);
    let unknown = GroceryItemId::random().to_string();
    let ids = vec![
        pain.id.to_string(),
        "not-a-uuid".to_owned(),
        lait.id.to_string(),
        unknown.clone(),
    ];
    let stored = vec![lait.clone(), pain.clone()];
    let mut repo = MockGroceryItemRepository::new();
    repo.expect_find_many()
        .withf(|wanted| wanted.len() == 3)
        .times(1)
        .return_once(move |_| Ok(stored));

    let lookup = make_service(repo).lookup(ids).await.expect("lookup succeeds");
    assert_eq!(lookup.items, vec![pain, lait]);
    assert_eq!(lookup.missing_ids, vec!["not-a-uuid".to_owned(), unknown]);
}

#[tokio::test]
async fn bulk_delete_of_nothing_skips_the_repository() {
    let mut repo = MockGroceryItemRepository::new();
    repo.expect_delete_many().never();

    let deleted = make_service(repo)
        .delete_many(Vec::new())
        .await
        .expect("empty delete");
    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn summary_merges_before_splitting() {
    let rows = vec![
        GroceryItem::new(GroceryItemId::random(), "Pommes", 2.0, "kg", true),
        GroceryItem::new(GroceryItemId::random(), "pommes", 1.0, "kg", false),
        GroceryItem::new(GroceryItemId::random(), "Lait", 1.0, "l", true),
    ];
    let mut repo = MockGroceryItemRepository::new();
    repo.expect_list().times(1).return_once(move || Ok(rows));

    let summary = make_service(repo).summary().await.expect("summary");
    assert_eq!(summary.total_items, 2);
    assert_eq!(summary.bought_items, 1);
    assert_eq!(summary.to_buy[0].quantity, 3.0);
}
