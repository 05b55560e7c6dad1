//! Item entries accepted by template and history payloads.
//!
//! A payload entry is either a bare reference to a row on the current list
//! or a self-contained snapshot. References are resolved against the list at
//! write time so stored templates and history entries never depend on rows
//! that may later be deleted.

use std::collections::{HashMap, HashSet};

use serde_json::json;

use super::grocery_item::ItemFields;
use super::ports::GroceryItemRepository;
use super::{Error, GroceryItem, GroceryItemId};

/// Snapshot supplied inline by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    /// Identifier of the list row the snapshot came from, if known.
    pub id: Option<GroceryItemId>,
    /// Validated descriptive fields.
    pub fields: ItemFields,
    /// Bought flag, where the target tracks one.
    pub checked: Option<bool>,
}

/// One entry of a template or history payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEntry {
    /// Raw identifier of a row on the current list.
    Reference(String),
    /// Inline snapshot.
    Snapshot(SnapshotEntry),
}

/// Entry after references have been replaced by the rows they name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    /// Identifier carried into the snapshot.
    pub id: GroceryItemId,
    /// Descriptive fields.
    pub fields: ItemFields,
    /// Bought flag; `false` for snapshots that did not carry one.
    pub checked: bool,
}

impl ResolvedEntry {
    fn from_item(item: &GroceryItem) -> Self {
        Self {
            id: item.id,
            fields: ItemFields {
                name: item.name.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
            },
            checked: item.checked,
        }
    }

    fn from_snapshot(snapshot: SnapshotEntry) -> Self {
        Self {
            id: snapshot.id.unwrap_or_else(GroceryItemId::random),
            fields: snapshot.fields,
            checked: snapshot.checked.unwrap_or(false),
        }
    }
}

/// Error returned when references name rows that do not exist.
pub(crate) fn missing_items_error(missing: &[String]) -> Error {
    Error::invalid_request("some referenced grocery items do not exist").with_details(json!({
        "code": "missing_items",
        "missingIds": missing,
    }))
}

/// Resolve references in `entries` against the current list, preserving order.
///
/// Unparseable identifiers can never match a row and are reported as missing
/// alongside unknown ones.
///
/// # Errors
///
/// Returns an invalid-request error listing every missing identifier, or an
/// internal error when the repository fails.
pub(crate) async fn resolve_entries<G>(
    repo: &G,
    entries: Vec<ItemEntry>,
) -> Result<Vec<ResolvedEntry>, Error>
where
    G: GroceryItemRepository + ?Sized,
{
    let wanted: Vec<GroceryItemId> = entries
        .iter()
        .filter_map(|entry| match entry {
            ItemEntry::Reference(raw) => raw.parse().ok(),
            ItemEntry::Snapshot(_) => None,
        })
        .collect();

    let found: HashMap<GroceryItemId, GroceryItem> = if wanted.is_empty() {
        HashMap::new()
    } else {
        repo.find_many(&wanted)
            .await
            .map_err(|err| Error::internal(format!("grocery item lookup failed: {err}")))?
            .into_iter()
            .map(|item| (item.id, item))
            .collect()
    };

    // Request order, each identifier once.
    let mut seen: HashSet<&str> = HashSet::new();
    let missing: Vec<String> = entries
        .iter()
        .filter_map(|entry| match entry {
            ItemEntry::Reference(raw) => Some(raw.as_str()),
            ItemEntry::Snapshot(_) => None,
        })
        .filter(|raw| {
            !raw.parse::<GroceryItemId>()
                .is_ok_and(|id| found.contains_key(&id))
        })
        .filter(|raw| seen.insert(*raw))
        .map(str::to_owned)
        .collect();
    if !missing.is_empty() {
        return Err(missing_items_error(&missing));
    }

    entries
        .into_iter()
        .map(|entry| match entry {
            ItemEntry::Snapshot(snapshot) => Ok(ResolvedEntry::from_snapshot(snapshot)),
            ItemEntry::Reference(raw) => raw
                .parse::<GroceryItemId>()
                .ok()
                .and_then(|id| found.get(&id))
                .map(ResolvedEntry::from_item)
                .ok_or_else(|| missing_items_error(&[raw])),
        })
        .collect()
}
