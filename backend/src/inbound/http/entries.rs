//! Request DTO for template and history item entries.
//!
//! An entry is either a bare grocery item id (resolved against the current
//! list when written) or an inline snapshot object.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{FieldName, Nested, item_validation_error, require_nested};
use crate::domain::{Error, GroceryItemId, ItemEntry, ItemFields, SnapshotEntry};

/// One element of an `items` array.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum EntryBody {
    /// Identifier of a row on the current list.
    Reference(String),
    /// Inline snapshot.
    Snapshot(SnapshotBody),
}

/// Inline snapshot of a list row.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotBody {
    /// Source row identifier. Values that are not identifiers are dropped.
    #[schema(format = "uuid")]
    pub id: Option<String>,
    /// Product name.
    pub name: Option<String>,
    /// Amount in `unit`.
    pub quantity: Option<f64>,
    /// Unit.
    pub unit: Option<String>,
    /// Bought flag; ignored by templates.
    pub checked: Option<bool>,
}

impl SnapshotBody {
    fn into_entry(self, nested: Nested) -> Result<SnapshotEntry, Error> {
        let name = require_nested(self.name, FieldName::new("name"), nested)?;
        let quantity = require_nested(self.quantity, FieldName::new("quantity"), nested)?;
        let unit = require_nested(self.unit, FieldName::new("unit"), nested)?;
        let fields = ItemFields::try_new(&name, quantity, &unit)
            .map_err(|error| item_validation_error(&error, Some(nested)))?;
        Ok(SnapshotEntry {
            id: self
                .id
                .and_then(|raw| raw.parse::<GroceryItemId>().ok()),
            fields,
            checked: self.checked,
        })
    }
}

/// Validate an `items` array into domain entries, preserving order.
pub(crate) fn parse_entries(
    entries: Vec<EntryBody>,
    parent: FieldName,
) -> Result<Vec<ItemEntry>, Error> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            EntryBody::Reference(raw) => Ok(ItemEntry::Reference(raw)),
            EntryBody::Snapshot(snapshot) => snapshot
                .into_entry(Nested { parent, index })
                .map(ItemEntry::Snapshot),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> Result<Vec<ItemEntry>, Error> {
        let bodies: Vec<EntryBody> = serde_json::from_value(value).expect("entries decode");
        parse_entries(bodies, FieldName::new("items"))
    }

    #[test]
    fn strings_and_objects_decode_side_by_side() {
        let id = GroceryItemId::random();
        let entries = parse(json!([
            id.to_string(),
            {"id": id.to_string(), "name": " Lait ", "quantity": 1, "unit": "l", "checked": true},
        ]))
        .expect("valid entries");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ItemEntry::Reference(id.to_string()));
        let ItemEntry::Snapshot(snapshot) = &entries[1] else {
            panic!("second entry should be a snapshot");
        };
        assert_eq!(snapshot.id, Some(id));
        assert_eq!(snapshot.fields.name, "Lait");
        assert_eq!(snapshot.checked, Some(true));
    }

    #[test]
    fn snapshot_ids_that_are_not_uuids_are_dropped() {
        let entries = parse(json!([{"id": "17", "name": "Pain", "quantity": 2, "unit": "pièce(s)"}]))
            .expect("valid entries");
        let ItemEntry::Snapshot(snapshot) = &entries[0] else {
            panic!("entry should be a snapshot");
        };
        assert_eq!(snapshot.id, None);
    }

    #[test]
    fn missing_snapshot_fields_name_the_entry() {
        let error = parse(json!([
            {"name": "Pain", "quantity": 2, "unit": "pièce(s)"},
            {"name": "Beurre", "unit": "g"},
        ]))
        .expect_err("quantity missing");
        assert_eq!(error.message(), "missing required field: items[1].quantity");
    }

    #[test]
    fn invalid_snapshot_values_are_rejected() {
        let error = parse(json!([{"name": "Beurre", "quantity": -1, "unit": "g"}]))
            .expect_err("negative quantity");
        assert_eq!(
            error.details(),
            Some(&json!({"field": "items[0].quantity", "code": "invalid_value"}))
        );
    }
}
