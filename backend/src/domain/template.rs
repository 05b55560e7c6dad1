//! Reusable templates: named snapshots used to repopulate the list.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::item_entry::{ItemEntry, ResolvedEntry};
use super::merge::{Mergeable, merge_by_identity};
use super::{GroceryItemId, StoredTimestamp, TemplateId};

/// Descriptive snapshot of a list row, without bought flag or category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItem {
    /// Id of the list row the snapshot was taken from.
    pub id: GroceryItemId,
    /// Product name.
    pub name: String,
    /// Amount in `unit`.
    pub quantity: f64,
    /// Unit.
    pub unit: String,
}

impl From<ResolvedEntry> for TemplateItem {
    fn from(entry: ResolvedEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.fields.name,
            quantity: entry.fields.quantity,
            unit: entry.fields.unit,
        }
    }
}

impl Mergeable for TemplateItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn unit(&self) -> &str {
        &self.unit
    }

    fn quantity(&self) -> f64 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
    }
}

/// Named, ordered collection of item snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Identifier.
    pub id: TemplateId,
    /// Display name.
    #[schema(example = "Courses de la semaine")]
    pub name: String,
    /// Creation time in stored format.
    pub created_at: StoredTimestamp,
    /// Raw snapshots in insertion order; duplicates are allowed.
    pub items: Vec<TemplateItem>,
}

impl Template {
    /// Items merged by identity, as shown in detail views and loaded onto
    /// the list.
    #[must_use]
    pub fn merged_items(&self) -> Vec<TemplateItem> {
        merge_by_identity(self.items.iter().cloned())
    }
}

/// Template with its merged view, returned by detail lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetail {
    /// Stored template.
    #[serde(flatten)]
    pub template: Template,
    /// Items merged by identity.
    pub merged_items: Vec<TemplateItem>,
    /// Number of merged groups.
    pub item_count: usize,
}

impl From<Template> for TemplateDetail {
    fn from(template: Template) -> Self {
        let merged_items = template.merged_items();
        Self {
            item_count: merged_items.len(),
            merged_items,
            template,
        }
    }
}

/// How a template is loaded onto the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMode {
    /// Discard the list and load the template's merged items, unchecked.
    #[default]
    Replace,
    /// Merge the template into the list, summing quantities per identity.
    Append,
}

/// Validation failures for template payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateValidationError {
    /// Name is empty once trimmed.
    #[error("template name must not be blank")]
    BlankName,
}

/// Validated template payload; references are still unresolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDraft {
    name: String,
    created_at: StoredTimestamp,
    entries: Vec<ItemEntry>,
}

impl TemplateDraft {
    /// Validate the payload.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateValidationError::BlankName`] for a blank name.
    pub fn try_new(
        name: &str,
        created_at: StoredTimestamp,
        entries: Vec<ItemEntry>,
    ) -> Result<Self, TemplateValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TemplateValidationError::BlankName);
        }
        Ok(Self {
            name: name.to_owned(),
            created_at,
            entries,
        })
    }

    /// Trimmed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> StoredTimestamp {
        self.created_at
    }

    /// Split into parts for resolution.
    #[must_use]
    pub fn into_parts(self) -> (String, StoredTimestamp, Vec<ItemEntry>) {
        (self.name, self.created_at, self.entries)
    }
}
