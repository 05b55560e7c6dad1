//! Rows of the current grocery list.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::GroceryItemId;
use super::merge::Mergeable;

/// Validation failures for item-like payloads (list rows, template entries,
/// ingredients).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItemValidationError {
    /// Name is empty once trimmed.
    #[error("name must not be blank")]
    BlankName,
    /// Unit is empty once trimmed.
    #[error("unit must not be blank")]
    BlankUnit,
    /// Quantity is zero, negative, NaN or infinite.
    #[error("quantity must be a positive number, got {quantity}")]
    InvalidQuantity {
        /// Rejected value.
        quantity: f64,
    },
}

impl ItemValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankName => "name",
            Self::BlankUnit => "unit",
            Self::InvalidQuantity { .. } => "quantity",
        }
    }
}

/// Validated name, quantity and unit shared by every item-like draft.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    /// Trimmed, non-blank name.
    pub name: String,
    /// Finite, strictly positive quantity.
    pub quantity: f64,
    /// Trimmed, non-blank unit.
    pub unit: String,
}

impl ItemFields {
    /// Validate raw input.
    ///
    /// # Errors
    ///
    /// Returns [`ItemValidationError`] for a blank name or unit or a quantity
    /// that is not a positive finite number.
    pub fn try_new(name: &str, quantity: f64, unit: &str) -> Result<Self, ItemValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ItemValidationError::BlankName);
        }
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(ItemValidationError::InvalidQuantity { quantity });
        }
        let unit = unit.trim();
        if unit.is_empty() {
            return Err(ItemValidationError::BlankUnit);
        }
        Ok(Self {
            name: name.to_owned(),
            quantity,
            unit: unit.to_owned(),
        })
    }
}

/// A row on the current shopping list.
///
/// ## Invariants
/// - `name` and `unit` are trimmed and non-blank.
/// - `quantity` is finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    /// Server-generated identifier.
    pub id: GroceryItemId,
    /// Product name.
    #[schema(example = "Pommes")]
    pub name: String,
    /// Amount expressed in `unit`.
    #[schema(example = 2.0)]
    pub quantity: f64,
    /// Free-form unit, usually one of the vocabulary units.
    #[schema(example = "kg")]
    pub unit: String,
    /// Whether the item has already been bought.
    #[serde(default)]
    pub checked: bool,
    /// Optional shelf category.
    #[serde(default)]
    pub category: Option<String>,
}

impl GroceryItem {
    /// Assemble an item without a category.
    pub fn new(
        id: GroceryItemId,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        checked: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            unit: unit.into(),
            checked,
            category: None,
        }
    }
}

impl Mergeable for GroceryItem {
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

    fn checked(&self) -> Option<bool> {
        Some(self.checked)
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

/// Validated input for creating or replacing a list row.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryItemDraft {
    fields: ItemFields,
    checked: bool,
    category: Option<String>,
}

impl GroceryItemDraft {
    /// Validate raw input. A blank category is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ItemValidationError`] when name, quantity or unit are invalid.
    ///
    /// # Examples
    /// ```
    /// use grocery_backend::domain::GroceryItemDraft;
    ///
    /// let draft = GroceryItemDraft::try_new(" Lait ", 1.0, "l", false, Some("  ".into()))
    ///     .expect("valid draft");
    /// assert_eq!(draft.name(), "Lait");
    /// assert_eq!(draft.category(), None);
    /// assert!(GroceryItemDraft::try_new("Lait", 0.0, "l", false, None).is_err());
    /// ```
    pub fn try_new(
        name: &str,
        quantity: f64,
        unit: &str,
        checked: bool,
        category: Option<String>,
    ) -> Result<Self, ItemValidationError> {
        let fields = ItemFields::try_new(name, quantity, unit)?;
        let category = category
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        Ok(Self {
            fields,
            checked,
            category,
        })
    }

    /// Build an unchecked, uncategorised draft from already-validated fields.
    #[must_use]
    pub const fn from_fields(fields: ItemFields) -> Self {
        Self {
            fields,
            checked: false,
            category: None,
        }
    }

    /// Trimmed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.fields.name
    }

    /// Validated quantity.
    #[must_use]
    pub const fn quantity(&self) -> f64 {
        self.fields.quantity
    }

    /// Trimmed unit.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.fields.unit
    }

    /// Requested bought flag.
    #[must_use]
    pub const fn checked(&self) -> bool {
        self.checked
    }

    /// Normalised category.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Materialise the draft under `id`.
    #[must_use]
    pub fn into_item(self, id: GroceryItemId) -> GroceryItem {
        GroceryItem {
            id,
            name: self.fields.name,
            quantity: self.fields.quantity,
            unit: self.fields.unit,
            checked: self.checked,
            category: self.category,
        }
    }
}

impl Mergeable for GroceryItemDraft {
    fn name(&self) -> &str {
        &self.fields.name
    }

    fn unit(&self) -> &str {
        &self.fields.unit
    }

    fn quantity(&self) -> f64 {
        self.fields.quantity
    }

    fn set_quantity(&mut self, quantity: f64) {
        self.fields.quantity = quantity;
    }

    fn checked(&self) -> Option<bool> {
        Some(self.checked)
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}
