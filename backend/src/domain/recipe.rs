//! Recipes and their ingredients.

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use super::grocery_item::ItemFields;
use super::merge::Mergeable;
use super::{IngredientId, RecipeId, StoredTimestamp};

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Identifier, regenerated whenever the ingredient list is replaced.
    pub id: IngredientId,
    /// Product name.
    pub name: String,
    /// Amount in `unit`.
    pub quantity: f64,
    /// Unit.
    pub unit: String,
}

impl Ingredient {
    /// Materialise validated fields under a fresh identifier.
    #[must_use]
    pub fn from_fields(fields: ItemFields) -> Self {
        Self {
            id: IngredientId::random(),
            name: fields.name,
            quantity: fields.quantity,
            unit: fields.unit,
        }
    }
}

impl Mergeable for Ingredient {
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

/// A recipe with an ordered ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Identifier.
    pub id: RecipeId,
    /// Display name.
    #[schema(example = "Crêpes")]
    pub name: String,
    /// Ingredients in display order.
    pub ingredients: Vec<Ingredient>,
    /// Free-text preparation steps.
    #[serde(default)]
    pub instructions: Option<String>,
    /// Absolute URI of an illustration.
    #[serde(default)]
    pub image: Option<String>,
    /// Creation time in stored format.
    pub created_at: StoredTimestamp,
}

/// Validation failures for recipe payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    /// Name is empty once trimmed.
    #[error("recipe name must not be blank")]
    BlankName,
    /// Image is not an absolute URI.
    #[error("image must be an absolute URI: {value}")]
    InvalidImage {
        /// Rejected value.
        value: String,
    },
}

/// Validated recipe payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    name: String,
    ingredients: Vec<ItemFields>,
    instructions: Option<String>,
    image: Option<String>,
    created_at: Option<StoredTimestamp>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

impl RecipeDraft {
    /// Validate the payload. Blank instructions or image count as absent;
    /// `created_at` may be omitted on updates to keep the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeValidationError`] for a blank name or an image that
    /// does not parse as an absolute URI.
    pub fn try_new(
        name: &str,
        ingredients: Vec<ItemFields>,
        instructions: Option<String>,
        image: Option<String>,
        created_at: Option<StoredTimestamp>,
    ) -> Result<Self, RecipeValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecipeValidationError::BlankName);
        }
        let image = non_blank(image);
        if let Some(value) = &image {
            if Url::parse(value).is_err() {
                return Err(RecipeValidationError::InvalidImage {
                    value: value.clone(),
                });
            }
        }
        Ok(Self {
            name: name.to_owned(),
            ingredients,
            instructions: non_blank(instructions),
            image,
            created_at,
        })
    }

    /// Requested creation time, if any.
    #[must_use]
    pub const fn created_at(&self) -> Option<StoredTimestamp> {
        self.created_at
    }

    /// Materialise the draft. Ingredients receive fresh identifiers.
    #[must_use]
    pub fn into_recipe(self, id: RecipeId, created_at: StoredTimestamp) -> Recipe {
        Recipe {
            id,
            name: self.name,
            ingredients: self
                .ingredients
                .into_iter()
                .map(Ingredient::from_fields)
                .collect(),
            instructions: self.instructions,
            image: self.image,
            created_at,
        }
    }
}
