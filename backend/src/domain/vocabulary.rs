//! Fixed vocabularies offered by the client when entering items.
//!
//! Units stay free-form on write; these lists only seed pickers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Units offered by default.
pub const COMMON_UNITS: [&str; 10] = [
    "g",
    "kg",
    "ml",
    "l",
    "pièce(s)",
    "tranche(s)",
    "boîte(s)",
    "bouteille(s)",
    "sachet(s)",
    "pot(s)",
];

/// Shelf categories offered by default.
pub const FOOD_CATEGORIES: [&str; 8] = [
    "Fruits & Légumes",
    "Viandes & Poissons",
    "Produits laitiers",
    "Épicerie",
    "Boissons",
    "Surgelés",
    "Produits d'entretien",
    "Autre",
];

/// Both vocabularies, as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Vocabulary {
    /// Suggested units.
    pub units: Vec<String>,
    /// Suggested categories.
    pub categories: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            units: COMMON_UNITS.iter().map(|&unit| unit.to_owned()).collect(),
            categories: FOOD_CATEGORIES
                .iter()
                .map(|&category| category.to_owned())
                .collect(),
        }
    }
}
