//! Opaque identifiers for the persisted aggregates.
//!
//! Every identifier is a UUID newtype so the compiler keeps a template id from
//! being passed where a grocery item id is expected. Identifiers serialise as
//! bare UUID strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            ToSchema,
        )]
        #[serde(transparent)]
        #[schema(value_type = String, format = Uuid)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random (v4) identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Borrow the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

define_entity_id!(
    /// Identifier of a row on the current grocery list.
    ///
    /// Template and history snapshots reuse the id of the item they were
    /// taken from.
    GroceryItemId
);
define_entity_id!(
    /// Identifier of a saved template.
    TemplateId
);
define_entity_id!(
    /// Identifier of a recipe.
    RecipeId
);
define_entity_id!(
    /// Identifier of a single recipe ingredient.
    IngredientId
);
define_entity_id!(
    /// Identifier of a shopping history entry.
    ShoppingListId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_and_displays_uuid_text() {
        let raw = "6f1c2f7e-9a43-4b55-8d1f-0c7a3c1e2b44";
        let id: TemplateId = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case("42")]
    fn rejects_non_uuid_text(#[case] raw: &str) {
        assert!(raw.parse::<GroceryItemId>().is_err());
    }

    #[rstest]
    fn serialises_as_bare_string() {
        let id = RecipeId::from_uuid(Uuid::nil());
        let json = serde_json::to_value(id).expect("serialise id");
        assert_eq!(json, serde_json::json!("00000000-0000-0000-0000-000000000000"));
    }
}
