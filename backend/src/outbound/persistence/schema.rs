//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Rows of the current grocery list.
    grocery_items (id) {
        id -> Uuid,
        /// Identity column giving insertion order.
        seq -> Int8,
        name -> Varchar,
        quantity -> Float8,
        unit -> Varchar,
        checked -> Bool,
        category -> Nullable<Varchar>,
    }
}

diesel::table! {
    templates (id) {
        id -> Uuid,
        name -> Varchar,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Item snapshots owned by a template, ordered by `position`.
    template_items (template_id, position) {
        template_id -> Uuid,
        position -> Int4,
        /// Grocery item the snapshot was taken from; not a foreign key.
        item_id -> Uuid,
        name -> Varchar,
        quantity -> Float8,
        unit -> Varchar,
    }
}

diesel::table! {
    recipes (id) {
        id -> Uuid,
        name -> Varchar,
        instructions -> Nullable<Text>,
        image -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    ingredients (id) {
        id -> Uuid,
        recipe_id -> Uuid,
        position -> Int4,
        name -> Varchar,
        quantity -> Float8,
        unit -> Varchar,
    }
}

diesel::table! {
    shopping_lists (id) {
        id -> Uuid,
        /// Identity column breaking `created_at` ties by insertion order.
        seq -> Int8,
        created_at -> Timestamp,
    }
}

diesel::table! {
    shopping_list_items (shopping_list_id, position) {
        shopping_list_id -> Uuid,
        position -> Int4,
        item_id -> Uuid,
        name -> Varchar,
        quantity -> Float8,
        unit -> Varchar,
        checked -> Bool,
    }
}

diesel::joinable!(template_items -> templates (template_id));
diesel::joinable!(ingredients -> recipes (recipe_id));
diesel::joinable!(shopping_list_items -> shopping_lists (shopping_list_id));

diesel::allow_tables_to_appear_in_same_query!(
    grocery_items,
    templates,
    template_items,
    recipes,
    ingredients,
    shopping_lists,
    shopping_list_items,
);
