//! Diesel table definitions for the kitchen schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Kitchen staff accounts.
    cooks (id) {
        id -> Int8,
        /// Unique login name.
        username -> Varchar,
        /// Argon2id PHC string.
        password_digest -> Text,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Nullable<Varchar>,
        /// Constrained to 0..=50 by `cooks_years_of_experience_check`.
        years_of_experience -> Int4,
    }
}

diesel::table! {
    /// Dish categories; names are unique.
    dish_types (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Ingredients; names are unique.
    ingredients (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Menu dishes. Deleting a referenced dish type is restricted.
    dishes (id) {
        id -> Int8,
        name -> Varchar,
        description -> Text,
        /// Price in cents.
        price_cents -> Int8,
        dish_type_id -> Int8,
    }
}

diesel::table! {
    /// Cook to dish assignments.
    dishes_cooks (dish_id, cook_id) {
        dish_id -> Int8,
        cook_id -> Int8,
    }
}

diesel::table! {
    /// Dish to ingredient links.
    dishes_ingredients (dish_id, ingredient_id) {
        dish_id -> Int8,
        ingredient_id -> Int8,
    }
}

diesel::joinable!(dishes -> dish_types (dish_type_id));
diesel::joinable!(dishes_cooks -> cooks (cook_id));
diesel::joinable!(dishes_cooks -> dishes (dish_id));
diesel::joinable!(dishes_ingredients -> dishes (dish_id));
diesel::joinable!(dishes_ingredients -> ingredients (ingredient_id));

diesel::allow_tables_to_appear_in_same_query!(
    cooks,
    dish_types,
    dishes,
    dishes_cooks,
    dishes_ingredients,
    ingredients,
);

diesel::define_sql_function! {
    /// `lower(text)`; ASCII-only under the `"C"` collation every listed name
    /// column is declared with.
    #[sql_name = "lower"]
    fn fold_case(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}
