//! Record identifiers.
//!
//! Every kitchen entity is keyed by a database-assigned `BIGSERIAL`. Each kind
//! gets its own newtype so a dish id can never be passed where a cook id is
//! expected.

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Raw store identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

record_id!(
    /// Identifier of a [`Cook`](super::Cook).
    CookId
);
record_id!(
    /// Identifier of a [`Dish`](super::Dish).
    DishId
);
record_id!(
    /// Identifier of a [`DishType`](super::DishType).
    DishTypeId
);
record_id!(
    /// Identifier of an [`Ingredient`](super::Ingredient).
    IngredientId
);
