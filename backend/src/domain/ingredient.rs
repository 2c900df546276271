//! Ingredients used by dishes.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::{IngredientId, RecordName};

/// A single ingredient; names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Ingredient {
    /// Store identifier.
    pub id: IngredientId,
    /// Unique display name.
    pub name: RecordName,
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
