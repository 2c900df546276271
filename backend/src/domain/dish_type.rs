//! Dish categories.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::{DishTypeId, RecordName};

/// A category such as "Soup" or "Dessert"; names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DishType {
    /// Store identifier.
    pub id: DishTypeId,
    /// Unique display name.
    pub name: RecordName,
}

impl fmt::Display for DishType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
