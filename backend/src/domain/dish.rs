//! Dishes on the menu.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::{Cook, CookId, DishId, DishType, DishTypeId, Ingredient, IngredientId, Price, RecordName};

/// A dish with its (required) dish type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    /// Store identifier.
    pub id: DishId,
    /// Display name; not unique.
    pub name: RecordName,
    /// Free text.
    pub description: String,
    /// Non-negative price.
    pub price: Price,
    /// Category.
    pub dish_type: DishType,
}

impl fmt::Display for Dish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.price)
    }
}

/// A dish with both sides of its many-to-many relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishDetail {
    /// The dish.
    #[serde(flatten)]
    pub dish: Dish,
    /// Cooks assigned to the dish, ordered by username.
    pub cooks: Vec<Cook>,
    /// Ingredients, ordered by name.
    pub ingredients: Vec<Ingredient>,
}

impl DishDetail {
    /// Whether `cook` is currently assigned.
    #[must_use]
    pub fn is_cooked_by(&self, cook: CookId) -> bool {
        self.cooks.iter().any(|candidate| candidate.id == cook)
    }
}

/// Validated dish form; `update` replaces both relation sets wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishDraft {
    /// Display name.
    pub name: RecordName,
    /// Free text.
    pub description: String,
    /// Price.
    pub price: Price,
    /// Required category reference.
    pub dish_type_id: DishTypeId,
    /// Assigned cooks.
    pub cook_ids: BTreeSet<CookId>,
    /// Ingredients.
    pub ingredient_ids: BTreeSet<IngredientId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_price() {
        let dish = Dish {
            id: DishId::new(3),
            name: RecordName::new("Pasta").expect("name"),
            description: String::new(),
            price: "9.5".parse().expect("price"),
            dish_type: DishType {
                id: DishTypeId::new(1),
                name: RecordName::new("Main").expect("name"),
            },
        };
        assert_eq!(dish.to_string(), "Pasta (9.50)");
    }
}
