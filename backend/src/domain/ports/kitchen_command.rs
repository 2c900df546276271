//! Driving port for kitchen write use-cases.

use async_trait::async_trait;

use crate::domain::{
    AssignmentOutcome, Cook, CookId, CookProfile, Dish, DishDraft, DishId, DishType, DishTypeId,
    Error, Ingredient, IngredientId, NewCook, RecordName,
};

/// Domain use-case port for changing kitchen records.
///
/// Inputs arrive already validated as value objects; implementations add the
/// checks that need the store (references, uniqueness, existence).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KitchenCommand: Send + Sync {
    /// Register a cook account.
    async fn register_cook(&self, cook: NewCook) -> Result<Cook, Error>;

    /// Update a cook's profile and experience.
    async fn update_cook(&self, id: CookId, profile: CookProfile) -> Result<Cook, Error>;

    /// Delete a cook.
    async fn delete_cook(&self, id: CookId) -> Result<(), Error>;

    /// Create a dish.
    async fn create_dish(&self, draft: DishDraft) -> Result<Dish, Error>;

    /// Update a dish, replacing its cook and ingredient sets.
    async fn update_dish(&self, id: DishId, draft: DishDraft) -> Result<Dish, Error>;

    /// Delete a dish.
    async fn delete_dish(&self, id: DishId) -> Result<(), Error>;

    /// Create a dish type.
    async fn create_dish_type(&self, name: RecordName) -> Result<DishType, Error>;

    /// Rename a dish type.
    async fn update_dish_type(&self, id: DishTypeId, name: RecordName) -> Result<DishType, Error>;

    /// Delete a dish type that no dish uses.
    async fn delete_dish_type(&self, id: DishTypeId) -> Result<(), Error>;

    /// Create an ingredient.
    async fn create_ingredient(&self, name: RecordName) -> Result<Ingredient, Error>;

    /// Rename an ingredient.
    async fn update_ingredient(
        &self,
        id: IngredientId,
        name: RecordName,
    ) -> Result<Ingredient, Error>;

    /// Delete an ingredient.
    async fn delete_ingredient(&self, id: IngredientId) -> Result<(), Error>;

    /// Flip whether `cook` is assigned to `dish`.
    async fn toggle_assignment(&self, cook: CookId, dish: DishId)
    -> Result<AssignmentOutcome, Error>;
}
