//! Driving port for kitchen read use-cases.
//!
//! Inbound adapters list, search and display records through this port
//! without knowing which entity store backs it.

use async_trait::async_trait;
use pagination::Page;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Cook, CookDetail, CookId, Dish, DishDetail, DishId, DishType, DishTypeId, Error, Ingredient,
    IngredientId, ListingQuery,
};

/// Record totals shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KitchenCounts {
    /// Number of cooks.
    pub num_cooks: u64,
    /// Number of dishes.
    pub num_dishes: u64,
    /// Number of dish types.
    pub num_dish_types: u64,
    /// Number of ingredients.
    pub num_ingredients: u64,
}

/// Options offered by the dish form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishFormChoices {
    /// Selectable dish types.
    pub dish_types: Vec<DishType>,
    /// Selectable cooks.
    pub cooks: Vec<Cook>,
    /// Selectable ingredients.
    pub ingredients: Vec<Ingredient>,
}

/// Domain use-case port for reading kitchen records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KitchenQuery: Send + Sync {
    /// Totals for the home page.
    async fn counts(&self) -> Result<KitchenCounts, Error>;

    /// One page of cooks filtered by username.
    async fn list_cooks(&self, query: &ListingQuery) -> Result<Page<Cook>, Error>;

    /// One page of dishes filtered by name.
    async fn list_dishes(&self, query: &ListingQuery) -> Result<Page<Dish>, Error>;

    /// One page of dish types filtered by name.
    async fn list_dish_types(&self, query: &ListingQuery) -> Result<Page<DishType>, Error>;

    /// One page of ingredients filtered by name.
    async fn list_ingredients(&self, query: &ListingQuery) -> Result<Page<Ingredient>, Error>;

    /// A cook, for the edit form.
    async fn cook(&self, id: CookId) -> Result<Cook, Error>;

    /// A cook with assigned dishes.
    async fn cook_detail(&self, id: CookId) -> Result<CookDetail, Error>;

    /// A dish with cooks and ingredients.
    async fn dish_detail(&self, id: DishId) -> Result<DishDetail, Error>;

    /// A dish type, for the edit form.
    async fn dish_type(&self, id: DishTypeId) -> Result<DishType, Error>;

    /// An ingredient, for the edit form.
    async fn ingredient(&self, id: IngredientId) -> Result<Ingredient, Error>;

    /// Choices for the dish form selects.
    async fn dish_form_choices(&self) -> Result<DishFormChoices, Error>;
}
