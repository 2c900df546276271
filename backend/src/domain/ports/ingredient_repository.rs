//! Driven port for ingredient persistence.

use std::collections::BTreeSet;

use async_trait::async_trait;
use pagination::{Page, PageSelector, Paginator};

use crate::domain::{Ingredient, IngredientId, RecordName, SearchFilter};

use super::KitchenRepositoryError;

/// Ingredient storage. Names are unique; listings order by name, then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Number of ingredients whose name matches `filter`.
    async fn count(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError>;

    /// The requested page of matching ingredients with the totals it was cut
    /// from, read from one consistent snapshot of the store.
    async fn list_page(
        &self,
        filter: &SearchFilter,
        page: PageSelector,
        paginator: Paginator,
    ) -> Result<Page<Ingredient>, KitchenRepositoryError>;

    /// Every ingredient, in listing order.
    async fn all(&self) -> Result<Vec<Ingredient>, KitchenRepositoryError>;

    /// Fetch one ingredient.
    async fn find_by_id(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError>;

    /// Fetch the ingredients among `ids` that exist.
    async fn find_many(
        &self,
        ids: &BTreeSet<IngredientId>,
    ) -> Result<Vec<Ingredient>, KitchenRepositoryError>;

    /// Insert an ingredient.
    async fn create(&self, name: &RecordName) -> Result<Ingredient, KitchenRepositoryError>;

    /// Rename an ingredient; `None` when missing.
    async fn update(
        &self,
        id: IngredientId,
        name: &RecordName,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError>;

    /// Remove an ingredient and its dish links; `false` when nothing was deleted.
    async fn delete(&self, id: IngredientId) -> Result<bool, KitchenRepositoryError>;
}
