//! Driven port for dish persistence.

use async_trait::async_trait;
use pagination::{Page, PageSelector, Paginator};

use crate::domain::{Dish, DishDetail, DishDraft, DishId, SearchFilter};

use super::KitchenRepositoryError;

/// Dish storage. Listings order by name, then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishRepository: Send + Sync {
    /// Number of dishes whose name matches `filter`.
    async fn count(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError>;

    /// The requested page of matching dishes with the totals it was cut
    /// from, read from one consistent snapshot of the store.
    async fn list_page(
        &self,
        filter: &SearchFilter,
        page: PageSelector,
        paginator: Paginator,
    ) -> Result<Page<Dish>, KitchenRepositoryError>;

    /// Fetch one dish with its dish type.
    async fn find_by_id(&self, id: DishId) -> Result<Option<Dish>, KitchenRepositoryError>;

    /// Fetch one dish with its cooks and ingredients.
    async fn detail(&self, id: DishId) -> Result<Option<DishDetail>, KitchenRepositoryError>;

    /// Insert a dish and its relation sets.
    async fn create(&self, draft: &DishDraft) -> Result<Dish, KitchenRepositoryError>;

    /// Overwrite a dish, replacing both relation sets; `None` when missing.
    async fn update(
        &self,
        id: DishId,
        draft: &DishDraft,
    ) -> Result<Option<Dish>, KitchenRepositoryError>;

    /// Remove a dish and its relation rows; `false` when nothing was deleted.
    async fn delete(&self, id: DishId) -> Result<bool, KitchenRepositoryError>;
}
