//! Driven port for dish type persistence.

use async_trait::async_trait;
use pagination::{Page, PageSelector, Paginator};

use crate::domain::{DishType, DishTypeId, RecordName, SearchFilter};

use super::KitchenRepositoryError;

/// Dish type storage. Names are unique; listings order by name, then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishTypeRepository: Send + Sync {
    /// Number of dish types whose name matches `filter`.
    async fn count(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError>;

    /// The requested page of matching dish types with the totals it was cut
    /// from, read from one consistent snapshot of the store.
    async fn list_page(
        &self,
        filter: &SearchFilter,
        page: PageSelector,
        paginator: Paginator,
    ) -> Result<Page<DishType>, KitchenRepositoryError>;

    /// Every dish type, in listing order.
    async fn all(&self) -> Result<Vec<DishType>, KitchenRepositoryError>;

    /// Fetch one dish type.
    async fn find_by_id(&self, id: DishTypeId)
    -> Result<Option<DishType>, KitchenRepositoryError>;

    /// Insert a dish type.
    async fn create(&self, name: &RecordName) -> Result<DishType, KitchenRepositoryError>;

    /// Rename a dish type; `None` when missing.
    async fn update(
        &self,
        id: DishTypeId,
        name: &RecordName,
    ) -> Result<Option<DishType>, KitchenRepositoryError>;

    /// Remove a dish type. Fails with `InUse` while dishes reference it.
    async fn delete(&self, id: DishTypeId) -> Result<bool, KitchenRepositoryError>;
}
