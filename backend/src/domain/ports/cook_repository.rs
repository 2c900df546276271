//! Driven port for cook persistence, including the cook to dish relation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use pagination::{Page, PageSelector, Paginator};

use crate::domain::{
    AssignmentChange, Cook, CookCredentials, CookId, CookProfile, Dish, DishId, NewCookRecord,
    SearchFilter,
};

use super::KitchenRepositoryError;

/// Cook storage. Listings order by username, then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CookRepository: Send + Sync {
    /// Number of cooks whose username matches `filter`.
    async fn count(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError>;

    /// The requested page of matching cooks with the totals it was cut
    /// from, read from one consistent snapshot of the store.
    async fn list_page(
        &self,
        filter: &SearchFilter,
        page: PageSelector,
        paginator: Paginator,
    ) -> Result<Page<Cook>, KitchenRepositoryError>;

    /// Every cook, in listing order.
    async fn all(&self) -> Result<Vec<Cook>, KitchenRepositoryError>;

    /// Fetch one cook.
    async fn find_by_id(&self, id: CookId) -> Result<Option<Cook>, KitchenRepositoryError>;

    /// Fetch the cooks among `ids` that exist.
    async fn find_many(&self, ids: &BTreeSet<CookId>) -> Result<Vec<Cook>, KitchenRepositoryError>;

    /// Stored credentials for a login name (exact match).
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CookCredentials>, KitchenRepositoryError>;

    /// Insert a new cook.
    async fn create(&self, record: &NewCookRecord) -> Result<Cook, KitchenRepositoryError>;

    /// Overwrite a cook's profile; `None` when the cook does not exist.
    async fn update(
        &self,
        id: CookId,
        profile: &CookProfile,
    ) -> Result<Option<Cook>, KitchenRepositoryError>;

    /// Remove a cook and their assignments; `false` when nothing was deleted.
    async fn delete(&self, id: CookId) -> Result<bool, KitchenRepositoryError>;

    /// Dishes assigned to a cook, ordered by name.
    async fn dishes_for(&self, id: CookId) -> Result<Vec<Dish>, KitchenRepositoryError>;

    /// Atomically flip the (cook, dish) pair.
    ///
    /// Returns `None` when the dish does not exist.
    async fn toggle_dish(
        &self,
        cook: CookId,
        dish: DishId,
    ) -> Result<Option<AssignmentChange>, KitchenRepositoryError>;
}
