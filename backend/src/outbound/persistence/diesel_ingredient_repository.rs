//! PostgreSQL-backed `IngredientRepository`.
//!
//! Deleting an ingredient cascades to its dish links.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;
use pagination::{Page, PageSelector, Paginator};

use crate::domain::ports::{IngredientRepository, KitchenRepositoryError};
use crate::domain::{Ingredient, IngredientId, RecordName, SearchFilter};

use super::error_mapping::{from_count, map_diesel_error, map_pool_error, to_bigint};
use super::models::{IngredientRow, convert_rows};
use super::pool::DbPool;
use super::schema::{fold_case, ingredients};

/// Diesel-backed ingredient store.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn filtered(filter: &SearchFilter) -> ingredients::BoxedQuery<'static, Pg> {
    let query = ingredients::table.into_boxed();
    match filter.ilike_pattern() {
        Some(pattern) => query.filter(ingredients::name.ilike(pattern)),
        None => query,
    }
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn count(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        from_count(total)
    }

    async fn list_page(
        &self,
        filter: &SearchFilter,
        page: PageSelector,
        paginator: Paginator,
    ) -> Result<Page<Ingredient>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (window, rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let total: i64 = filtered(filter).count().get_result(conn).await?;
                    let window = paginator.window(from_count(total)?, page);
                    if window.limit() == 0 {
                        return Ok((window, Vec::new()));
                    }
                    let rows: Vec<IngredientRow> = filtered(filter)
                        .select(IngredientRow::as_select())
                        .order((
                            fold_case(ingredients::name).asc(),
                            ingredients::name.asc(),
                            ingredients::id.asc(),
                        ))
                        .offset(to_bigint(window.offset())?)
                        .limit(to_bigint(window.limit())?)
                        .load(conn)
                        .await?;
                    Ok::<_, KitchenRepositoryError>((window, rows))
                }
                .scope_boxed()
            })
            .await?;
        Ok(window.into_page(convert_rows(rows)?))
    }

    async fn all(&self) -> Result<Vec<Ingredient>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<IngredientRow> = ingredients::table
            .select(IngredientRow::as_select())
            .order((
                fold_case(ingredients::name).asc(),
                ingredients::name.asc(),
                ingredients::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn find_by_id(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<IngredientRow> = ingredients::table
            .find(id.get())
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Ingredient::try_from).transpose()
    }

    async fn find_many(
        &self,
        ids: &BTreeSet<IngredientId>,
    ) -> Result<Vec<Ingredient>, KitchenRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq_any(raw))
            .select(IngredientRow::as_select())
            .order(ingredients::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn create(&self, name: &RecordName) -> Result<Ingredient, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: IngredientRow = diesel::insert_into(ingredients::table)
            .values(ingredients::name.eq(name.as_str()))
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ingredient::try_from(row)
    }

    async fn update(
        &self,
        id: IngredientId,
        name: &RecordName,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<IngredientRow> = diesel::update(ingredients::table.find(id.get()))
            .set(ingredients::name.eq(name.as_str()))
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Ingredient::try_from).transpose()
    }

    async fn delete(&self, id: IngredientId) -> Result<bool, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(ingredients::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
