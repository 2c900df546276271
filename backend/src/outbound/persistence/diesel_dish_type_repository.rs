//! PostgreSQL-backed `DishTypeRepository`.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;
use pagination::{Page, PageSelector, Paginator};
use tracing::debug;

use crate::domain::ports::{DishTypeRepository, KitchenRepositoryError};
use crate::domain::{DishType, DishTypeId, RecordName, SearchFilter};

use super::error_mapping::{
    from_count, map_diesel_error, map_pool_error, map_restricted_delete_error, to_bigint,
};
use super::models::{DishTypeRow, convert_rows};
use super::pool::DbPool;
use super::schema::{dish_types, dishes, fold_case};

/// Diesel-backed dish type store.
#[derive(Clone)]
pub struct DieselDishTypeRepository {
    pool: DbPool,
}

impl DieselDishTypeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn filtered(filter: &SearchFilter) -> dish_types::BoxedQuery<'static, Pg> {
    let query = dish_types::table.into_boxed();
    match filter.ilike_pattern() {
        Some(pattern) => query.filter(dish_types::name.ilike(pattern)),
        None => query,
    }
}

#[async_trait]
impl DishTypeRepository for DieselDishTypeRepository {
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
    ) -> Result<Page<DishType>, KitchenRepositoryError> {
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
                    let rows: Vec<DishTypeRow> = filtered(filter)
                        .select(DishTypeRow::as_select())
                        .order((
                            fold_case(dish_types::name).asc(),
                            dish_types::name.asc(),
                            dish_types::id.asc(),
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

    async fn all(&self) -> Result<Vec<DishType>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DishTypeRow> = dish_types::table
            .select(DishTypeRow::as_select())
            .order((
                fold_case(dish_types::name).asc(),
                dish_types::name.asc(),
                dish_types::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn find_by_id(
        &self,
        id: DishTypeId,
    ) -> Result<Option<DishType>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DishTypeRow> = dish_types::table
            .find(id.get())
            .select(DishTypeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(DishType::try_from).transpose()
    }

    async fn create(&self, name: &RecordName) -> Result<DishType, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: DishTypeRow = diesel::insert_into(dish_types::table)
            .values(dish_types::name.eq(name.as_str()))
            .returning(DishTypeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        DishType::try_from(row)
    }

    async fn update(
        &self,
        id: DishTypeId,
        name: &RecordName,
    ) -> Result<Option<DishType>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DishTypeRow> = diesel::update(dish_types::table.find(id.get()))
            .set(dish_types::name.eq(name.as_str()))
            .returning(DishTypeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(DishType::try_from).transpose()
    }

    async fn delete(&self, id: DishTypeId) -> Result<bool, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let users: i64 = dishes::table
            .filter(dishes::dish_type_id.eq(id.get()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if users > 0 {
            debug!(dish_type = %id, users, "dish type still in use");
            return Err(KitchenRepositoryError::in_use(format!(
                "{users} dish(es) still use it"
            )));
        }
        // A dish inserted since the count still trips the RESTRICT key.
        let deleted = diesel::delete(dish_types::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_restricted_delete_error(err, "dishes"))?;
        Ok(deleted > 0)
    }
}
