//! PostgreSQL-backed `CookRepository`.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageSelector, Paginator};

use crate::domain::ports::{CookRepository, KitchenRepositoryError};
use crate::domain::{
    AssignmentChange, Cook, CookCredentials, CookId, CookProfile, Dish, DishId, Email,
    NewCookRecord, SearchFilter,
};

use super::error_mapping::{from_count, map_diesel_error, map_pool_error, to_bigint};
use super::models::{
    CookCredentialsRow, CookProfileChangeset, CookRow, DishCookRow, DishRow, DishTypeRow,
    NewCookRow, convert_rows,
};
use super::pool::DbPool;
use super::schema::{cooks, dish_types, dishes, dishes_cooks, fold_case};

/// Diesel-backed cook store.
#[derive(Clone)]
pub struct DieselCookRepository {
    pool: DbPool,
}

impl DieselCookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn filtered(filter: &SearchFilter) -> cooks::BoxedQuery<'static, Pg> {
    let query = cooks::table.into_boxed();
    match filter.ilike_pattern() {
        // Backslash is PostgreSQL's default LIKE escape character.
        Some(pattern) => query.filter(cooks::username.ilike(pattern)),
        None => query,
    }
}

#[async_trait]
impl CookRepository for DieselCookRepository {
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
    ) -> Result<Page<Cook>, KitchenRepositoryError> {
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
                    let rows: Vec<CookRow> = filtered(filter)
                        .select(CookRow::as_select())
                        .order((
                            fold_case(cooks::username).asc(),
                            cooks::username.asc(),
                            cooks::id.asc(),
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

    async fn all(&self) -> Result<Vec<Cook>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CookRow> = cooks::table
            .select(CookRow::as_select())
            .order((
                fold_case(cooks::username).asc(),
                cooks::username.asc(),
                cooks::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn find_by_id(&self, id: CookId) -> Result<Option<Cook>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CookRow> = cooks::table
            .find(id.get())
            .select(CookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Cook::try_from).transpose()
    }

    async fn find_many(&self, ids: &BTreeSet<CookId>) -> Result<Vec<Cook>, KitchenRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CookRow> = cooks::table
            .filter(cooks::id.eq_any(raw))
            .select(CookRow::as_select())
            .order(cooks::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CookCredentials>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CookCredentialsRow> = cooks::table
            .filter(cooks::username.eq(username))
            .select(CookCredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(CookCredentials::try_from).transpose()
    }

    async fn create(&self, record: &NewCookRecord) -> Result<Cook, KitchenRepositoryError> {
        let profile = &record.profile;
        let new_row = NewCookRow {
            username: profile.username.as_str(),
            password_digest: record.password_digest.as_str(),
            first_name: profile.first_name.as_str(),
            last_name: profile.last_name.as_str(),
            email: profile.email.as_ref().map(Email::as_str),
            years_of_experience: i32::from(profile.years_of_experience),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CookRow = diesel::insert_into(cooks::table)
            .values(&new_row)
            .returning(CookRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Cook::try_from(row)
    }

    async fn update(
        &self,
        id: CookId,
        profile: &CookProfile,
    ) -> Result<Option<Cook>, KitchenRepositoryError> {
        let changeset = CookProfileChangeset::from(profile);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CookRow> = diesel::update(cooks::table.find(id.get()))
            .set(&changeset)
            .returning(CookRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Cook::try_from).transpose()
    }

    async fn delete(&self, id: CookId) -> Result<bool, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(cooks::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn dishes_for(&self, id: CookId) -> Result<Vec<Dish>, KitchenRepositoryError> {
        let assigned = dishes_cooks::table
            .filter(dishes_cooks::cook_id.eq(id.get()))
            .select(dishes_cooks::dish_id);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(DishRow, DishTypeRow)> = dishes::table
            .inner_join(dish_types::table)
            .filter(dishes::id.eq_any(assigned))
            .select((DishRow::as_select(), DishTypeRow::as_select()))
            .order((
                fold_case(dishes::name).asc(),
                dishes::name.asc(),
                dishes::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn toggle_dish(
        &self,
        cook: CookId,
        dish: DishId,
    ) -> Result<Option<AssignmentChange>, KitchenRepositoryError> {
        let pair = DishCookRow {
            dish_id: dish.get(),
            cook_id: cook.get(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                // Locking the dish row serialises concurrent toggles of it.
                let locked: Option<i64> = dishes::table
                    .find(pair.dish_id)
                    .select(dishes::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if locked.is_none() {
                    return Ok(None);
                }

                let removed = diesel::delete(dishes_cooks::table.find((pair.dish_id, pair.cook_id)))
                    .execute(conn)
                    .await?;
                if removed > 0 {
                    return Ok(Some(AssignmentChange::Unassigned));
                }

                diesel::insert_into(dishes_cooks::table)
                    .values(&pair)
                    .execute(conn)
                    .await?;
                Ok(Some(AssignmentChange::Assigned))
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| match map_diesel_error(err) {
            KitchenRepositoryError::MissingReference { .. } => {
                KitchenRepositoryError::missing_reference("cook")
            }
            other => other,
        })
    }
}
