//! PostgreSQL-backed `DishRepository`.
//!
//! Dish writes replace both relation sets inside one transaction so a
//! dangling cook or ingredient id rolls back the whole change.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use pagination::{Page, PageSelector, Paginator};

use crate::domain::ports::{DishRepository, KitchenRepositoryError};
use crate::domain::{Cook, Dish, DishDetail, DishDraft, DishId, Ingredient, SearchFilter};

use super::error_mapping::{from_count, map_diesel_error, map_pool_error, to_bigint};
use super::models::{
    CookRow, DishCookRow, DishIngredientRow, DishRow, DishTypeRow, DishWrite, IngredientRow,
    convert_rows,
};
use super::pool::DbPool;
use super::schema::{
    cooks, dish_types, dishes, dishes_cooks, dishes_ingredients, fold_case, ingredients,
};

/// Diesel-backed dish store.
#[derive(Clone)]
pub struct DieselDishRepository {
    pool: DbPool,
}

impl DieselDishRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type DishWithTypeQuery = diesel::dsl::IntoBoxed<
    'static,
    diesel::dsl::InnerJoin<dishes::table, dish_types::table>,
    Pg,
>;

fn filtered(filter: &SearchFilter) -> DishWithTypeQuery {
    let query = dishes::table.inner_join(dish_types::table).into_boxed();
    match filter.ilike_pattern() {
        Some(pattern) => query.filter(dishes::name.ilike(pattern)),
        None => query,
    }
}

fn write_row(draft: &DishDraft) -> DishWrite<'_> {
    DishWrite {
        name: draft.name.as_str(),
        description: draft.description.as_str(),
        price_cents: draft.price.cents(),
        dish_type_id: draft.dish_type_id.get(),
    }
}

async fn replace_relations(
    conn: &mut AsyncPgConnection,
    dish_id: i64,
    draft: &DishDraft,
) -> QueryResult<()> {
    diesel::delete(dishes_cooks::table.filter(dishes_cooks::dish_id.eq(dish_id)))
        .execute(conn)
        .await?;
    diesel::delete(dishes_ingredients::table.filter(dishes_ingredients::dish_id.eq(dish_id)))
        .execute(conn)
        .await?;

    let cook_rows: Vec<DishCookRow> = draft
        .cook_ids
        .iter()
        .map(|cook| DishCookRow {
            dish_id,
            cook_id: cook.get(),
        })
        .collect();
    if !cook_rows.is_empty() {
        diesel::insert_into(dishes_cooks::table)
            .values(&cook_rows)
            .execute(conn)
            .await?;
    }

    let ingredient_rows: Vec<DishIngredientRow> = draft
        .ingredient_ids
        .iter()
        .map(|ingredient| DishIngredientRow {
            dish_id,
            ingredient_id: ingredient.get(),
        })
        .collect();
    if !ingredient_rows.is_empty() {
        diesel::insert_into(dishes_ingredients::table)
            .values(&ingredient_rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

async fn load_dish(
    conn: &mut AsyncPgConnection,
    dish_id: i64,
) -> QueryResult<Option<(DishRow, DishTypeRow)>> {
    dishes::table
        .inner_join(dish_types::table)
        .filter(dishes::id.eq(dish_id))
        .select((DishRow::as_select(), DishTypeRow::as_select()))
        .first(conn)
        .await
        .optional()
}

#[async_trait]
impl DishRepository for DieselDishRepository {
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
    ) -> Result<Page<Dish>, KitchenRepositoryError> {
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
                    let rows: Vec<(DishRow, DishTypeRow)> = filtered(filter)
                        .select((DishRow::as_select(), DishTypeRow::as_select()))
                        .order((
                            fold_case(dishes::name).asc(),
                            dishes::name.asc(),
                            dishes::id.asc(),
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

    async fn find_by_id(&self, id: DishId) -> Result<Option<Dish>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = load_dish(&mut conn, id.get())
            .await
            .map_err(map_diesel_error)?;
        row.map(Dish::try_from).transpose()
    }

    async fn detail(&self, id: DishId) -> Result<Option<DishDetail>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(row) = load_dish(&mut conn, id.get())
            .await
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };

        let assigned = dishes_cooks::table
            .filter(dishes_cooks::dish_id.eq(id.get()))
            .select(dishes_cooks::cook_id);
        let cook_rows: Vec<CookRow> = cooks::table
            .filter(cooks::id.eq_any(assigned))
            .select(CookRow::as_select())
            .order((
                fold_case(cooks::username).asc(),
                cooks::username.asc(),
                cooks::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let linked = dishes_ingredients::table
            .filter(dishes_ingredients::dish_id.eq(id.get()))
            .select(dishes_ingredients::ingredient_id);
        let ingredient_rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq_any(linked))
            .select(IngredientRow::as_select())
            .order((
                fold_case(ingredients::name).asc(),
                ingredients::name.asc(),
                ingredients::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(DishDetail {
            dish: Dish::try_from(row)?,
            cooks: convert_rows::<_, Cook>(cook_rows)?,
            ingredients: convert_rows::<_, Ingredient>(ingredient_rows)?,
        }))
    }

    async fn create(&self, draft: &DishDraft) -> Result<Dish, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                async move {
                    let dish_id: i64 = diesel::insert_into(dishes::table)
                        .values(&write_row(draft))
                        .returning(dishes::id)
                        .get_result(conn)
                        .await?;
                    replace_relations(conn, dish_id, draft).await?;
                    load_dish(conn, dish_id)
                        .await?
                        .ok_or(diesel::result::Error::NotFound)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Dish::try_from(row)
    }

    async fn update(
        &self,
        id: DishId,
        draft: &DishDraft,
    ) -> Result<Option<Dish>, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                async move {
                    let updated: Option<i64> = diesel::update(dishes::table.find(id.get()))
                        .set(&write_row(draft))
                        .returning(dishes::id)
                        .get_result(conn)
                        .await
                        .optional()?;
                    let Some(dish_id) = updated else {
                        return Ok(None);
                    };
                    replace_relations(conn, dish_id, draft).await?;
                    load_dish(conn, dish_id).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        row.map(Dish::try_from).transpose()
    }

    async fn delete(&self, id: DishId) -> Result<bool, KitchenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(dishes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
