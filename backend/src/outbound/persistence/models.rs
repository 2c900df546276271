//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types re-run domain validation so a hand-edited row surfaces as a query
//! error instead of an invalid value.

use diesel::prelude::*;

use crate::domain::ports::KitchenRepositoryError;
use crate::domain::{
    Cook, CookCredentials, CookId, CookProfile, Dish, DishId, DishType, DishTypeId, Email,
    Ingredient, IngredientId, PasswordDigest, PersonalName, Price, RecordName, Username,
    YearsOfExperience,
};

use super::schema::{cooks, dish_types, dishes, dishes_cooks, dishes_ingredients, ingredients};

fn corrupt(table: &str, id: i64, detail: impl std::fmt::Display) -> KitchenRepositoryError {
    KitchenRepositoryError::query(format!("invalid {table} row {id}: {detail}"))
}

/// Row struct for reading from the cooks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cooks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CookRow {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub years_of_experience: i32,
}

impl TryFrom<CookRow> for Cook {
    type Error = KitchenRepositoryError;

    fn try_from(row: CookRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Ok(Self {
            id: CookId::new(id),
            username: Username::new(&row.username).map_err(|err| corrupt("cooks", id, err))?,
            first_name: PersonalName::new(&row.first_name)
                .map_err(|err| corrupt("cooks", id, err))?,
            last_name: PersonalName::new(&row.last_name)
                .map_err(|err| corrupt("cooks", id, err))?,
            email: Email::parse_optional(row.email.as_deref().unwrap_or_default())
                .map_err(|err| corrupt("cooks", id, err))?,
            years_of_experience: YearsOfExperience::try_from(i64::from(row.years_of_experience))
                .map_err(|err| corrupt("cooks", id, err))?,
        })
    }
}

/// Password columns selected during login.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cooks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CookCredentialsRow {
    pub id: i64,
    pub password_digest: String,
}

impl TryFrom<CookCredentialsRow> for CookCredentials {
    type Error = KitchenRepositoryError;

    fn try_from(row: CookCredentialsRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Ok(Self {
            id: CookId::new(id),
            password_digest: PasswordDigest::from_stored(row.password_digest)
                .map_err(|err| corrupt("cooks", id, err))?,
        })
    }
}

/// Insertable struct for registering a cook.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cooks)]
pub(crate) struct NewCookRow<'a> {
    pub username: &'a str,
    pub password_digest: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub years_of_experience: i32,
}

/// Changeset for profile edits; the password is never touched here.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = cooks)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CookProfileChangeset<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub years_of_experience: i32,
}

impl<'a> From<&'a CookProfile> for CookProfileChangeset<'a> {
    fn from(profile: &'a CookProfile) -> Self {
        Self {
            username: profile.username.as_str(),
            first_name: profile.first_name.as_str(),
            last_name: profile.last_name.as_str(),
            email: profile.email.as_ref().map(Email::as_str),
            years_of_experience: i32::from(profile.years_of_experience),
        }
    }
}

/// Row struct shared by the two name-only tables.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dish_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DishTypeRow {
    pub id: i64,
    pub name: String,
}

impl TryFrom<DishTypeRow> for DishType {
    type Error = KitchenRepositoryError;

    fn try_from(row: DishTypeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DishTypeId::new(row.id),
            name: RecordName::new(&row.name).map_err(|err| corrupt("dish_types", row.id, err))?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: i64,
    pub name: String,
}

impl TryFrom<IngredientRow> for Ingredient {
    type Error = KitchenRepositoryError;

    fn try_from(row: IngredientRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IngredientId::new(row.id),
            name: RecordName::new(&row.name).map_err(|err| corrupt("ingredients", row.id, err))?,
        })
    }
}

/// Row struct for reading from the dishes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dishes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DishRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
}

impl TryFrom<(DishRow, DishTypeRow)> for Dish {
    type Error = KitchenRepositoryError;

    fn try_from((row, dish_type): (DishRow, DishTypeRow)) -> Result<Self, Self::Error> {
        let id = row.id;
        Ok(Self {
            id: DishId::new(id),
            name: RecordName::new(&row.name).map_err(|err| corrupt("dishes", id, err))?,
            description: row.description,
            price: Price::from_cents(row.price_cents).map_err(|err| corrupt("dishes", id, err))?,
            dish_type: DishType::try_from(dish_type)?,
        })
    }
}

/// Insertable and changeset struct for dish scalar columns.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = dishes)]
pub(crate) struct DishWrite<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price_cents: i64,
    pub dish_type_id: i64,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = dishes_cooks)]
pub(crate) struct DishCookRow {
    pub dish_id: i64,
    pub cook_id: i64,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = dishes_ingredients)]
pub(crate) struct DishIngredientRow {
    pub dish_id: i64,
    pub ingredient_id: i64,
}

/// Convert every row, failing on the first invalid one.
pub(crate) fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, KitchenRepositoryError>
where
    T: TryFrom<R, Error = KitchenRepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}
