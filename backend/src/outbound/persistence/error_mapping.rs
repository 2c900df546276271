//! Diesel and pool error mapping onto [`KitchenRepositoryError`].
//!
//! Constraint names come from the kitchen migration; a violation of a named
//! constraint becomes the matching domain-facing variant, everything else
//! collapses to a generic query or connection failure.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::KitchenRepositoryError;

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub(crate) fn map_pool_error(error: PoolError) -> KitchenRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            KitchenRepositoryError::connection(message)
        }
    }
}

fn unique_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("cooks_username_key") => "username",
        Some("dish_types_name_key" | "ingredients_name_key") => "name",
        other => {
            warn!(constraint = ?other, "unrecognised unique constraint");
            "value"
        }
    }
}

fn foreign_key_field(constraint: Option<&str>) -> Option<&'static str> {
    match constraint {
        Some("dishes_dish_type_id_fkey") => Some("dish_type"),
        Some("dishes_cooks_cook_id_fkey") => Some("cooks"),
        Some("dishes_ingredients_ingredient_id_fkey") => Some("ingredients"),
        Some("dishes_cooks_dish_id_fkey" | "dishes_ingredients_dish_id_fkey") => Some("dish"),
        _ => None,
    }
}

/// Map Diesel errors raised while writing or reading kitchen rows.
pub(crate) fn map_diesel_error(error: DieselError) -> KitchenRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => KitchenRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => KitchenRepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                KitchenRepositoryError::duplicate(unique_field(info.constraint_name()))
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                match foreign_key_field(info.constraint_name()) {
                    Some(field) => KitchenRepositoryError::missing_reference(field),
                    None => {
                        warn!(
                            constraint = ?info.constraint_name(),
                            "unrecognised foreign key violation"
                        );
                        KitchenRepositoryError::query("foreign key violation")
                    }
                }
            }
            DatabaseErrorKind::ClosedConnection => {
                KitchenRepositoryError::connection("database connection error")
            }
            _ => KitchenRepositoryError::query("database error"),
        },
        _ => KitchenRepositoryError::query("database error"),
    }
}

/// Map errors from a delete that a `RESTRICT` foreign key may block.
pub(crate) fn map_restricted_delete_error(
    error: DieselError,
    label: &str,
) -> KitchenRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            KitchenRepositoryError::in_use(format!("{label} still reference it"))
        }
        other => map_diesel_error(other),
    }
}

impl From<DieselError> for KitchenRepositoryError {
    fn from(error: DieselError) -> Self {
        map_diesel_error(error)
    }
}

/// Convert a domain count or offset into a SQL `BIGINT`.
pub(crate) fn to_bigint(value: u64) -> Result<i64, KitchenRepositoryError> {
    i64::try_from(value).map_err(|_| KitchenRepositoryError::query("value exceeds BIGINT range"))
}

/// Convert a SQL count back into the domain's unsigned count.
pub(crate) fn from_count(value: i64) -> Result<u64, KitchenRepositoryError> {
    u64::try_from(value).map_err(|_| KitchenRepositoryError::query("negative row count"))
}
