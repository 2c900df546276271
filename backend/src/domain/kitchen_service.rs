//! Kitchen domain service implementing the read and write driving ports.
//!
//! The service composes the Query Builder (search filters evaluated by the
//! store), the Pager and the Relationship Toggle over the four entity
//! repositories, and translates repository failures into domain errors.

use std::fmt::Display;
use std::sync::Arc;

use pagination::Paginator;
use serde_json::json;

use crate::domain::ports::KitchenRepositoryError;
use crate::domain::validation::field_error;
use crate::domain::{EntityKind, Error, listing_paginator};

mod command;
mod query;

/// Driven ports used by [`KitchenService`].
#[derive(Debug)]
pub struct KitchenRepositories<C, D, T, I> {
    /// Cook store.
    pub cooks: Arc<C>,
    /// Dish store.
    pub dishes: Arc<D>,
    /// Dish type store.
    pub dish_types: Arc<T>,
    /// Ingredient store.
    pub ingredients: Arc<I>,
}

impl<C, D, T, I> Clone for KitchenRepositories<C, D, T, I> {
    fn clone(&self) -> Self {
        Self {
            cooks: Arc::clone(&self.cooks),
            dishes: Arc::clone(&self.dishes),
            dish_types: Arc::clone(&self.dish_types),
            ingredients: Arc::clone(&self.ingredients),
        }
    }
}

impl<S> KitchenRepositories<S, S, S, S> {
    /// Use one store for every entity kind.
    pub fn shared(store: Arc<S>) -> Self {
        Self {
            cooks: Arc::clone(&store),
            dishes: Arc::clone(&store),
            dish_types: Arc::clone(&store),
            ingredients: store,
        }
    }
}

/// Kitchen service implementing [`KitchenQuery`](crate::domain::ports::KitchenQuery)
/// and [`KitchenCommand`](crate::domain::ports::KitchenCommand).
#[derive(Clone)]
pub struct KitchenService<C, D, T, I> {
    repos: KitchenRepositories<C, D, T, I>,
    paginator: Paginator,
}

impl<C, D, T, I> KitchenService<C, D, T, I> {
    /// Create a service paging with the kitchen listing size.
    pub fn new(repos: KitchenRepositories<C, D, T, I>) -> Self {
        Self {
            repos,
            paginator: listing_paginator(),
        }
    }
}

/// Translate a store failure for `kind` into a domain error.
pub(crate) fn map_repository_error(kind: EntityKind, error: KitchenRepositoryError) -> Error {
    let label = kind.label();
    match error {
        KitchenRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("{label} repository unavailable: {message}"))
        }
        KitchenRepositoryError::Query { message } => {
            Error::internal(format!("{label} repository error: {message}"))
        }
        KitchenRepositoryError::Duplicate { field } => {
            Error::conflict(format!("{} with this {field} already exists.", kind.title()))
                .with_details(json!({ "field": field, "code": "unique" }))
        }
        KitchenRepositoryError::InUse { message } => {
            Error::conflict(format!("Cannot delete this {label}: {message}"))
                .with_details(json!({ "code": "protected" }))
        }
        KitchenRepositoryError::MissingReference { field } => invalid_choice(&field),
    }
}

/// `404` for a record of `kind` that does not exist.
pub(crate) fn not_found(kind: EntityKind, id: impl Display) -> Error {
    Error::not_found(format!("No {} found matching the query", kind.label()))
        .with_details(json!({ "id": id.to_string(), "code": "not_found" }))
}

fn invalid_choice(field: &str) -> Error {
    field_error(
        field,
        "invalid_choice",
        "Select a valid choice. That choice is not one of the available choices.",
    )
}

fn invalid_choice_value(field: &str, value: impl Display) -> Error {
    field_error(
        field,
        "invalid_choice",
        format!("Select a valid choice. {value} is not one of the available choices."),
    )
}
