//! PostgreSQL adapters for the kitchen repository ports.
//!
//! Repositories are thin: they translate between Diesel rows
//! (`models.rs`, `schema.rs`, both private) and domain types, and map
//! database failures onto [`KitchenRepositoryError`] using the constraint
//! names declared in `migrations/`.
//!
//! ```ignore
//! let pool = DbPool::new(PoolConfig::new(database_url)).await?;
//! run_pending_migrations(database_url).await?;
//! let cooks = DieselCookRepository::new(pool.clone());
//! ```
//!
//! [`KitchenRepositoryError`]: crate::domain::ports::KitchenRepositoryError

mod diesel_cook_repository;
mod diesel_dish_repository;
mod diesel_dish_type_repository;
mod diesel_ingredient_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_cook_repository::DieselCookRepository;
pub use diesel_dish_repository::DieselDishRepository;
pub use diesel_dish_type_repository::DieselDishTypeRepository;
pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
