//! Domain ports and supporting types for the hexagonal boundary.

mod cook_repository;
mod dish_repository;
mod dish_type_repository;
mod ingredient_repository;
mod kitchen_command;
mod kitchen_query;
mod kitchen_repository_error;
mod login_service;

#[cfg(test)]
pub use cook_repository::MockCookRepository;
pub use cook_repository::CookRepository;
#[cfg(test)]
pub use dish_repository::MockDishRepository;
pub use dish_repository::DishRepository;
#[cfg(test)]
pub use dish_type_repository::MockDishTypeRepository;
pub use dish_type_repository::DishTypeRepository;
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::IngredientRepository;
#[cfg(test)]
pub use kitchen_command::MockKitchenCommand;
pub use kitchen_command::KitchenCommand;
#[cfg(test)]
pub use kitchen_query::MockKitchenQuery;
pub use kitchen_query::{DishFormChoices, KitchenCounts, KitchenQuery};
pub use kitchen_repository_error::KitchenRepositoryError;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
