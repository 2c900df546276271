//! Domain primitives, rules and services.
//!
//! Purpose: define strongly typed kitchen records (cooks, dishes, dish types,
//! ingredients), the validation rules applied before anything is persisted,
//! listing search semantics, the cook to dish assignment toggle, and the
//! services implementing the driving ports. Nothing here knows about HTTP or
//! SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - Value objects: RecordName, Username, PersonalName, Email, Price,
//!   YearsOfExperience, NewPassword, PasswordDigest.
//! - Records: Cook, Dish, DishType, Ingredient and their detail views.
//! - SearchFilter / EntityKind / ListingQuery: listing inputs.
//! - KitchenService / PasswordLoginService: driving port implementations.

pub mod assignment;
pub mod auth;
pub mod cook;
pub mod dish;
pub mod dish_type;
pub mod error;
pub mod experience;
pub mod ids;
pub mod ingredient;
pub mod kitchen_service;
pub mod listing;
pub mod login_service;
pub mod names;
pub mod password;
pub mod ports;
pub mod price;
pub mod search;
pub mod trace_id;
pub mod validation;

pub use self::assignment::{AssignmentChange, AssignmentOutcome};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::cook::{Cook, CookCredentials, CookDetail, CookProfile, NewCook, NewCookRecord};
pub use self::dish::{Dish, DishDetail, DishDraft};
pub use self::dish_type::DishType;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::experience::{
    ExperienceValidationError, MAX_YEARS_OF_EXPERIENCE, YearsOfExperience,
    validate_years_of_experience,
};
pub use self::ids::{CookId, DishId, DishTypeId, IngredientId};
pub use self::ingredient::Ingredient;
pub use self::kitchen_service::{KitchenRepositories, KitchenService};
pub use self::listing::{LIST_PAGE_SIZE, ListingQuery, listing_paginator};
pub use self::login_service::PasswordLoginService;
pub use self::names::{Email, PersonalName, RecordName, TextValidationError, Username};
pub use self::password::{
    HashingFailed, MalformedDigest, NewPassword, PasswordDigest, PasswordValidationError,
};
pub use self::price::{Price, PriceValidationError};
pub use self::search::{EntityKind, SearchFilter, listing_order};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use kitchen::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
