//! HTTP inbound adapter: JSON endpoints over the kitchen driving ports.

pub mod accounts;
pub mod cooks;
pub mod dish_types;
pub mod dishes;
pub mod error;
pub mod health;
pub mod index;
pub mod ingredients;
pub mod listing;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every kitchen route except the health checks.
///
/// Handlers expect `web::Data<HttpState>` and a session middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::login)
        .service(accounts::logout)
        .service(index::index)
        .service(dish_types::list_dish_types)
        .service(dish_types::new_dish_type_form)
        .service(dish_types::create_dish_type)
        .service(dish_types::edit_dish_type_form)
        .service(dish_types::update_dish_type)
        .service(dish_types::delete_dish_type)
        .service(ingredients::list_ingredients)
        .service(ingredients::new_ingredient_form)
        .service(ingredients::create_ingredient)
        .service(ingredients::edit_ingredient_form)
        .service(ingredients::update_ingredient)
        .service(ingredients::delete_ingredient)
        .service(dishes::list_dishes)
        .service(dishes::new_dish_form)
        .service(dishes::create_dish)
        .service(dishes::dish_detail)
        .service(dishes::edit_dish_form)
        .service(dishes::update_dish)
        .service(dishes::delete_dish)
        .service(dishes::toggle_assign)
        .service(cooks::list_cooks)
        .service(cooks::new_cook_form)
        .service(cooks::register_cook)
        .service(cooks::cook_detail)
        .service(cooks::edit_cook_form)
        .service(cooks::update_cook)
        .service(cooks::delete_cook);
}
