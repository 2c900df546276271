//! OpenAPI document for the kitchen API.
//!
//! Served through Swagger UI at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Cook, CookDetail, Dish, DishDetail, DishType, Error, ErrorCode, Ingredient};
use crate::inbound::http::accounts::LoginRequest;
use crate::inbound::http::cooks::{CookProfileForm, CookRegistrationForm};
use crate::inbound::http::dishes::{DishDetailResponse, DishForm, DishFormPage};
use crate::inbound::http::index::IndexResponse;
use crate::inbound::http::listing::SearchForm;
use crate::inbound::http::validation::NameForm;

/// Adds the session cookie security scheme.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /accounts/login.",
            ))),
        );
    }
}

/// OpenAPI document for every kitchen route and the health checks.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "Kitchen API",
        description = "Cooks, dishes, dish types and ingredients behind a session login."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::index::index,
        crate::inbound::http::dish_types::list_dish_types,
        crate::inbound::http::dish_types::new_dish_type_form,
        crate::inbound::http::dish_types::create_dish_type,
        crate::inbound::http::dish_types::edit_dish_type_form,
        crate::inbound::http::dish_types::update_dish_type,
        crate::inbound::http::dish_types::delete_dish_type,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::new_ingredient_form,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::ingredients::edit_ingredient_form,
        crate::inbound::http::ingredients::update_ingredient,
        crate::inbound::http::ingredients::delete_ingredient,
        crate::inbound::http::dishes::list_dishes,
        crate::inbound::http::dishes::new_dish_form,
        crate::inbound::http::dishes::create_dish,
        crate::inbound::http::dishes::dish_detail,
        crate::inbound::http::dishes::edit_dish_form,
        crate::inbound::http::dishes::update_dish,
        crate::inbound::http::dishes::delete_dish,
        crate::inbound::http::dishes::toggle_assign,
        crate::inbound::http::cooks::list_cooks,
        crate::inbound::http::cooks::cook_detail,
        crate::inbound::http::cooks::new_cook_form,
        crate::inbound::http::cooks::register_cook,
        crate::inbound::http::cooks::edit_cook_form,
        crate::inbound::http::cooks::update_cook,
        crate::inbound::http::cooks::delete_cook,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Cook,
        CookDetail,
        Dish,
        DishDetail,
        DishType,
        Ingredient,
        LoginRequest,
        NameForm,
        DishForm,
        DishFormPage,
        DishDetailResponse,
        CookRegistrationForm,
        CookProfileForm,
        SearchForm,
        IndexResponse,
    )),
    tags(
        (name = "accounts", description = "Sign in and out"),
        (name = "kitchen", description = "Dashboard"),
        (name = "dish types", description = "Dish categories"),
        (name = "ingredients", description = "Ingredients"),
        (name = "dishes", description = "Dishes and cook assignment"),
        (name = "cooks", description = "Kitchen staff"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::path::HttpMethod;

    #[rstest]
    #[case("/accounts/login", HttpMethod::Post)]
    #[case("/", HttpMethod::Get)]
    #[case("/dishes/{id}/toggle-assign", HttpMethod::Post)]
    #[case("/cooks/{id}/edit", HttpMethod::Post)]
    #[case("/ingredients", HttpMethod::Get)]
    #[case("/health/ready", HttpMethod::Get)]
    fn routes_are_documented(#[case] path: &str, #[case] method: HttpMethod) {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get(path).expect("documented path");
        let operation = match method {
            HttpMethod::Get => item.get.as_ref(),
            HttpMethod::Post => item.post.as_ref(),
            _ => None,
        };
        assert!(operation.is_some(), "{path} documented");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
