//! Ingredient pages.
//!
//! ```text
//! GET  /ingredients?name=tom&page=2
//! GET  /ingredients/new
//! POST /ingredients/new {"name":"Tomato"}
//! GET  /ingredients/{id}/edit
//! POST /ingredients/{id}/edit {"name":"Tomatoes"}
//! POST /ingredients/{id}/delete
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{EntityKind, Error, Ingredient, IngredientId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::listing::{Listing, ListingParams, parse_listing};
use crate::inbound::http::session::AuthenticatedCook;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::NameForm;

/// Paged ingredients filtered by `name`.
#[utoipa::path(
    get,
    path = "/ingredients",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring of the name"),
        ("page" = Option<String>, Query, description = "Page number or `last`")
    ),
    responses(
        (status = 200, description = "Ingredient page"),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "listIngredients"
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    params: web::Query<ListingParams>,
) -> ApiResult<web::Json<Listing<Ingredient>>> {
    let (query, form) = parse_listing(EntityKind::Ingredient, &params);
    let page = state.kitchen.list_ingredients(&query).await?;
    Ok(web::Json(Listing::new(form, page)))
}

/// Blank ingredient form.
#[utoipa::path(
    get,
    path = "/ingredients/new",
    responses((status = 200, description = "Blank form", body = NameForm)),
    tags = ["ingredients"],
    operation_id = "newIngredientForm"
)]
#[get("/ingredients/new")]
pub async fn new_ingredient_form(_cook: AuthenticatedCook) -> web::Json<NameForm> {
    web::Json(NameForm::default())
}

/// Create an ingredient.
#[utoipa::path(
    post,
    path = "/ingredients/new",
    request_body = NameForm,
    responses(
        (status = 201, description = "Created", body = Ingredient),
        (status = 400, description = "Invalid name", body = Error),
        (status = 409, description = "Name already taken", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient"
)]
#[post("/ingredients/new")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    payload: web::Json<NameForm>,
) -> ApiResult<HttpResponse> {
    let name = payload.record_name()?;
    let created = state.commands.create_ingredient(name).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Current values of an ingredient.
#[utoipa::path(
    get,
    path = "/ingredients/{id}/edit",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Filled form", body = NameForm),
        (status = 404, description = "No such ingredient", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "editIngredientForm"
)]
#[get("/ingredients/{id:\\d+}/edit")]
pub async fn edit_ingredient_form(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<web::Json<NameForm>> {
    let ingredient = state
        .kitchen
        .ingredient(IngredientId::new(path.into_inner()))
        .await?;
    Ok(web::Json(NameForm::filled(&ingredient.name)))
}

/// Rename an ingredient.
#[utoipa::path(
    post,
    path = "/ingredients/{id}/edit",
    params(("id" = i64, Path, description = "Ingredient id")),
    request_body = NameForm,
    responses(
        (status = 200, description = "Updated", body = Ingredient),
        (status = 400, description = "Invalid name", body = Error),
        (status = 404, description = "No such ingredient", body = Error),
        (status = 409, description = "Name already taken", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "updateIngredient"
)]
#[post("/ingredients/{id:\\d+}/edit")]
pub async fn update_ingredient(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
    payload: web::Json<NameForm>,
) -> ApiResult<web::Json<Ingredient>> {
    let name = payload.record_name()?;
    let updated = state
        .commands
        .update_ingredient(IngredientId::new(path.into_inner()), name)
        .await?;
    Ok(web::Json(updated))
}

/// Delete an ingredient, dropping it from every dish.
#[utoipa::path(
    post,
    path = "/ingredients/{id}/delete",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such ingredient", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "deleteIngredient"
)]
#[post("/ingredients/{id:\\d+}/delete")]
pub async fn delete_ingredient(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .commands
        .delete_ingredient(IngredientId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::RecordName;
    use crate::inbound::http::test_utils::{
        PASSWORD, kitchen_app, kitchen_state, login_request, register_cook, session_cookie,
    };

    async fn listing_for(names: &[&str], query: &str) -> (StatusCode, Value) {
        let (state, commands) = kitchen_state();
        register_cook(commands.as_ref(), "chef1").await;
        for name in names {
            commands
                .create_ingredient(RecordName::new(name).expect("name"))
                .await
                .expect("ingredient");
        }
        let app = test::init_service(kitchen_app(state)).await;
        let login = test::call_service(&app, login_request("chef1", PASSWORD).to_request()).await;
        let req = test::TestRequest::get()
            .uri(&format!("/ingredients{query}"))
            .cookie(session_cookie(&login))
            .to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    fn names_of(body: &Value) -> Vec<String> {
        body["items"]
            .as_array()
            .expect("items")
            .iter()
            .filter_map(|item| item["name"].as_str().map(str::to_owned))
            .collect()
    }

    const TEN: [&str; 10] = [
        "Basil", "Carrot", "Dill", "Egg", "Flour", "Garlic", "Honey", "Leek", "Milk", "Onion",
    ];

    #[rstest]
    #[case("", 1, vec!["Basil", "Carrot", "Dill", "Egg", "Flour"])]
    #[case("?page=2", 2, vec!["Garlic", "Honey", "Leek", "Milk", "Onion"])]
    #[case("?page=last", 2, vec!["Garlic", "Honey", "Leek", "Milk", "Onion"])]
    #[case("?page=9", 2, vec!["Garlic", "Honey", "Leek", "Milk", "Onion"])]
    #[case("?page=zero", 1, vec!["Basil", "Carrot", "Dill", "Egg", "Flour"])]
    #[actix_web::test]
    async fn ten_ingredients_span_two_pages(
        #[case] query: &str,
        #[case] page: u64,
        #[case] expected: Vec<&str>,
    ) {
        let (status, body) = listing_for(&TEN, query).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"].as_u64(), Some(page));
        assert_eq!(body["totalPages"].as_u64(), Some(2));
        assert_eq!(body["totalItems"].as_u64(), Some(10));
        assert_eq!(names_of(&body), expected);
    }

    #[rstest]
    #[case("?name=TOM", vec!["tomato"])]
    #[case("?name=ato", vec!["potato", "tomato"])]
    #[case("?name=", vec!["potato", "tomato"])]
    #[case("?name=xyz", vec![])]
    #[actix_web::test]
    async fn search_matches_substrings_ignoring_case(
        #[case] query: &str,
        #[case] expected: Vec<&str>,
    ) {
        let (status, body) = listing_for(&["tomato", "potato"], query).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names_of(&body), expected);
        assert_eq!(body["searchForm"]["placeholder"], "Search by ingredient");
    }

    #[actix_web::test]
    async fn search_form_echoes_the_term() {
        let (_, body) = listing_for(&["tomato"], "?name=tom").await;
        assert_eq!(body["searchForm"]["field"], "name");
        assert_eq!(body["searchForm"]["value"], "tom");
    }
}
