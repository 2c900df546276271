//! Dish type pages.
//!
//! ```text
//! GET  /dishtypes?name=sou&page=2
//! GET  /dishtypes/new
//! POST /dishtypes/new {"name":"Soup"}
//! GET  /dishtypes/{id}/edit
//! POST /dishtypes/{id}/edit {"name":"Soups"}
//! POST /dishtypes/{id}/delete
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{DishType, DishTypeId, EntityKind, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::listing::{Listing, ListingParams, parse_listing};
use crate::inbound::http::session::AuthenticatedCook;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::NameForm;

/// Paged dish types filtered by `name`.
#[utoipa::path(
    get,
    path = "/dishtypes",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring of the name"),
        ("page" = Option<String>, Query, description = "Page number or `last`")
    ),
    responses(
        (status = 200, description = "Dish type page"),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["dish types"],
    operation_id = "listDishTypes"
)]
#[get("/dishtypes")]
pub async fn list_dish_types(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    params: web::Query<ListingParams>,
) -> ApiResult<web::Json<Listing<DishType>>> {
    let (query, form) = parse_listing(EntityKind::DishType, &params);
    let page = state.kitchen.list_dish_types(&query).await?;
    Ok(web::Json(Listing::new(form, page)))
}

/// Blank dish type form.
#[utoipa::path(
    get,
    path = "/dishtypes/new",
    responses((status = 200, description = "Blank form", body = NameForm)),
    tags = ["dish types"],
    operation_id = "newDishTypeForm"
)]
#[get("/dishtypes/new")]
pub async fn new_dish_type_form(_cook: AuthenticatedCook) -> web::Json<NameForm> {
    web::Json(NameForm::default())
}

/// Create a dish type.
#[utoipa::path(
    post,
    path = "/dishtypes/new",
    request_body = NameForm,
    responses(
        (status = 201, description = "Created", body = DishType),
        (status = 400, description = "Invalid name", body = Error),
        (status = 409, description = "Name already taken", body = Error)
    ),
    tags = ["dish types"],
    operation_id = "createDishType"
)]
#[post("/dishtypes/new")]
pub async fn create_dish_type(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    payload: web::Json<NameForm>,
) -> ApiResult<HttpResponse> {
    let name = payload.record_name()?;
    let created = state.commands.create_dish_type(name).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Current values of a dish type.
#[utoipa::path(
    get,
    path = "/dishtypes/{id}/edit",
    params(("id" = i64, Path, description = "Dish type id")),
    responses(
        (status = 200, description = "Filled form", body = NameForm),
        (status = 404, description = "No such dish type", body = Error)
    ),
    tags = ["dish types"],
    operation_id = "editDishTypeForm"
)]
#[get("/dishtypes/{id:\\d+}/edit")]
pub async fn edit_dish_type_form(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<web::Json<NameForm>> {
    let dish_type = state
        .kitchen
        .dish_type(DishTypeId::new(path.into_inner()))
        .await?;
    Ok(web::Json(NameForm::filled(&dish_type.name)))
}

/// Rename a dish type.
#[utoipa::path(
    post,
    path = "/dishtypes/{id}/edit",
    params(("id" = i64, Path, description = "Dish type id")),
    request_body = NameForm,
    responses(
        (status = 200, description = "Updated", body = DishType),
        (status = 400, description = "Invalid name", body = Error),
        (status = 404, description = "No such dish type", body = Error),
        (status = 409, description = "Name already taken", body = Error)
    ),
    tags = ["dish types"],
    operation_id = "updateDishType"
)]
#[post("/dishtypes/{id:\\d+}/edit")]
pub async fn update_dish_type(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
    payload: web::Json<NameForm>,
) -> ApiResult<web::Json<DishType>> {
    let name = payload.record_name()?;
    let updated = state
        .commands
        .update_dish_type(DishTypeId::new(path.into_inner()), name)
        .await?;
    Ok(web::Json(updated))
}

/// Delete a dish type no dish uses.
#[utoipa::path(
    post,
    path = "/dishtypes/{id}/delete",
    params(("id" = i64, Path, description = "Dish type id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such dish type", body = Error),
        (status = 409, description = "Dishes still use it", body = Error)
    ),
    tags = ["dish types"],
    operation_id = "deleteDishType"
)]
#[post("/dishtypes/{id:\\d+}/delete")]
pub async fn delete_dish_type(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .commands
        .delete_dish_type(DishTypeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    use crate::domain::{DishDraft, Price, RecordName};
    use crate::inbound::http::test_utils::{
        PASSWORD, kitchen_app, kitchen_state, login_request, register_cook, session_cookie,
    };

    #[actix_web::test]
    async fn create_edit_and_reject_duplicates() {
        let (state, commands) = kitchen_state();
        register_cook(commands.as_ref(), "chef1").await;
        let app = test::init_service(kitchen_app(state)).await;
        let login = test::call_service(&app, login_request("chef1", PASSWORD).to_request()).await;
        let cookie = session_cookie(&login);

        let create = |name: &str| {
            test::TestRequest::post()
                .uri("/dishtypes/new")
                .cookie(cookie.clone())
                .set_json(json!({ "name": name }))
                .to_request()
        };
        let res = test::call_service(&app, create("Soup")).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let soup: Value = test::read_body_json(res).await;
        let id = soup["id"].as_i64().expect("id");

        let res = test::call_service(&app, create("Soup")).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "unique");

        let req = test::TestRequest::post()
            .uri(&format!("/dishtypes/{id}/edit"))
            .cookie(cookie.clone())
            .set_json(json!({ "name": "Soups" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["name"], "Soups");

        let req = test::TestRequest::get()
            .uri(&format!("/dishtypes/{id}/edit"))
            .cookie(cookie.clone())
            .to_request();
        let form: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(form, json!({ "name": "Soups" }));
    }

    #[actix_web::test]
    async fn used_dish_types_cannot_be_deleted() {
        let (state, commands) = kitchen_state();
        register_cook(commands.as_ref(), "chef1").await;
        let soup = commands
            .create_dish_type(RecordName::new("Soup").expect("name"))
            .await
            .expect("dish type");
        let salad = commands
            .create_dish_type(RecordName::new("Salad").expect("name"))
            .await
            .expect("dish type");
        commands
            .create_dish(DishDraft {
                name: RecordName::new("Borscht").expect("name"),
                description: String::new(),
                price: Price::from_cents(950).expect("price"),
                dish_type_id: soup.id,
                cook_ids: BTreeSet::new(),
                ingredient_ids: BTreeSet::new(),
            })
            .await
            .expect("dish");
        let app = test::init_service(kitchen_app(state)).await;
        let login = test::call_service(&app, login_request("chef1", PASSWORD).to_request()).await;
        let cookie = session_cookie(&login);

        let delete = |id: i64| {
            test::TestRequest::post()
                .uri(&format!("/dishtypes/{id}/delete"))
                .cookie(cookie.clone())
                .to_request()
        };
        let res = test::call_service(&app, delete(soup.id.get())).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "protected");

        let res = test::call_service(&app, delete(salad.id.get())).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let res = test::call_service(&app, delete(salad.id.get())).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn blank_names_are_required() {
        let (state, commands) = kitchen_state();
        register_cook(commands.as_ref(), "chef1").await;
        let app = test::init_service(kitchen_app(state)).await;
        let login = test::call_service(&app, login_request("chef1", PASSWORD).to_request()).await;
        let req = test::TestRequest::post()
            .uri("/dishtypes/new")
            .cookie(session_cookie(&login))
            .set_json(json!({}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "This field is required.");
        assert_eq!(body["details"]["field"], "name");
    }
}
