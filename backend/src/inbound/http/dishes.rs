//! Dish pages and the cook assignment toggle.
//!
//! ```text
//! GET  /dishes?name=pas&page=1
//! GET  /dishes/{id}
//! GET  /dishes/new
//! POST /dishes/new {"name":"Pasta","description":"","price":"12.50","dish_type":1,"cooks":[],"ingredients":[2]}
//! GET  /dishes/{id}/edit
//! POST /dishes/{id}/edit
//! POST /dishes/{id}/delete
//! POST /dishes/{id}/toggle-assign
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::DishFormChoices;
use crate::domain::{CookId, Dish, DishDetail, DishDraft, DishId, EntityKind, Error, IngredientId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::listing::{Listing, ListingParams, parse_listing};
use crate::inbound::http::session::AuthenticatedCook;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    DISH_TYPE, NAME, PriceInput, id_set, price, record_name, require,
};

/// Dish form body and initial values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct DishForm {
    /// Display name.
    pub name: String,
    /// Free text, may be blank.
    pub description: String,
    /// Decimal price as text or number.
    #[schema(value_type = Option<String>, example = "12.50")]
    pub price: Option<PriceInput>,
    /// Dish type id.
    pub dish_type: Option<i64>,
    /// Assigned cook ids.
    pub cooks: Vec<i64>,
    /// Ingredient ids.
    pub ingredients: Vec<i64>,
}

impl DishForm {
    fn filled(detail: &DishDetail) -> Self {
        Self {
            name: detail.dish.name.as_str().to_owned(),
            description: detail.dish.description.clone(),
            price: Some(PriceInput::from(detail.dish.price)),
            dish_type: Some(detail.dish.dish_type.id.get()),
            cooks: detail.cooks.iter().map(|cook| cook.id.get()).collect(),
            ingredients: detail
                .ingredients
                .iter()
                .map(|ingredient| ingredient.id.get())
                .collect(),
        }
    }

    fn draft(&self) -> Result<DishDraft, Error> {
        Ok(DishDraft {
            name: record_name(&self.name, NAME)?,
            description: self.description.clone(),
            price: price(self.price.as_ref())?,
            dish_type_id: require(self.dish_type, DISH_TYPE)?.into(),
            cook_ids: id_set::<CookId>(self.cooks.iter().copied()),
            ingredient_ids: id_set::<IngredientId>(self.ingredients.iter().copied()),
        })
    }
}

/// Form values plus the selectable references.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DishFormPage {
    /// Current or blank values.
    pub form: DishForm,
    /// Dish types, cooks and ingredients to pick from.
    pub choices: DishFormChoices,
}

/// A dish with its relations and pending notifications.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishDetailResponse {
    /// Dish, dish type, cooks and ingredients.
    #[serde(flatten)]
    pub detail: DishDetail,
    /// Whether the signed-in cook is assigned.
    pub cooked_by_me: bool,
    /// Flash messages queued for this session, now cleared.
    pub messages: Vec<String>,
}

/// Paged dishes filtered by `name`.
#[utoipa::path(
    get,
    path = "/dishes",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring of the name"),
        ("page" = Option<String>, Query, description = "Page number or `last`")
    ),
    responses(
        (status = 200, description = "Dish page"),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["dishes"],
    operation_id = "listDishes"
)]
#[get("/dishes")]
pub async fn list_dishes(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    params: web::Query<ListingParams>,
) -> ApiResult<web::Json<Listing<Dish>>> {
    let (query, form) = parse_listing(EntityKind::Dish, &params);
    let page = state.kitchen.list_dishes(&query).await?;
    Ok(web::Json(Listing::new(form, page)))
}

/// Blank dish form with choices.
#[utoipa::path(
    get,
    path = "/dishes/new",
    responses((status = 200, description = "Blank form", body = DishFormPage)),
    tags = ["dishes"],
    operation_id = "newDishForm"
)]
#[get("/dishes/new")]
pub async fn new_dish_form(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
) -> ApiResult<web::Json<DishFormPage>> {
    let choices = state.kitchen.dish_form_choices().await?;
    Ok(web::Json(DishFormPage {
        form: DishForm::default(),
        choices,
    }))
}

/// Create a dish.
#[utoipa::path(
    post,
    path = "/dishes/new",
    request_body = DishForm,
    responses(
        (status = 201, description = "Created", body = Dish),
        (status = 400, description = "Invalid field or unknown reference", body = Error)
    ),
    tags = ["dishes"],
    operation_id = "createDish"
)]
#[post("/dishes/new")]
pub async fn create_dish(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    payload: web::Json<DishForm>,
) -> ApiResult<HttpResponse> {
    let draft = payload.draft()?;
    let created = state.commands.create_dish(draft).await?;
    Ok(HttpResponse::Created().json(created))
}

/// A dish with its type, cooks, ingredients and flash messages.
#[utoipa::path(
    get,
    path = "/dishes/{id}",
    params(("id" = i64, Path, description = "Dish id")),
    responses(
        (status = 200, description = "Dish", body = DishDetailResponse),
        (status = 404, description = "No such dish", body = Error)
    ),
    tags = ["dishes"],
    operation_id = "getDish"
)]
#[get("/dishes/{id:\\d+}")]
pub async fn dish_detail(
    state: web::Data<HttpState>,
    cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DishDetailResponse>> {
    let detail = state
        .kitchen
        .dish_detail(DishId::new(path.into_inner()))
        .await?;
    let messages = cook.session().take_messages()?;
    Ok(web::Json(DishDetailResponse {
        cooked_by_me: detail.is_cooked_by(cook.id()),
        detail,
        messages,
    }))
}

/// Current values of a dish with choices.
#[utoipa::path(
    get,
    path = "/dishes/{id}/edit",
    params(("id" = i64, Path, description = "Dish id")),
    responses(
        (status = 200, description = "Filled form", body = DishFormPage),
        (status = 404, description = "No such dish", body = Error)
    ),
    tags = ["dishes"],
    operation_id = "editDishForm"
)]
#[get("/dishes/{id:\\d+}/edit")]
pub async fn edit_dish_form(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DishFormPage>> {
    let detail = state
        .kitchen
        .dish_detail(DishId::new(path.into_inner()))
        .await?;
    let choices = state.kitchen.dish_form_choices().await?;
    Ok(web::Json(DishFormPage {
        form: DishForm::filled(&detail),
        choices,
    }))
}

/// Replace a dish, including its cook and ingredient sets.
#[utoipa::path(
    post,
    path = "/dishes/{id}/edit",
    params(("id" = i64, Path, description = "Dish id")),
    request_body = DishForm,
    responses(
        (status = 200, description = "Updated", body = Dish),
        (status = 400, description = "Invalid field or unknown reference", body = Error),
        (status = 404, description = "No such dish", body = Error)
    ),
    tags = ["dishes"],
    operation_id = "updateDish"
)]
#[post("/dishes/{id:\\d+}/edit")]
pub async fn update_dish(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
    payload: web::Json<DishForm>,
) -> ApiResult<web::Json<Dish>> {
    let draft = payload.draft()?;
    let updated = state
        .commands
        .update_dish(DishId::new(path.into_inner()), draft)
        .await?;
    Ok(web::Json(updated))
}

/// Delete a dish.
#[utoipa::path(
    post,
    path = "/dishes/{id}/delete",
    params(("id" = i64, Path, description = "Dish id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such dish", body = Error)
    ),
    tags = ["dishes"],
    operation_id = "deleteDish"
)]
#[post("/dishes/{id:\\d+}/delete")]
pub async fn delete_dish(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .commands
        .delete_dish(DishId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Assign the signed-in cook to the dish, or unassign them.
///
/// Queues a flash message and redirects to the dish page.
#[utoipa::path(
    post,
    path = "/dishes/{id}/toggle-assign",
    params(("id" = i64, Path, description = "Dish id")),
    responses(
        (status = 303, description = "Toggled; see the dish page", headers(("Location" = String))),
        (status = 404, description = "No such dish", body = Error)
    ),
    tags = ["dishes"],
    operation_id = "toggleDishAssignment"
)]
#[post("/dishes/{id:\\d+}/toggle-assign")]
pub async fn toggle_assign(
    state: web::Data<HttpState>,
    cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let dish_id = DishId::new(path.into_inner());
    let outcome = state
        .commands
        .toggle_assignment(cook.id(), dish_id)
        .await?;
    let message = outcome.notification();
    debug!(%dish_id, %message, "queued assignment notification");
    cook.session().push_message(message)?;
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/dishes/{dish_id}")))
        .finish())
}
