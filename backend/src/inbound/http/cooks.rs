//! Cook pages: staff listing, profiles and registration.
//!
//! ```text
//! GET  /cooks?username=ann&page=1
//! GET  /cooks/{id}
//! GET  /cooks/new
//! POST /cooks/new {"username":"anna","password1":"…","password2":"…","years_of_experience":4}
//! GET  /cooks/{id}/edit
//! POST /cooks/{id}/edit {"username":"anna","email":"anna@example.com","years_of_experience":5}
//! POST /cooks/{id}/delete
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::validation::{ForField, reject};
use crate::domain::{
    Cook, CookDetail, CookId, CookProfile, Email, EntityKind, Error, NewCook, NewPassword,
    PersonalName, Username, YearsOfExperience,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::listing::{Listing, ListingParams, parse_listing};
use crate::inbound::http::session::AuthenticatedCook;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const YEARS: FieldName = FieldName::new("years_of_experience");

fn years_of_experience(raw: Option<i64>) -> Result<YearsOfExperience, Error> {
    let value = require(raw, YEARS)?;
    YearsOfExperience::try_from(value).for_field(YEARS.as_str())
}

fn personal_names(first: &str, last: &str) -> Result<(PersonalName, PersonalName), Error> {
    Ok((
        PersonalName::new(first).for_field("first_name")?,
        PersonalName::new(last).for_field("last_name")?,
    ))
}

/// Registration body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct CookRegistrationForm {
    /// Login name.
    pub username: String,
    /// Password.
    pub password1: String,
    /// Password confirmation.
    pub password2: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Whole years, `0..=50`.
    pub years_of_experience: Option<i64>,
}

impl CookRegistrationForm {
    fn new_cook(&self) -> Result<NewCook, Error> {
        let username = Username::new(&self.username).for_field("username")?;
        let password = NewPassword::confirm(&self.password1, &self.password2).map_err(|violation| {
            let field = violation.field();
            reject(field, violation)
        })?;
        let (first_name, last_name) = personal_names(&self.first_name, &self.last_name)?;
        let years_of_experience = years_of_experience(self.years_of_experience)?;
        Ok(NewCook {
            profile: CookProfile {
                username,
                first_name,
                last_name,
                email: None,
                years_of_experience,
            },
            password,
        })
    }
}

/// Profile and experience update body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct CookProfileForm {
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address; blank clears it.
    pub email: String,
    /// Whole years, `0..=50`.
    pub years_of_experience: Option<i64>,
}

impl CookProfileForm {
    fn filled(cook: &Cook) -> Self {
        Self {
            username: cook.username.as_str().to_owned(),
            first_name: cook.first_name.as_str().to_owned(),
            last_name: cook.last_name.as_str().to_owned(),
            email: cook
                .email
                .as_ref()
                .map(|email| email.as_str().to_owned())
                .unwrap_or_default(),
            years_of_experience: Some(i64::from(cook.years_of_experience.get())),
        }
    }

    fn profile(&self) -> Result<CookProfile, Error> {
        let username = Username::new(&self.username).for_field("username")?;
        let (first_name, last_name) = personal_names(&self.first_name, &self.last_name)?;
        let email = Email::parse_optional(&self.email).for_field("email")?;
        let years_of_experience = years_of_experience(self.years_of_experience)?;
        Ok(CookProfile {
            username,
            first_name,
            last_name,
            email,
            years_of_experience,
        })
    }
}

/// Paged cooks filtered by `username`.
#[utoipa::path(
    get,
    path = "/cooks",
    params(
        ("username" = Option<String>, Query, description = "Case-insensitive substring of the username"),
        ("page" = Option<String>, Query, description = "Page number or `last`")
    ),
    responses(
        (status = 200, description = "Cook page"),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["cooks"],
    operation_id = "listCooks"
)]
#[get("/cooks")]
pub async fn list_cooks(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    params: web::Query<ListingParams>,
) -> ApiResult<web::Json<Listing<Cook>>> {
    let (query, form) = parse_listing(EntityKind::Cook, &params);
    let page = state.kitchen.list_cooks(&query).await?;
    Ok(web::Json(Listing::new(form, page)))
}

/// A cook with the dishes they cook.
#[utoipa::path(
    get,
    path = "/cooks/{id}",
    params(("id" = i64, Path, description = "Cook id")),
    responses(
        (status = 200, description = "Cook", body = CookDetail),
        (status = 404, description = "No such cook", body = Error)
    ),
    tags = ["cooks"],
    operation_id = "getCook"
)]
#[get("/cooks/{id:\\d+}")]
pub async fn cook_detail(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CookDetail>> {
    let detail = state
        .kitchen
        .cook_detail(CookId::new(path.into_inner()))
        .await?;
    Ok(web::Json(detail))
}

/// Blank registration form.
#[utoipa::path(
    get,
    path = "/cooks/new",
    responses((status = 200, description = "Blank form", body = CookRegistrationForm)),
    tags = ["cooks"],
    operation_id = "newCookForm"
)]
#[get("/cooks/new")]
pub async fn new_cook_form(_cook: AuthenticatedCook) -> web::Json<CookRegistrationForm> {
    web::Json(CookRegistrationForm::default())
}

/// Register a cook.
#[utoipa::path(
    post,
    path = "/cooks/new",
    request_body = CookRegistrationForm,
    responses(
        (status = 201, description = "Registered", body = Cook),
        (status = 400, description = "Invalid field", body = Error),
        (status = 409, description = "Username already taken", body = Error)
    ),
    tags = ["cooks"],
    operation_id = "registerCook"
)]
#[post("/cooks/new")]
pub async fn register_cook(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    payload: web::Json<CookRegistrationForm>,
) -> ApiResult<HttpResponse> {
    let new_cook = payload.new_cook()?;
    let created = state.commands.register_cook(new_cook).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Current profile values.
#[utoipa::path(
    get,
    path = "/cooks/{id}/edit",
    params(("id" = i64, Path, description = "Cook id")),
    responses(
        (status = 200, description = "Filled form", body = CookProfileForm),
        (status = 404, description = "No such cook", body = Error)
    ),
    tags = ["cooks"],
    operation_id = "editCookForm"
)]
#[get("/cooks/{id:\\d+}/edit")]
pub async fn edit_cook_form(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CookProfileForm>> {
    let cook = state.kitchen.cook(CookId::new(path.into_inner())).await?;
    Ok(web::Json(CookProfileForm::filled(&cook)))
}

/// Update a cook's profile and experience.
#[utoipa::path(
    post,
    path = "/cooks/{id}/edit",
    params(("id" = i64, Path, description = "Cook id")),
    request_body = CookProfileForm,
    responses(
        (status = 200, description = "Updated", body = Cook),
        (status = 400, description = "Invalid field", body = Error),
        (status = 404, description = "No such cook", body = Error),
        (status = 409, description = "Username already taken", body = Error)
    ),
    tags = ["cooks"],
    operation_id = "updateCook"
)]
#[post("/cooks/{id:\\d+}/edit")]
pub async fn update_cook(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
    payload: web::Json<CookProfileForm>,
) -> ApiResult<web::Json<Cook>> {
    let profile = payload.profile()?;
    let updated = state
        .commands
        .update_cook(CookId::new(path.into_inner()), profile)
        .await?;
    Ok(web::Json(updated))
}

/// Delete a cook; their dishes stay.
#[utoipa::path(
    post,
    path = "/cooks/{id}/delete",
    params(("id" = i64, Path, description = "Cook id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such cook", body = Error)
    ),
    tags = ["cooks"],
    operation_id = "deleteCook"
)]
#[post("/cooks/{id:\\d+}/delete")]
pub async fn delete_cook(
    state: web::Data<HttpState>,
    _cook: AuthenticatedCook,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .commands
        .delete_cook(CookId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
