//! Sign in and sign out.
//!
//! ```text
//! POST /accounts/login {"username":"chef1","password":"pasta-al-dente"}
//! POST /accounts/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::validation::reject;
use crate::domain::{Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body. Missing fields count as blank.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// Cook username.
    pub username: String,
    /// Plain text password.
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(request: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&request.username, &request.password).map_err(|violation| {
            let field = violation.field();
            reject(field, violation)
        })
    }
}

/// Check credentials and start a session for the cook.
#[utoipa::path(
    post,
    path = "/accounts/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank username or password", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/accounts/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(&payload.into_inner())?;
    let cook_id = state.login.authenticate(&credentials).await?;
    session.persist_cook(cook_id)?;
    info!(%cook_id, "cook signed in");
    Ok(HttpResponse::Ok().finish())
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/accounts/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/accounts/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{
        PASSWORD, kitchen_state, login_request, register_cook, session_cookie,
        test_session_middleware,
    };

    #[rstest]
    #[case(json!({"username": "  ", "password": "secret"}), "username")]
    #[case(json!({"username": "chef1", "password": ""}), "password")]
    #[case(json!({"username": "chef1"}), "password")]
    #[actix_web::test]
    async fn blank_fields_are_rejected(#[case] body: Value, #[case] field: &str) {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(kitchen_state().0))
                .service(login),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/accounts/login")
            .set_json(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: Value = test::read_body_json(res).await;
        assert_eq!(payload["details"]["field"], field);
        assert_eq!(payload["details"]["code"], "required");
    }

    #[rstest]
    #[case(PASSWORD, StatusCode::OK)]
    #[case("not-the-password", StatusCode::UNAUTHORIZED)]
    #[actix_web::test]
    async fn login_checks_the_password(#[case] password: &str, #[case] expected: StatusCode) {
        let (state, commands) = kitchen_state();
        register_cook(commands.as_ref(), "chef1").await;
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .service(login),
        )
        .await;
        let res = test::call_service(&app, login_request("chef1", password).to_request()).await;
        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let (state, commands) = kitchen_state();
        register_cook(commands.as_ref(), "chef1").await;
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .service(login)
                .service(logout),
        )
        .await;
        let res = test::call_service(&app, login_request("chef1", PASSWORD).to_request()).await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/accounts/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let removal = session_cookie(&res);
        assert_eq!(removal.value(), "");
    }
}
