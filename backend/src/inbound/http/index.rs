//! Kitchen dashboard: record counts and the session visit counter.

use actix_web::{get, web};
use serde::Serialize;

use crate::domain::Error;
use crate::domain::ports::KitchenCounts;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::AuthenticatedCook;
use crate::inbound::http::state::HttpState;

/// Dashboard payload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexResponse {
    /// Record counts per kind.
    #[serde(flatten)]
    pub counts: KitchenCounts,
    /// Dashboard views in this session, this one included.
    pub num_visits: u64,
}

/// Count cooks, dishes, dish types and ingredients.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Dashboard", body = IndexResponse),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["kitchen"],
    operation_id = "index"
)]
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    cook: AuthenticatedCook,
) -> ApiResult<web::Json<IndexResponse>> {
    let counts = state.kitchen.counts().await?;
    let num_visits = cook.session().record_visit()?;
    Ok(web::Json(IndexResponse { counts, num_visits }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    use crate::inbound::http::accounts::login;
    use crate::inbound::http::test_utils::{
        PASSWORD, kitchen_state, login_request, register_cook, session_cookie,
        test_session_middleware,
    };

    #[actix_web::test]
    async fn visits_accumulate_per_session() {
        let (state, commands) = kitchen_state();
        register_cook(commands.as_ref(), "chef1").await;
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .service(login)
                .service(index),
        )
        .await;
        let res = test::call_service(&app, login_request("chef1", PASSWORD).to_request()).await;
        let mut cookie = session_cookie(&res);

        let mut seen = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::get().uri("/").cookie(cookie.clone()).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK);
            cookie = session_cookie(&res);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["numCooks"], 1);
            assert_eq!(body["numDishes"], 0);
            seen.push(body["numVisits"].as_u64());
        }
        assert_eq!(seen, vec![Some(1), Some(2)]);
    }

    #[actix_web::test]
    async fn anonymous_visitors_are_rejected() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(kitchen_state().0))
                .service(index),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
