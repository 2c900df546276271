//! Session helpers so handlers never touch `actix_session` directly.
//!
//! The cookie session carries the signed-in cook id, the index page visit
//! counter and queued flash messages.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{CookId, Error, ErrorCode};
use crate::inbound::http::state::HttpState;

pub(crate) const COOK_ID_KEY: &str = "cook_id";
pub(crate) const NUM_VISITS_KEY: &str = "num_visits";
pub(crate) const MESSAGES_KEY: &str = "messages";

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

/// Newtype wrapper exposing kitchen-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember the signed-in cook. The session id is renewed first.
    pub fn persist_cook(&self, cook_id: CookId) -> Result<(), Error> {
        self.0.renew();
        self.0.insert(COOK_ID_KEY, cook_id.get()).map_err(write_error)
    }

    /// The signed-in cook, if any.
    pub fn cook_id(&self) -> Result<Option<CookId>, Error> {
        let raw = self.0.get::<i64>(COOK_ID_KEY).map_err(read_error)?;
        Ok(raw.map(CookId::new))
    }

    /// The signed-in cook or `401 Unauthorized`.
    pub fn require_cook(&self) -> Result<CookId, Error> {
        self.cook_id()?
            .ok_or_else(|| Error::unauthorized("Authentication credentials were not provided."))
    }

    /// Increment and return the per-session visit counter.
    pub fn record_visit(&self) -> Result<u64, Error> {
        let visits = self
            .0
            .get::<u64>(NUM_VISITS_KEY)
            .map_err(read_error)?
            .unwrap_or_default()
            .saturating_add(1);
        self.0.insert(NUM_VISITS_KEY, visits).map_err(write_error)?;
        Ok(visits)
    }

    /// Queue a flash message for the next detail view.
    pub fn push_message(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut messages = self
            .0
            .get::<Vec<String>>(MESSAGES_KEY)
            .map_err(read_error)?
            .unwrap_or_default();
        messages.push(message.into());
        self.0.insert(MESSAGES_KEY, messages).map_err(write_error)
    }

    /// Drain queued flash messages.
    pub fn take_messages(&self) -> Result<Vec<String>, Error> {
        let messages = self
            .0
            .remove_as::<Vec<String>>(MESSAGES_KEY)
            .transpose()
            .map_err(read_error)?;
        Ok(messages.unwrap_or_default())
    }

    /// Forget everything, including the signed-in cook.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Extractor for routes that require a signed-in cook.
///
/// Rejects with `401 Unauthorized` before the handler body runs, both for
/// anonymous sessions and for sessions whose cook has since been deleted.
/// The latter are purged.
#[derive(Clone)]
pub struct AuthenticatedCook {
    id: CookId,
    session: SessionContext,
}

impl AuthenticatedCook {
    pub fn id(&self) -> CookId {
        self.id
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}

impl FromRequest for AuthenticatedCook {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = fut.await?;
            let id = session.require_cook()?;
            let state = state.ok_or_else(|| Error::internal("kitchen state is not configured"))?;
            match state.kitchen.cook(id).await {
                Ok(_) => Ok(Self { id, session }),
                Err(err) if err.code() == ErrorCode::NotFound => {
                    warn!(cook_id = %id, "session refers to a deleted cook");
                    session.purge();
                    Err(Error::unauthorized("Authentication credentials were not provided.").into())
                }
                Err(err) => Err(err.into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::{
        kitchen_state, register_cook, session_cookie, test_session_middleware,
    };

    fn session_test_app(
        state: HttpState,
        cook: CookId,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state))
            .route(
                "/login",
                web::get().to(move |session: SessionContext| async move {
                    session.persist_cook(cook)?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/whoami",
                web::get().to(|cook: AuthenticatedCook| async move {
                    HttpResponse::Ok().body(cook.id().to_string())
                }),
            )
            .route(
                "/visit",
                web::get().to(|session: SessionContext| async move {
                    let visits = session.record_visit()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(visits.to_string()))
                }),
            )
            .route(
                "/flash",
                web::get().to(|session: SessionContext| async move {
                    session.push_message("first")?;
                    session.push_message("second")?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/drain",
                web::get().to(|session: SessionContext| async move {
                    let messages = session.take_messages()?;
                    Ok::<_, Error>(HttpResponse::Ok().json(messages))
                }),
            )
    }

    fn get(uri: &str, cookie: Option<Cookie<'static>>) -> test::TestRequest {
        let request = test::TestRequest::get().uri(uri);
        match cookie {
            Some(cookie) => request.cookie(cookie),
            None => request,
        }
    }

    #[actix_web::test]
    async fn authenticated_cook_round_trips() {
        let (state, commands) = kitchen_state();
        let cook = register_cook(commands.as_ref(), "chef1").await;
        let app = test::init_service(session_test_app(state, cook.id)).await;

        let login = test::call_service(&app, get("/login", None).to_request()).await;
        let cookie = session_cookie(&login);
        let res = test::call_service(&app, get("/whoami", Some(cookie)).to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, cook.id.to_string());
    }

    #[actix_web::test]
    async fn deleted_cook_sessions_are_purged() {
        let (state, commands) = kitchen_state();
        let cook = register_cook(commands.as_ref(), "chef1").await;
        let app = test::init_service(session_test_app(state, cook.id)).await;

        let login = test::call_service(&app, get("/login", None).to_request()).await;
        let cookie = session_cookie(&login);
        commands.delete_cook(cook.id).await.expect("cook deleted");

        let res = test::call_service(&app, get("/whoami", Some(cookie.clone())).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let cleared = res
            .response()
            .cookies()
            .find(|candidate| candidate.name() == "session")
            .map(|candidate| candidate.value().to_owned());
        assert_eq!(cleared.as_deref(), Some(""));
    }

    #[actix_web::test]
    async fn sessions_for_unknown_cooks_are_unauthorised() {
        let (state, _) = kitchen_state();
        let app = test::init_service(session_test_app(state, CookId::new(7))).await;

        let login = test::call_service(&app, get("/login", None).to_request()).await;
        let cookie = session_cookie(&login);
        let res = test::call_service(&app, get("/whoami", Some(cookie)).to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn anonymous_requests_are_unauthorised() {
        let (state, _) = kitchen_state();
        let app = test::init_service(session_test_app(state, CookId::new(7))).await;

        let res = test::call_service(&app, get("/whoami", None).to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn visits_increment_per_session() {
        let (state, _) = kitchen_state();
        let app = test::init_service(session_test_app(state, CookId::new(7))).await;

        let first = test::call_service(&app, get("/visit", None).to_request()).await;
        let cookie = session_cookie(&first);
        assert_eq!(test::read_body(first).await, "1");
        let second = test::call_service(&app, get("/visit", Some(cookie)).to_request()).await;

        assert_eq!(test::read_body(second).await, "2");
    }

    #[actix_web::test]
    async fn messages_are_drained_once() {
        let (state, _) = kitchen_state();
        let app = test::init_service(session_test_app(state, CookId::new(7))).await;

        let flash = test::call_service(&app, get("/flash", None).to_request()).await;
        let cookie = session_cookie(&flash);
        let drained = test::call_service(&app, get("/drain", Some(cookie)).to_request()).await;
        let cookie = session_cookie(&drained);
        let messages: Vec<String> = test::read_body_json(drained).await;
        assert_eq!(messages, ["first", "second"]);

        let again = test::call_service(&app, get("/drain", Some(cookie)).to_request()).await;
        let messages: Vec<String> = test::read_body_json(again).await;
        assert!(messages.is_empty());
    }
}
