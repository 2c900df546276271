//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::TestRequest;
use actix_web::{App, web};
use serde_json::json;

use crate::domain::ports::KitchenCommand;
use crate::domain::{
    Cook, CookProfile, Email, KitchenRepositories, KitchenService, NewCook, NewPassword,
    PasswordLoginService, PersonalName, Username, YearsOfExperience,
};
use crate::inbound::http::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryKitchenStore;

/// Password given to every cook created by [`register_cook`].
pub const PASSWORD: &str = "pasta-al-dente";

/// Session middleware with a fresh key and the `Secure` flag off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`.
///
/// # Panics
///
/// When the response did not set one.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Handler state over an empty in-memory store, plus the command port.
pub fn kitchen_state() -> (HttpState, Arc<dyn KitchenCommand>) {
    let store = Arc::new(InMemoryKitchenStore::new());
    let service = Arc::new(KitchenService::new(KitchenRepositories::shared(Arc::clone(
        &store,
    ))));
    let state = HttpState::new(
        Arc::new(PasswordLoginService::new(store)),
        service.clone(),
        service.clone(),
    );
    let commands: Arc<dyn KitchenCommand> = service;
    (state, commands)
}

/// Register `username` with [`PASSWORD`] and five years of experience.
pub async fn register_cook(commands: &dyn KitchenCommand, username: &str) -> Cook {
    let profile = CookProfile {
        username: Username::new(username).expect("username"),
        first_name: PersonalName::default(),
        last_name: PersonalName::default(),
        email: Email::parse_optional("").expect("blank email"),
        years_of_experience: YearsOfExperience::try_from(5).expect("experience"),
    };
    let password = NewPassword::confirm(PASSWORD, PASSWORD).expect("password");
    commands
        .register_cook(NewCook { profile, password })
        .await
        .expect("cook registered")
}

/// `POST /accounts/login` for `username`.
pub fn login_request(username: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/accounts/login")
        .set_json(json!({ "username": username, "password": password }))
}

/// Every kitchen route over `state`, with test sessions and error handlers.
pub fn kitchen_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .configure(crate::inbound::http::configure)
}

