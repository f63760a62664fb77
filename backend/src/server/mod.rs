//! Server construction and wiring.

mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{blogs, login, users};
use crate::middleware::Trace;
use crate::outbound::persistence::{
    DbPool, DieselBlogRepository, DieselLoginService, DieselUserRepository,
};
use crate::outbound::token::JwtTokenService;

/// Build the database-backed port bundle for HTTP handlers.
pub fn build_state(pool: &DbPool, token_secret: &[u8]) -> HttpState {
    let users = DieselUserRepository::new(pool.clone());
    let login = Arc::new(DieselLoginService::new(users.clone()));
    HttpState::new(
        Arc::new(DieselBlogRepository::new(pool.clone())),
        Arc::new(users),
        login,
        Arc::new(JwtTokenService::new(token_secret)),
    )
}

/// Assemble the application: routes, state injection, and middleware.
///
/// Shared between `main` and the integration tests so both run the exact
/// same wiring.
pub fn build_app(
    state: HttpState,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(blogs::list_blogs)
        .service(blogs::create_blog)
        .service(blogs::update_blog)
        .service(blogs::delete_blog)
        .service(users::register_user)
        .service(users::list_users)
        .service(login::login);

    let app = App::new()
        .app_data(web::Data::new(state))
        .app_data(health_state)
        .wrap(Trace)
        .service(api)
        .service(health::ready)
        .service(health::live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
