//! OpenAPI document served by Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the bearer-token security scheme referenced by gated endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::blogs::list_blogs,
        crate::inbound::http::blogs::create_blog,
        crate::inbound::http::blogs::update_blog,
        crate::inbound::http::blogs::delete_blog,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::login::login,
    ),
    components(schemas(
        crate::inbound::http::blogs::BlogListEntry,
        crate::inbound::http::blogs::BlogOwnerResponse,
        crate::inbound::http::blogs::BlogResponse,
        crate::inbound::http::blogs::CreateBlogRequest,
        crate::inbound::http::blogs::UpdateBlogRequest,
        crate::inbound::http::users::RegisterRequest,
        crate::inbound::http::users::UserResponse,
        crate::inbound::http::users::UserBlogEntry,
        crate::inbound::http::users::UserListEntry,
        crate::inbound::http::login::LoginRequest,
        crate::inbound::http::login::LoginResponse,
        crate::inbound::http::error::ErrorBody,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "blogs", description = "Blog listing and mutation"),
        (name = "users", description = "Account registration and listing"),
        (name = "login", description = "Credential exchange")
    )
)]
pub struct ApiDoc;
