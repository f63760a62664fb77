//! Credential exchange handler.
//!
//! ```text
//! POST /api/login {"username":"root","password":"sekret"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_field;

/// Request body for `POST /api/login`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name (required).
    pub username: Option<String>,
    /// Password (required).
    pub password: Option<String>,
}

/// Token payload returned on successful login.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed bearer token asserting the account's identity.
    pub token: String,
    /// Login name, echoed for client convenience.
    pub username: String,
    /// Display name, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Exchange credentials for a signed bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ErrorBody),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["login"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let body = payload.into_inner();
    let username = require_field(body.username, "username")?;
    let password = require_field(body.password, "password")?;
    let credentials = LoginCredentials::try_from_parts(&username, &password)
        .map_err(map_login_validation_error)?;

    let user = state.login.authenticate(&credentials).await?;
    let token = state.tokens.issue(&user)?;
    Ok(web::Json(LoginResponse {
        token,
        username: user.username().to_string(),
        name: user.name().map(str::to_owned),
    }))
}
