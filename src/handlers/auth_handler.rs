use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::guard::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::UserProfile;
use crate::server::app_state::AppState;
use crate::validation;

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus user view returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!("Registration request for {}", body.email);

    validation::validate_registration(&body.username, &body.email, &body.password)
        .into_result()?;

    let (user, token) = state
        .auth_service
        .register(&body.username, &body.email, &body.password)
        .await?;

    Ok(HttpResponse::Created().json(AuthResponse { token, user }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!("Login request for {}", body.email);

    validation::validate_login(&body.email, &body.password).into_result()?;

    let (user, token) = state.auth_service.login(&body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse { token, user }))
}

/// GET /api/auth/profile
pub async fn profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user = state.auth_service.profile(&auth.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}
