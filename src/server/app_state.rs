use std::sync::Arc;

use crate::auth::rate_limit::LoginRateLimiter;
use crate::auth::token::TokenManager;
use crate::config::settings::Config;
use crate::error::{ApiError, Result};
use crate::services::{AuthService, TaskService};
use crate::storage::Storage;

/// Shared application state handed to every handler.
///
/// Owns the storage backend, the token manager, the login rate limiter,
/// and the services built on top of them.
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub tokens: TokenManager,
    pub rate_limiter: Arc<LoginRateLimiter>,
    pub auth_service: Arc<AuthService>,
    pub task_service: Arc<TaskService>,
}

impl AppState {
    /// Build application state from configuration and a storage backend.
    ///
    /// Fails when no signing secret is configured; the secret is never
    /// defaulted or hard-coded.
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Result<Self> {
        if config.auth.jwt_secret.is_empty() {
            return Err(ApiError::Config(
                "AUTH_JWT_SECRET must be set; refusing to sign tokens without a secret".to_string(),
            ));
        }

        let tokens = TokenManager::new(&config.auth.jwt_secret, config.auth.token_expiry_hours);
        let rate_limiter = Arc::new(LoginRateLimiter::new(config.auth.max_login_failures));

        let auth_service = Arc::new(AuthService::new(
            storage.clone(),
            tokens.clone(),
            rate_limiter.clone(),
        ));
        let task_service = Arc::new(TaskService::new(storage.clone()));

        Ok(Self {
            config,
            storage,
            tokens,
            rate_limiter,
            auth_service,
            task_service,
        })
    }
}
