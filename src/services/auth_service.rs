use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::auth::password;
use crate::auth::rate_limit::LoginRateLimiter;
use crate::auth::token::TokenManager;
use crate::error::{ApiError, Result};
use crate::models::{User, UserProfile};
use crate::storage::Storage;

/// Authentication service: registration, credential login, profile lookup.
///
/// Owns the wiring between the credential store, the token manager, and the
/// login rate limiter. Raw passwords only ever exist inside these methods
/// and are never stored or logged.
pub struct AuthService {
    storage: Arc<dyn Storage>,
    tokens: TokenManager,
    rate_limiter: Arc<LoginRateLimiter>,
}

impl AuthService {
    pub fn new(
        storage: Arc<dyn Storage>,
        tokens: TokenManager,
        rate_limiter: Arc<LoginRateLimiter>,
    ) -> Self {
        Self {
            storage,
            tokens,
            rate_limiter,
        }
    }

    /// Register a new user and issue a session token.
    ///
    /// Fails with `DuplicateEmail` when the address is already taken; the
    /// storage unique constraint backs up the pre-check against races.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(UserProfile, String)> {
        let email = email.trim().to_lowercase();

        if self.storage.get_user_by_email(&email).await?.is_some() {
            debug!("Registration rejected, email already in use");
            return Err(ApiError::DuplicateEmail);
        }

        let password_hash = password::hash_password(password).await?;
        let user = User::new(username.trim().to_string(), email, password_hash);

        self.storage.create_user(&user).await?;
        info!("Registered user {}", user.id);

        let token = self.tokens.issue(&user.id)?;
        Ok((user.profile(), token))
    }

    /// Authenticate with email and password, issuing a session token.
    ///
    /// Order matters: the rate limiter is consulted before the credential
    /// store is touched, unknown emails do not count as failures, and only a
    /// password mismatch feeds the failure counter.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(UserProfile, String)> {
        let email = email.trim().to_lowercase();

        if self.rate_limiter.is_blocked(&email) {
            warn!("Login blocked by rate limiter");
            return Err(ApiError::TooManyAttempts);
        }

        let user = self
            .storage
            .get_user_by_email(&email)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if !password::verify_password(password, &user.password_hash).await? {
            self.rate_limiter.record_failure(&email);
            debug!(
                "Invalid credentials for {} (failure count {})",
                user.id,
                self.rate_limiter.failure_count()
            );
            return Err(ApiError::InvalidCredentials);
        }

        self.rate_limiter.record_success(&email);
        let token = self.tokens.issue(&user.id)?;
        info!("User {} logged in", user.id);

        Ok((user.profile(), token))
    }

    /// Fetch the hash-free profile view for a user id
    pub async fn profile(&self, user_id: &str) -> Result<UserProfile> {
        let user = self
            .storage
            .get_user_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        Ok(user.profile())
    }
}
