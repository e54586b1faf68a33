use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::error::ApiError;
use crate::server::app_state::AppState;

/// Resolved caller identity, attached to every protected request.
///
/// Extraction runs the full access-control contract:
/// 1. bearer token must be present in the authorization header,
/// 2. its signature and expiry must verify,
/// 3. the embedded identity must still resolve to a stored user.
///
/// The third step rejects structurally valid tokens whose account has been
/// removed since issuance.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<AuthenticatedUser, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let header_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Box::pin(async move {
            let state = state
                .ok_or_else(|| ApiError::Internal("Application state not configured".to_string()))?;

            let raw = header_value.filter(|v| !v.trim().is_empty()).ok_or(ApiError::MissingToken)?;
            let token = raw.strip_prefix("Bearer ").unwrap_or(&raw).trim();
            if token.is_empty() {
                return Err(ApiError::MissingToken);
            }

            let user_id = state.tokens.verify(token)?;

            // The token is self-contained, but the account it points at may
            // be gone; re-resolve before granting access.
            match state.storage.get_user_by_id(&user_id).await {
                Ok(Some(_)) => Ok(AuthenticatedUser { user_id }),
                Ok(None) => {
                    debug!("Valid token for unknown user {}", user_id);
                    Err(ApiError::UnknownUser)
                }
                Err(e) => Err(e.into()),
            }
        })
    }
}
