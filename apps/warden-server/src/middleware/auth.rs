//! Bearer-token identity extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use warden_core::ports::{AuthError, TokenClaims};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Taking an `Identity` argument makes a handler require a valid Bearer
/// token; anything else is rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
    pub username: String,
    pub roles: Vec<String>,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            roles: claims.roles,
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(AppError::Internal(
                "AppState not found in app data".to_string(),
            )));
        };

        let result = bearer_token(req)
            .and_then(|token| state.tokens.validate_token(token))
            .map(Identity::from)
            .map_err(AppError::from);

        ready(result)
    }
}
