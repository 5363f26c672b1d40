//! Authentication handlers.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use warden_shared::ApiResponse;
use warden_shared::dto::{AuthResponse, LoginRequest, UserResponse};

use super::user::user_response;
use crate::extract::ValidatedJson;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Current identity: the stored user plus the role titles from the token.
#[derive(Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
    pub roles: Vec<String>,
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<HttpResponse> {
    let token = state.users.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AuthResponse {
        access_token: token.access_token,
        token_type: "Bearer".to_string(),
        expires_in: token.expires_in.max(0) as u64,
        user: user_response(token.user),
    })))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.users.retrieve(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(MeResponse {
        user: user_response(user),
        roles: identity.roles,
    })))
}
