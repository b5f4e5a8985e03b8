use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use larder_auth_types::identity::Identity;

use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase};

// ── POST /api/auth/token/login/ ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub auth_token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, RecipesServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.0.to_string(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let auth_token = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse { auth_token }))
}

// ── POST /api/auth/token/logout/ ─────────────────────────────────────────────

/// Tokens are stateless; logging out only confirms the caller was authenticated.
pub async fn logout(identity: Identity) -> StatusCode {
    tracing::debug!(user_id = %identity.user_id, "logout");
    StatusCode::NO_CONTENT
}
