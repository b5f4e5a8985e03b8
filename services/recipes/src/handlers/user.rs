use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_auth_types::identity::{Identity, Viewer};
use larder_domain::pagination::{Page, PageRequest};

use crate::domain::account::NewAccount;
use crate::domain::types::{User, UserProfile};
use crate::error::RecipesServiceError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, ListUsersUseCase, RegisterUserUseCase, SetPasswordInput, SetPasswordUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        let UserProfile {
            user,
            is_subscribed,
        } = profile;
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

/// Registration echo; carries no viewer-relative fields.
#[derive(Debug, Serialize)]
pub struct RegisteredUserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for RegisteredUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page, self.limit)
    }
}

// ── POST /api/users/ ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUserResponse>), RecipesServiceError> {
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(NewAccount {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /api/users/ ──────────────────────────────────────────────────────────

pub async fn list_users(
    viewer: Viewer,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<UserResponse>>, RecipesServiceError> {
    let query: PageQuery = parse_query(raw_query.as_deref())?;
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let page = usecase
        .execute(viewer.user_id(), query.page_request())
        .await?;
    Ok(Json(page.map(UserResponse::from)))
}

// ── GET /api/users/{id}/ ─────────────────────────────────────────────────────

pub async fn get_user(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let profile = usecase.execute(id, viewer.user_id()).await?;
    Ok(Json(profile.into()))
}

// ── GET /api/users/me/ ───────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let profile = usecase
        .execute(identity.user_id, Some(identity.user_id))
        .await?;
    Ok(Json(profile.into()))
}

// ── POST /api/users/set_password/ ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

pub async fn set_password(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<SetPasswordRequest>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = SetPasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            SetPasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
