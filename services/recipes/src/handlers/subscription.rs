use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_auth_types::identity::Identity;
use larder_domain::pagination::{Page, PageRequest};

use crate::domain::types::AuthorSummary;
use crate::error::RecipesServiceError;
use crate::handlers::parse_query;
use crate::handlers::recipe::RecipeSummaryResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl AuthorResponse {
    fn new(summary: AuthorSummary, state: &AppState) -> Self {
        Self {
            user: summary.profile.into(),
            recipes: summary
                .recipes
                .into_iter()
                .map(|recipe| RecipeSummaryResponse::new(recipe, state))
                .collect(),
            recipes_count: summary.recipes_count,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<u32>,
}

// ── GET /api/users/subscriptions/ ────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<AuthorResponse>>, RecipesServiceError> {
    let query: SubscriptionQuery = parse_query(raw_query.as_deref())?;
    let usecase = ListSubscriptionsUseCase {
        recipes: state.recipe_repo(),
        subscriptions: state.subscription_repo(),
    };
    let page = usecase
        .execute(
            identity.user_id,
            PageRequest::from_query(query.page, query.limit),
            query.recipes_limit,
        )
        .await?;
    Ok(Json(page.map(|summary| AuthorResponse::new(summary, &state))))
}

// ── POST /api/users/{id}/subscribe/ ──────────────────────────────────────────

pub async fn subscribe(
    identity: Identity,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    RawQuery(raw_query): RawQuery,
) -> Result<(StatusCode, Json<AuthorResponse>), RecipesServiceError> {
    let query: SubscriptionQuery = parse_query(raw_query.as_deref())?;
    let usecase = SubscribeUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
        subscriptions: state.subscription_repo(),
    };
    let summary = usecase
        .execute(identity.user_id, author_id, query.recipes_limit)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthorResponse::new(summary, &state)),
    ))
}

// ── DELETE /api/users/{id}/subscribe/ ────────────────────────────────────────

pub async fn unsubscribe(
    identity: Identity,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = UnsubscribeUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    usecase.execute(identity.user_id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
