use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use larder_auth_types::identity::Identity;

use crate::domain::types::MembershipKind;
use crate::error::RecipesServiceError;
use crate::handlers::recipe::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::membership::{AddMembershipUseCase, RemoveMembershipUseCase};

async fn add(
    kind: MembershipKind,
    identity: Identity,
    state: AppState,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let usecase = AddMembershipUseCase {
        recipes: state.recipe_repo(),
        memberships: state.membership_repo(),
    };
    let recipe = usecase.execute(kind, identity.user_id, recipe_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeSummaryResponse::new(recipe, &state)),
    ))
}

async fn remove(
    kind: MembershipKind,
    identity: Identity,
    state: AppState,
    recipe_id: i32,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = RemoveMembershipUseCase {
        recipes: state.recipe_repo(),
        memberships: state.membership_repo(),
    };
    usecase.execute(kind, identity.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── /api/recipes/{id}/favorite/ ──────────────────────────────────────────────

pub async fn add_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    add(MembershipKind::Favorite, identity, state, id).await
}

pub async fn remove_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    remove(MembershipKind::Favorite, identity, state, id).await
}

// ── /api/recipes/{id}/shopping_cart/ ─────────────────────────────────────────

pub async fn add_to_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    add(MembershipKind::ShoppingCart, identity, state, id).await
}

pub async fn remove_from_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    remove(MembershipKind::ShoppingCart, identity, state, id).await
}
