use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};

use larder_auth_types::identity::Identity;

use crate::domain::shopping_list::SHOPPING_LIST_FILENAME;
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── GET /api/recipes/download_shopping_cart/ ─────────────────────────────────

pub async fn download_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, RecipesServiceError> {
    let usecase = DownloadShoppingListUseCase {
        memberships: state.membership_repo(),
    };
    let body = usecase.execute(identity.user_id).await?;
    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
            ),
        ],
        body,
    ))
}
