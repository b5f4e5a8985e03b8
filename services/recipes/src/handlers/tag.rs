use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::domain::types::Tag;
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::catalog::{GetTagUseCase, ListTagsUseCase};

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

// ── GET /api/tags/ ───────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, RecipesServiceError> {
    let usecase = ListTagsUseCase {
        catalog: state.catalog_repo(),
    };
    let tags = usecase.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /api/tags/{id}/ ──────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagResponse>, RecipesServiceError> {
    let usecase = GetTagUseCase {
        catalog: state.catalog_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}
