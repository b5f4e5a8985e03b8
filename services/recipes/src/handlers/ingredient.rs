use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use serde::{Deserialize, Serialize};

use crate::domain::types::Ingredient;
use crate::error::RecipesServiceError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::catalog::{GetIngredientUseCase, ListIngredientsUseCase};

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IngredientListQuery {
    pub name: Option<String>,
}

// ── GET /api/ingredients/ ────────────────────────────────────────────────────

pub async fn list_ingredients(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<IngredientResponse>>, RecipesServiceError> {
    let query: IngredientListQuery = parse_query(raw_query.as_deref())?;
    let usecase = ListIngredientsUseCase {
        catalog: state.catalog_repo(),
    };
    let ingredients = usecase.execute(query.name.as_deref()).await?;
    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

// ── GET /api/ingredients/{id}/ ───────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, RecipesServiceError> {
    let usecase = GetIngredientUseCase {
        catalog: state.catalog_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}
