use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_auth_types::identity::{Identity, Viewer};
use larder_domain::pagination::{Page, PageRequest};

use crate::domain::composition::RecipeInput;
use crate::domain::types::{IngredientAmount, Recipe, RecipeDetail, RecipeIngredientLine};
use crate::error::RecipesServiceError;
use crate::handlers::tag::TagResponse;
use crate::handlers::user::UserResponse;
use crate::handlers::{parse_query, query_flag};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase,
    RecipeListQuery, UpdateRecipeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredientLine> for RecipeIngredientResponse {
    fn from(line: RecipeIngredientLine) -> Self {
        Self {
            id: line.ingredient.id,
            name: line.ingredient.name,
            measurement_unit: line.ingredient.measurement_unit,
            amount: line.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl RecipeResponse {
    pub fn new(detail: RecipeDetail, state: &AppState) -> Self {
        let RecipeDetail {
            recipe,
            author,
            tags,
            ingredients,
            is_favorited,
            is_in_shopping_cart,
        } = detail;
        Self {
            id: recipe.id,
            tags: tags.into_iter().map(TagResponse::from).collect(),
            author: author.into(),
            ingredients: ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            is_favorited,
            is_in_shopping_cart,
            name: recipe.name,
            image: state.media_link(&recipe.image),
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Condensed projection used by membership and subscription responses.
#[derive(Debug, Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl RecipeSummaryResponse {
    pub fn new(recipe: Recipe, state: &AppState) -> Self {
        Self {
            id: recipe.id,
            image: state.media_link(&recipe.image),
            name: recipe.name,
            cooking_time: recipe.cooking_time,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipeRequest {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tags: Option<Vec<i32>>,
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
}

impl From<RecipeRequest> for RecipeInput {
    fn from(body: RecipeRequest) -> Self {
        Self {
            name: body.name,
            text: body.text,
            cooking_time: body.cooking_time,
            image: body.image,
            tags: body.tags,
            ingredients: body.ingredients.map(|lines| {
                lines
                    .into_iter()
                    .map(|line| IngredientAmount {
                        ingredient_id: line.id,
                        amount: line.amount,
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

impl RecipeListParams {
    fn into_parts(self) -> (RecipeListQuery, PageRequest) {
        let page = PageRequest::from_query(self.page, self.limit);
        let query = RecipeListQuery {
            author_id: self.author,
            tag_slugs: self.tags,
            is_favorited: query_flag(self.is_favorited.as_deref()),
            is_in_shopping_cart: query_flag(self.is_in_shopping_cart.as_deref()),
        };
        (query, page)
    }
}

async fn recipe_detail(
    state: &AppState,
    recipe_id: i32,
    viewer: Option<Uuid>,
) -> Result<RecipeDetail, RecipesServiceError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        memberships: state.membership_repo(),
        subscriptions: state.subscription_repo(),
    };
    usecase.execute(recipe_id, viewer).await
}

// ── GET /api/recipes/ ────────────────────────────────────────────────────────

pub async fn list_recipes(
    viewer: Viewer,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<RecipeResponse>>, RecipesServiceError> {
    let params: RecipeListParams = parse_query(raw_query.as_deref())?;
    let (query, page) = params.into_parts();
    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        memberships: state.membership_repo(),
        subscriptions: state.subscription_repo(),
    };
    let details = usecase.execute(query, viewer.user_id(), page).await?;
    Ok(Json(details.map(|detail| RecipeResponse::new(detail, &state))))
}

// ── POST /api/recipes/ ───────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), RecipesServiceError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        catalog: state.catalog_repo(),
        images: state.image_store(),
    };
    let recipe_id = usecase.execute(identity.user_id, body.into()).await?;
    let detail = recipe_detail(&state, recipe_id, Some(identity.user_id)).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse::new(detail, &state)),
    ))
}

// ── GET /api/recipes/{id}/ ───────────────────────────────────────────────────

pub async fn get_recipe(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let detail = recipe_detail(&state, id, viewer.user_id()).await?;
    Ok(Json(RecipeResponse::new(detail, &state)))
}

// ── PATCH /api/recipes/{id}/ ─────────────────────────────────────────────────

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<RecipeRequest>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        catalog: state.catalog_repo(),
        images: state.image_store(),
    };
    usecase
        .execute(identity.user_id, identity.role, id, body.into())
        .await?;
    let detail = recipe_detail(&state, id, Some(identity.user_id)).await?;
    Ok(Json(RecipeResponse::new(detail, &state)))
}

// ── DELETE /api/recipes/{id}/ ────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
        images: state.image_store(),
    };
    usecase.execute(identity.user_id, identity.role, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
