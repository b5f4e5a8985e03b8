use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use larder_core::health::{database_ready, healthz};
use larder_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{login, logout},
    ingredient::{get_ingredient, list_ingredients},
    membership::{add_favorite, add_to_shopping_cart, remove_favorite, remove_from_shopping_cart},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
    shopping_list::download_shopping_cart,
    subscription::{list_subscriptions, subscribe, unsubscribe},
    tag::{get_tag, list_tags},
    user::{get_me, get_user, list_users, register_user, set_password},
};
use crate::infra::media::RECIPE_IMAGE_DIR;
use crate::state::AppState;

/// Request bodies carry base64 images of up to 10 MiB decoded.
pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024 * 1024;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    let images_mount = format!(
        "{}/{RECIPE_IMAGE_DIR}",
        state.media_url.trim_end_matches('/')
    );
    let images_dir = state.images.image_dir();

    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/token/login/", post(login))
        .route("/api/auth/token/logout/", post(logout))
        // Users
        .route("/api/users/", get(list_users).post(register_user))
        .route("/api/users/me/", get(get_me))
        .route("/api/users/set_password/", post(set_password))
        .route("/api/users/subscriptions/", get(list_subscriptions))
        .route("/api/users/{id}/", get(get_user))
        .route("/api/users/{id}/subscribe/", post(subscribe).delete(unsubscribe))
        // Catalog
        .route("/api/tags/", get(list_tags))
        .route("/api/tags/{id}/", get(get_tag))
        .route("/api/ingredients/", get(list_ingredients))
        .route("/api/ingredients/{id}/", get(get_ingredient))
        // Recipes
        .route("/api/recipes/", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/download_shopping_cart/",
            get(download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}/",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route(
            "/api/recipes/{id}/favorite/",
            post(add_favorite).delete(remove_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart/",
            post(add_to_shopping_cart).delete(remove_from_shopping_cart),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        // Media (finished images only)
        .nest_service(&images_mount, ServeDir::new(images_dir));

    router
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
