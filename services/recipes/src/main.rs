use sea_orm::Database;
use tracing::info;

use larder_auth_types::identity::JwtSecret;
use larder_core::config::Config;
use larder_core::tracing::init_tracing;

use larder_recipes::config::RecipesConfig;
use larder_recipes::infra::media::FsImageStore;
use larder_recipes::router::build_router;
use larder_recipes::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = RecipesConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
        token_ttl_secs: config.access_token_ttl_secs,
        images: FsImageStore::new(&config.media_root),
        media_url: config.media_url_prefix(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.recipes_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(media_root = %config.media_root, "recipes service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
