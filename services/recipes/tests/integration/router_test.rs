use axum::http::{HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;

use larder_auth_types::identity::JwtSecret;
use larder_recipes::domain::image::ImageFormat;
use larder_recipes::domain::repository::ImageStore;
use larder_recipes::infra::media::FsImageStore;
use larder_recipes::router::build_router;
use larder_recipes::state::AppState;
use larder_testing::auth::{MockAuth, TEST_JWT_SECRET};

/// Router over a disconnected database: only paths rejected before storage succeed.
fn server() -> TestServer {
    server_with_images(FsImageStore::new(
        std::env::temp_dir().join("larder-router-test-media"),
    ))
}

fn server_with_images(images: FsImageStore) -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
        token_ttl_secs: 3600,
        images,
        media_url: "/media/".to_owned(),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_probe() {
    let response = server().get("/healthz").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let response = server().get("/readyz").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_attach_request_id() {
    let response = server().get("/healthz").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_require_token_for_current_user() {
    let response = server().get("/api/users/me/").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let response = server()
        .get("/api/recipes/download_shopping_cart/")
        .add_header(
            AUTHORIZATION,
            HeaderValue::from_static("Token eyJhbGciOiJIUzI1NiJ9.e30.c2lnbmF0dXJl"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_anonymous_recipe_creation() {
    let response = server()
        .post("/api/recipes/")
        .json(&serde_json::json!({"name": "Soup"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_anonymous_membership_toggles() {
    let server = server();
    for path in ["/api/recipes/1/favorite/", "/api/recipes/1/shopping_cart/"] {
        assert_eq!(
            server.post(path).await.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            server.delete(path).await.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}

#[tokio::test]
async fn should_acknowledge_logout_for_valid_token() {
    let (name, value): (HeaderName, HeaderValue) = MockAuth::user().header();
    let response = server()
        .post("/api/auth/token/logout/")
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn should_reject_malformed_list_query() {
    let response = server().get("/api/recipes/?page=abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_QUERY");
}

#[tokio::test]
async fn should_reject_recipes_limit_beyond_range() {
    let (name, value): (HeaderName, HeaderValue) = MockAuth::user().header();
    let response = server()
        .get("/api/users/subscriptions/?recipes_limit=18446744073709551615")
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_QUERY");
}

#[tokio::test]
async fn should_serve_stored_images_but_not_staging_files() {
    let root = std::env::temp_dir().join(format!("larder-router-media-{}", uuid::Uuid::new_v4()));
    let images = FsImageStore::new(&root);
    let stored = images
        .save(b"\x89PNG\r\n\x1a\nrest", ImageFormat::Png)
        .await
        .unwrap();
    tokio::fs::create_dir_all(root.join(".tmp")).await.unwrap();
    tokio::fs::write(root.join(".tmp/partial"), b"half").await.unwrap();

    let server = server_with_images(images);
    server
        .get(&format!("/media/{stored}"))
        .await
        .assert_status_ok();
    assert_eq!(
        server.get("/media/.tmp/partial").await.status_code(),
        StatusCode::NOT_FOUND
    );

    tokio::fs::remove_dir_all(&root).await.unwrap();
}
