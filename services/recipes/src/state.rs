use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use larder_auth_types::identity::JwtSecret;

use crate::infra::db::{
    DbCatalogRepository, DbMembershipRepository, DbRecipeRepository, DbSubscriptionRepository,
    DbUserRepository,
};
use crate::infra::media::FsImageStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub token_ttl_secs: u64,
    pub images: FsImageStore,
    /// Public URL prefix for stored media, always ending in `/`.
    pub media_url: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn catalog_repo(&self) -> DbCatalogRepository {
        DbCatalogRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn membership_repo(&self) -> DbMembershipRepository {
        DbMembershipRepository {
            db: self.db.clone(),
        }
    }

    pub fn subscription_repo(&self) -> DbSubscriptionRepository {
        DbSubscriptionRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_store(&self) -> FsImageStore {
        self.images.clone()
    }

    /// Public URL for a media-relative path.
    pub fn media_link(&self, path: &str) -> String {
        format!("{}{}", self.media_url, path)
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}
