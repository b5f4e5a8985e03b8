use chrono::{DateTime, Utc};
use uuid::Uuid;

use larder_domain::user::UserRole;

use crate::error::RecipesServiceError;

/// Account record. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// A user as seen by a particular viewer.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    /// Whether the viewer subscribes to this user. Always false for anonymous viewers.
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// Catalog import row, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Recipe header row.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i32,
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Media-relative path of the stored image.
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Ingredient reference with amount, as submitted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Ingredient line re-joined with the live catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredientLine {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Validated recipe ready to be persisted.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Validated recipe update. `None` scalars stay unchanged; collections are always replaced.
#[derive(Debug, Clone)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Full read projection of a recipe relative to a viewer.
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub author: UserProfile,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredientLine>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Recipe listing filters. Viewer-relative filters are already resolved to a user id, or
/// left `None` when the viewer is anonymous.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author_id: Option<Uuid>,
    /// Tag slugs, matched as "any of".
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<Uuid>,
    pub in_cart_of: Option<Uuid>,
}

/// The two "user selected recipe" relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipKind {
    Favorite,
    ShoppingCart,
}

impl MembershipKind {
    pub fn already_exists(self) -> RecipesServiceError {
        match self {
            Self::Favorite => RecipesServiceError::FavoriteAlreadyExists,
            Self::ShoppingCart => RecipesServiceError::ShoppingCartAlreadyExists,
        }
    }

    pub fn not_found(self) -> RecipesServiceError {
        match self {
            Self::Favorite => RecipesServiceError::FavoriteNotFound,
            Self::ShoppingCart => RecipesServiceError::ShoppingCartNotFound,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::ShoppingCart => "shopping_cart",
        }
    }
}

/// One ingredient line from a recipe in a user's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// An author as rendered in subscription responses.
#[derive(Debug, Clone)]
pub struct AuthorSummary {
    pub profile: UserProfile,
    pub recipes: Vec<Recipe>,
    pub recipes_count: u64,
}
