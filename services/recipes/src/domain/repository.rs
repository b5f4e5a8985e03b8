#![allow(async_fn_in_trait)]

use std::collections::HashSet;

use uuid::Uuid;

use larder_domain::pagination::PageRequest;

use crate::domain::image::ImageFormat;
use crate::domain::types::{
    CartLine, Ingredient, MembershipKind, NewIngredient, Recipe, RecipeChanges, RecipeDraft,
    RecipeFilter, RecipeIngredientLine, Tag, User,
};
use crate::error::RecipesServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RecipesServiceError>;

    /// Fails with `UserAlreadyExists` when the email or username is taken.
    async fn create(&self, user: &User) -> Result<(), RecipesServiceError>;

    /// Users ordered by (first_name, last_name, username), plus the total count.
    async fn list(&self, page: PageRequest) -> Result<(Vec<User>, u64), RecipesServiceError>;

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), RecipesServiceError>;

    async fn has_admin(&self) -> Result<bool, RecipesServiceError>;
}

/// Read access to tags and ingredients, plus catalog import.
pub trait CatalogRepository: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, RecipesServiceError>;
    async fn find_tag(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError>;

    /// Ingredients ordered by name, optionally filtered by a case-insensitive name prefix.
    async fn list_ingredients(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError>;
    async fn find_ingredient(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError>;

    /// Subset of `ids` that exist.
    async fn existing_tag_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError>;
    async fn existing_ingredient_ids(
        &self,
        ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError>;

    /// Fails with `IngredientAlreadyExists` when (name, unit) is taken.
    async fn create_ingredient(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<Ingredient, RecipesServiceError>;
}

/// Repository for recipes with their tag links and ingredient lines.
pub trait RecipeRepository: Send + Sync {
    /// Insert header, tag links and ingredient lines atomically. Returns the new id.
    async fn create(
        &self,
        author_id: Uuid,
        draft: &RecipeDraft,
    ) -> Result<i32, RecipesServiceError>;

    /// Apply scalar changes and replace tag links and ingredient lines atomically.
    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), RecipesServiceError>;

    /// Returns `true` if a row was deleted. Links, lines and memberships cascade.
    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError>;

    /// Tags of a recipe ordered by name.
    async fn tags_of(&self, recipe_id: i32) -> Result<Vec<Tag>, RecipesServiceError>;

    async fn ingredients_of(
        &self,
        recipe_id: i32,
    ) -> Result<Vec<RecipeIngredientLine>, RecipesServiceError>;

    /// Newest first, plus the total count matching `filter`.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<(Vec<Recipe>, u64), RecipesServiceError>;

    /// Newest first, at most `limit` when given.
    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, RecipesServiceError>;

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError>;
}

/// Favorites and shopping cart, keyed by [`MembershipKind`].
pub trait MembershipRepository: Send + Sync {
    /// Fails with `kind.already_exists()` when the entry is present.
    async fn add(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<(), RecipesServiceError>;

    /// Returns `true` if an entry was deleted.
    async fn remove(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    async fn contains(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// Every ingredient line of every recipe in the user's cart, unaggregated.
    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RecipesServiceError>;
}

/// Directed user -> author subscription edges.
pub trait SubscriptionRepository: Send + Sync {
    /// Fails with `SubscriptionAlreadyExists` for an existing edge and `SelfSubscription`
    /// when `user_id == author_id`.
    async fn create(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RecipesServiceError>;

    /// Returns `true` if an edge was deleted.
    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError>;

    async fn exists(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError>;

    /// Authors `user_id` subscribes to, ordered like user listings, plus the total count.
    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), RecipesServiceError>;
}

/// Storage for decoded recipe images.
pub trait ImageStore: Send + Sync {
    /// Persist the bytes and return the media-relative path.
    async fn save(
        &self,
        bytes: &[u8],
        format: ImageFormat,
    ) -> Result<String, RecipesServiceError>;

    async fn remove(&self, path: &str) -> Result<(), RecipesServiceError>;
}
