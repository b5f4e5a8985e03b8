//! Favorites and shopping cart share one pair of use cases, keyed by [`MembershipKind`].

use uuid::Uuid;

use crate::domain::repository::{MembershipRepository, RecipeRepository};
use crate::domain::types::{MembershipKind, Recipe};
use crate::error::RecipesServiceError;

// ── AddMembership ────────────────────────────────────────────────────────────

pub struct AddMembershipUseCase<R: RecipeRepository, M: MembershipRepository> {
    pub recipes: R,
    pub memberships: M,
}

impl<R: RecipeRepository, M: MembershipRepository> AddMembershipUseCase<R, M> {
    /// Returns the recipe for the condensed projection.
    pub async fn execute(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<Recipe, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        self.memberships.add(kind, user_id, recipe_id).await?;
        tracing::debug!(kind = kind.as_str(), %user_id, recipe_id, "membership added");
        Ok(recipe)
    }
}

// ── RemoveMembership ─────────────────────────────────────────────────────────

pub struct RemoveMembershipUseCase<R: RecipeRepository, M: MembershipRepository> {
    pub recipes: R,
    pub memberships: M,
}

impl<R: RecipeRepository, M: MembershipRepository> RemoveMembershipUseCase<R, M> {
    pub async fn execute(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<(), RecipesServiceError> {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        if !self.memberships.remove(kind, user_id, recipe_id).await? {
            return Err(kind.not_found());
        }
        tracing::debug!(kind = kind.as_str(), %user_id, recipe_id, "membership removed");
        Ok(())
    }
}
