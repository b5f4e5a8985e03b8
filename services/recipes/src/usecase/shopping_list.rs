use uuid::Uuid;

use crate::domain::repository::MembershipRepository;
use crate::domain::shopping_list::{aggregate, render};
use crate::error::RecipesServiceError;

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<M: MembershipRepository> {
    pub memberships: M,
}

impl<M: MembershipRepository> DownloadShoppingListUseCase<M> {
    /// Plain-text shopping list for every recipe in the user's cart.
    pub async fn execute(&self, user_id: Uuid) -> Result<String, RecipesServiceError> {
        let lines = self.memberships.cart_lines(user_id).await?;
        let items = aggregate(lines);
        tracing::debug!(%user_id, items = items.len(), "shopping list built");
        Ok(render(&items))
    }
}
