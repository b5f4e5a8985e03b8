use uuid::Uuid;

use larder_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::domain::types::{AuthorSummary, User, UserProfile};
use crate::error::RecipesServiceError;

async fn author_summary<R: RecipeRepository>(
    recipes: &R,
    author: User,
    is_subscribed: bool,
    recipes_limit: Option<u32>,
) -> Result<AuthorSummary, RecipesServiceError> {
    let author_recipes = recipes
        .list_by_author(author.id, recipes_limit.map(u64::from))
        .await?;
    let recipes_count = recipes.count_by_author(author.id).await?;
    Ok(AuthorSummary {
        profile: UserProfile {
            user: author,
            is_subscribed,
        },
        recipes: author_recipes,
        recipes_count,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U, R, S> {
    pub users: U,
    pub recipes: R,
    pub subscriptions: S,
}

impl<U, R, S> SubscribeUseCase<U, R, S>
where
    U: UserRepository,
    R: RecipeRepository,
    S: SubscriptionRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        author_id: Uuid,
        recipes_limit: Option<u32>,
    ) -> Result<AuthorSummary, RecipesServiceError> {
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        if user_id == author_id {
            return Err(RecipesServiceError::SelfSubscription);
        }
        self.subscriptions.create(user_id, author_id).await?;
        tracing::info!(%user_id, %author_id, "subscription created");
        author_summary(&self.recipes, author, true, recipes_limit).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> UnsubscribeUseCase<U, S> {
    pub async fn execute(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RecipesServiceError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }
        if !self.subscriptions.delete(user_id, author_id).await? {
            return Err(RecipesServiceError::SubscriptionNotFound);
        }
        tracing::info!(%user_id, %author_id, "subscription removed");
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<R: RecipeRepository, S: SubscriptionRepository> {
    pub recipes: R,
    pub subscriptions: S,
}

impl<R: RecipeRepository, S: SubscriptionRepository> ListSubscriptionsUseCase<R, S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<Page<AuthorSummary>, RecipesServiceError> {
        let page = page.clamped();
        let (authors, count) = self.subscriptions.list_authors(user_id, page).await?;
        let mut summaries = Vec::with_capacity(authors.len());
        for author in authors {
            summaries.push(author_summary(&self.recipes, author, true, recipes_limit).await?);
        }
        Ok(Page::new(summaries, count, page))
    }
}
