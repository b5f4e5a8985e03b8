use chrono::Utc;
use uuid::Uuid;

use larder_domain::pagination::{Page, PageRequest};
use larder_domain::user::UserRole;

use crate::domain::account::{
    NewAccount, hash_password, validate_new_account, validate_password, verify_password,
};
use crate::domain::repository::{SubscriptionRepository, UserRepository};
use crate::domain::types::{User, UserProfile};
use crate::error::RecipesServiceError;

/// Attach the viewer-relative `is_subscribed` flag to `user`.
pub async fn profile_for<S: SubscriptionRepository>(
    subscriptions: &S,
    user: User,
    viewer: Option<Uuid>,
) -> Result<UserProfile, RecipesServiceError> {
    let is_subscribed = match viewer {
        Some(viewer_id) if viewer_id != user.id => {
            subscriptions.exists(viewer_id, user.id).await?
        }
        _ => false,
    };
    Ok(UserProfile {
        user,
        is_subscribed,
    })
}

async fn register<U: UserRepository>(
    users: &U,
    account: NewAccount,
    role: UserRole,
) -> Result<User, RecipesServiceError> {
    validate_new_account(&account)?;
    let user = User {
        id: Uuid::now_v7(),
        email: account.email.trim().to_owned(),
        username: account.username,
        first_name: account.first_name.trim().to_owned(),
        last_name: account.last_name.trim().to_owned(),
        password_hash: hash_password(&account.password)?,
        role,
        created_at: Utc::now(),
    };
    users.create(&user).await?;
    tracing::info!(user_id = %user.id, role = role.as_u8(), "user registered");
    Ok(user)
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, account: NewAccount) -> Result<User, RecipesServiceError> {
        register(&self.users, account, UserRole::Normal).await
    }
}

// ── CreateSuperuser ──────────────────────────────────────────────────────────

pub struct CreateSuperuserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateSuperuserUseCase<U> {
    /// Register an admin unless one already exists. Returns `None` when skipped.
    pub async fn execute(&self, account: NewAccount) -> Result<Option<User>, RecipesServiceError> {
        if self.users.has_admin().await? {
            return Ok(None);
        }
        register(&self.users, account, UserRole::Admin)
            .await
            .map(Some)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> GetUserUseCase<U, S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<UserProfile, RecipesServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        profile_for(&self.subscriptions, user, viewer).await
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> ListUsersUseCase<U, S> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<UserProfile>, RecipesServiceError> {
        let page = page.clamped();
        let (users, count) = self.users.list(page).await?;
        let mut profiles = Vec::with_capacity(users.len());
        for user in users {
            profiles.push(profile_for(&self.subscriptions, user, viewer).await?);
        }
        Ok(Page::new(profiles, count, page))
    }
}

// ── SetPassword ──────────────────────────────────────────────────────────────

pub struct SetPasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct SetPasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetPasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: SetPasswordInput,
    ) -> Result<(), RecipesServiceError> {
        validate_password("new_password", &input.new_password)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        if !verify_password(&input.current_password, &user.password_hash)? {
            return Err(RecipesServiceError::InvalidPassword);
        }
        let hash = hash_password(&input.new_password)?;
        self.users.update_password_hash(user_id, &hash).await?;
        tracing::info!(%user_id, "password changed");
        Ok(())
    }
}
