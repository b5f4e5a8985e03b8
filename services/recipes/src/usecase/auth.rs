use larder_auth_types::token::issue_access_token;

use crate::domain::account::verify_password;
use crate::domain::repository::UserRepository;
use crate::error::RecipesServiceError;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<U: UserRepository> LoginUseCase<U> {
    /// Returns a signed access token. Unknown email and wrong password are indistinguishable.
    pub async fn execute(&self, input: LoginInput) -> Result<String, RecipesServiceError> {
        let user = self
            .users
            .find_by_email(input.email.trim())
            .await?
            .ok_or(RecipesServiceError::InvalidCredentials)?;
        if !verify_password(&input.password, &user.password_hash)? {
            return Err(RecipesServiceError::InvalidCredentials);
        }
        let (token, _exp) =
            issue_access_token(user.id, user.role, &self.jwt_secret, self.token_ttl_secs)
                .map_err(|e| RecipesServiceError::Internal(e.into()))?;
        tracing::debug!(user_id = %user.id, "access token issued");
        Ok(token)
    }
}
