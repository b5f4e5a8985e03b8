//! Token helpers for tests that go through the real `Identity` extractor.

use http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use larder_auth_types::token::issue_access_token;
use larder_domain::user::UserRole;

pub const TEST_JWT_SECRET: &str = "larder-test-secret";

/// Caller identity that signs its own access tokens with [`TEST_JWT_SECRET`].
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn user() -> Self {
        Self::new(Uuid::now_v7(), UserRole::Normal)
    }

    pub fn admin() -> Self {
        Self::new(Uuid::now_v7(), UserRole::Admin)
    }

    pub fn token(&self) -> String {
        issue_access_token(self.user_id, self.role, TEST_JWT_SECRET, 3600)
            .expect("sign test token")
            .0
    }

    /// `Authorization: Token <jwt>` header pair.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Token {}", self.token()))
            .expect("token is a valid header value");
        (AUTHORIZATION, value)
    }
}
