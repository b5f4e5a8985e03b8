//! Account field rules and password hashing.

use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::RecipesServiceError;

pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_NAME_LEN: usize = 150;
pub const MAX_PASSWORD_LEN: usize = 150;

/// Registration fields as submitted.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

fn invalid(field: &'static str, reason: &'static str) -> RecipesServiceError {
    RecipesServiceError::InvalidField { field, reason }
}

/// Letters, digits and `_ . @ + -`.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
}

pub fn validate_password(
    field: &'static str,
    password: &str,
) -> Result<(), RecipesServiceError> {
    if password.is_empty() {
        return Err(invalid(field, "may not be blank"));
    }
    if password.chars().count() > MAX_PASSWORD_LEN {
        return Err(invalid(field, "must be at most 150 characters"));
    }
    Ok(())
}

pub fn validate_new_account(account: &NewAccount) -> Result<(), RecipesServiceError> {
    let email = account.email.trim();
    if email.is_empty() {
        return Err(invalid("email", "may not be blank"));
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(invalid("email", "must be at most 254 characters"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(invalid("email", "must be a valid email address")),
    }

    if account.username.chars().count() > MAX_NAME_LEN {
        return Err(invalid("username", "must be at most 150 characters"));
    }
    if !is_valid_username(&account.username) {
        return Err(invalid(
            "username",
            "may contain only letters, digits and @/./+/-/_",
        ));
    }

    for (field, value) in [
        ("first_name", &account.first_name),
        ("last_name", &account.last_name),
    ] {
        if value.trim().is_empty() {
            return Err(invalid(field, "may not be blank"));
        }
        if value.chars().count() > MAX_NAME_LEN {
            return Err(invalid(field, "must be at most 150 characters"));
        }
    }

    validate_password("password", &account.password)
}

pub fn hash_password(password: &str) -> Result<String, RecipesServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

/// `false` for a wrong password. A malformed stored hash is an internal error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, RecipesServiceError> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| anyhow!("parse password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
