use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use larder_core::error::{ErrorBody, error_response};

/// One entry of [`RecipesServiceError::ValidationFailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl From<RecipesServiceError> for FieldError {
    fn from(error: RecipesServiceError) -> Self {
        let message = match &error {
            RecipesServiceError::InvalidField { reason, .. } => (*reason).to_owned(),
            other => other.to_string(),
        };
        Self {
            field: error.field().unwrap_or("non_field_errors"),
            message,
        }
    }
}

/// Recipes service error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("tag not found")]
    TagNotFound,

    #[error("recipe is not in favorites")]
    FavoriteNotFound,
    #[error("recipe is not in the shopping cart")]
    ShoppingCartNotFound,
    #[error("not subscribed to this author")]
    SubscriptionNotFound,

    #[error("recipe is already in favorites")]
    FavoriteAlreadyExists,
    #[error("recipe is already in the shopping cart")]
    ShoppingCartAlreadyExists,
    #[error("already subscribed to this author")]
    SubscriptionAlreadyExists,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("ingredient already exists")]
    IngredientAlreadyExists,
    #[error("cannot subscribe to yourself")]
    SelfSubscription,

    #[error("at least one ingredient is required")]
    MissingIngredients,
    #[error("ingredient {0} is listed more than once")]
    DuplicateIngredient(i32),
    #[error("ingredient {0} does not exist")]
    UnknownIngredient(i32),
    #[error("ingredient amount must be at least 1")]
    InvalidAmount,
    #[error("at least one tag is required")]
    MissingTags,
    #[error("tag {0} is listed more than once")]
    DuplicateTag(i32),
    #[error("tag {0} does not exist")]
    UnknownTag(i32),
    #[error("image is required")]
    MissingImage,
    #[error("image could not be decoded")]
    InvalidImage,
    #[error("{field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    #[error("{} fields are invalid", .0.len())]
    ValidationFailed(Vec<FieldError>),
    #[error("invalid query string")]
    InvalidQuery,

    #[error("unable to log in with provided credentials")]
    InvalidCredentials,
    #[error("current password is incorrect")]
    InvalidPassword,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::FavoriteNotFound => "FAVORITE_NOT_FOUND",
            Self::ShoppingCartNotFound => "SHOPPING_CART_NOT_FOUND",
            Self::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            Self::FavoriteAlreadyExists => "FAVORITE_ALREADY_EXISTS",
            Self::ShoppingCartAlreadyExists => "SHOPPING_CART_ALREADY_EXISTS",
            Self::SubscriptionAlreadyExists => "SUBSCRIPTION_ALREADY_EXISTS",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::IngredientAlreadyExists => "INGREDIENT_ALREADY_EXISTS",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::MissingIngredients => "MISSING_INGREDIENTS",
            Self::DuplicateIngredient(_) => "DUPLICATE_INGREDIENT",
            Self::UnknownIngredient(_) => "UNKNOWN_INGREDIENT",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::MissingTags => "MISSING_TAGS",
            Self::DuplicateTag(_) => "DUPLICATE_TAG",
            Self::UnknownTag(_) => "UNKNOWN_TAG",
            Self::MissingImage => "MISSING_IMAGE",
            Self::InvalidImage => "INVALID_IMAGE",
            Self::InvalidField { .. } => "INVALID_FIELD",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Request field the error refers to, for field-level validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingIngredients
            | Self::DuplicateIngredient(_)
            | Self::UnknownIngredient(_)
            | Self::InvalidAmount => Some("ingredients"),
            Self::MissingTags | Self::DuplicateTag(_) | Self::UnknownTag(_) => Some("tags"),
            Self::MissingImage | Self::InvalidImage => Some("image"),
            Self::InvalidField { field, .. } => Some(*field),
            Self::InvalidPassword => Some("current_password"),
            _ => None,
        }
    }

    /// Per-field messages of a collected validation failure.
    pub fn field_errors(&self) -> Option<BTreeMap<&'static str, String>> {
        match self {
            Self::ValidationFailed(errors) => Some(
                errors
                    .iter()
                    .map(|e| (e.field, e.message.clone()))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::RecipeNotFound
            | Self::UserNotFound
            | Self::IngredientNotFound
            | Self::TagNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Conflicts, absent membership entries and validation failures.
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        error_response(
            self.status(),
            ErrorBody {
                kind: self.kind(),
                message: self.to_string(),
                field: self.field(),
                errors: self.field_errors(),
            },
        )
    }
}
