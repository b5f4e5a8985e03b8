//! Validation of a recipe's scalar fields and nested tag/ingredient collections.
//!
//! Every check runs against the whole payload and failures are collected per field;
//! nothing here touches storage.

use std::collections::HashSet;

use crate::domain::image::{DecodedImage, decode_image_payload};
use crate::domain::types::IngredientAmount;
use crate::error::{FieldError, RecipesServiceError};

pub const MAX_RECIPE_NAME_LEN: usize = 200;

/// Recipe fields as submitted by a client. Any of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct RecipeInput {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    /// Raw image payload (base64 or data URL).
    pub image: Option<String>,
    pub tags: Option<Vec<i32>>,
    pub ingredients: Option<Vec<IngredientAmount>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredScalars {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

/// Scalar fields after validation. `None` means "not submitted".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidScalars {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

/// A new recipe that passed every field check.
#[derive(Debug, Clone)]
pub struct ValidNewRecipe {
    pub scalars: RequiredScalars,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
    pub image: DecodedImage,
}

/// Recipe changes that passed every field check.
#[derive(Debug, Clone)]
pub struct ValidRecipeChanges {
    pub scalars: ValidScalars,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
    pub image: Option<DecodedImage>,
}

/// Field failures gathered across a whole payload.
#[derive(Debug, Default)]
pub struct Violations(Vec<RecipesServiceError>);

impl Violations {
    pub fn push(&mut self, error: RecipesServiceError) {
        self.0.push(error);
    }

    /// Record the error of a failed check and hand back the value of a passing one.
    pub fn check<T>(&mut self, result: Result<T, RecipesServiceError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    /// A lone failure keeps its own kind; several become `ValidationFailed`.
    pub fn into_error(mut self) -> RecipesServiceError {
        if self.0.len() == 1 {
            return self.0.remove(0);
        }
        RecipesServiceError::ValidationFailed(self.0.into_iter().map(FieldError::from).collect())
    }

    pub fn finish(self) -> Result<(), RecipesServiceError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, RecipesServiceError> {
    value.ok_or(RecipesServiceError::InvalidField {
        field,
        reason: "this field is required",
    })
}

fn checked_name(name: &str) -> Result<String, RecipesServiceError> {
    if name.trim().is_empty() {
        return Err(RecipesServiceError::InvalidField {
            field: "name",
            reason: "may not be blank",
        });
    }
    if name.chars().count() > MAX_RECIPE_NAME_LEN {
        return Err(RecipesServiceError::InvalidField {
            field: "name",
            reason: "must be at most 200 characters",
        });
    }
    Ok(name.trim().to_owned())
}

fn checked_text(text: &str) -> Result<String, RecipesServiceError> {
    if text.trim().is_empty() {
        return Err(RecipesServiceError::InvalidField {
            field: "text",
            reason: "may not be blank",
        });
    }
    Ok(text.to_owned())
}

fn checked_cooking_time(cooking_time: i32) -> Result<i32, RecipesServiceError> {
    if cooking_time < 1 {
        return Err(RecipesServiceError::InvalidField {
            field: "cooking_time",
            reason: "must be at least 1",
        });
    }
    Ok(cooking_time)
}

/// Non-empty, no repeated ids, every amount at least 1.
pub fn validate_ingredients(
    ingredients: Option<&[IngredientAmount]>,
) -> Result<Vec<IngredientAmount>, RecipesServiceError> {
    let ingredients = match ingredients {
        Some(items) if !items.is_empty() => items,
        _ => return Err(RecipesServiceError::MissingIngredients),
    };
    let mut seen = HashSet::with_capacity(ingredients.len());
    for item in ingredients {
        if !seen.insert(item.ingredient_id) {
            return Err(RecipesServiceError::DuplicateIngredient(item.ingredient_id));
        }
        if item.amount < 1 {
            return Err(RecipesServiceError::InvalidAmount);
        }
    }
    Ok(ingredients.to_vec())
}

/// Non-empty, no repeated ids.
pub fn validate_tags(tags: Option<&[i32]>) -> Result<Vec<i32>, RecipesServiceError> {
    let tags = match tags {
        Some(items) if !items.is_empty() => items,
        _ => return Err(RecipesServiceError::MissingTags),
    };
    let mut seen = HashSet::with_capacity(tags.len());
    for &id in tags {
        if !seen.insert(id) {
            return Err(RecipesServiceError::DuplicateTag(id));
        }
    }
    Ok(tags.to_vec())
}

/// Every field of a new recipe is required.
pub fn validate_new_recipe(input: &RecipeInput) -> Result<ValidNewRecipe, RecipesServiceError> {
    let mut violations = Violations::default();
    let name = violations.check(required(input.name.as_deref(), "name").and_then(checked_name));
    let text = violations.check(required(input.text.as_deref(), "text").and_then(checked_text));
    let cooking_time = violations.check(
        required(input.cooking_time, "cooking_time").and_then(checked_cooking_time),
    );
    let ingredients = violations.check(validate_ingredients(input.ingredients.as_deref()));
    let tags = violations.check(validate_tags(input.tags.as_deref()));
    let image = violations.check(match input.image.as_deref() {
        Some(payload) => decode_image_payload(payload),
        None => Err(RecipesServiceError::MissingImage),
    });

    match (name, text, cooking_time, ingredients, tags, image) {
        (Some(name), Some(text), Some(cooking_time), Some(ingredients), Some(tags), Some(image)) => {
            Ok(ValidNewRecipe {
                scalars: RequiredScalars {
                    name,
                    text,
                    cooking_time,
                },
                tags,
                ingredients,
                image,
            })
        }
        _ => Err(violations.into_error()),
    }
}

/// Scalars and image are checked when present; tags and ingredients are always required.
pub fn validate_recipe_changes(
    input: &RecipeInput,
) -> Result<ValidRecipeChanges, RecipesServiceError> {
    let mut violations = Violations::default();
    let name = violations.check(input.name.as_deref().map(checked_name).transpose());
    let text = violations.check(input.text.as_deref().map(checked_text).transpose());
    let cooking_time =
        violations.check(input.cooking_time.map(checked_cooking_time).transpose());
    let ingredients = violations.check(validate_ingredients(input.ingredients.as_deref()));
    let tags = violations.check(validate_tags(input.tags.as_deref()));
    let image = violations.check(input.image.as_deref().map(decode_image_payload).transpose());

    match (name, text, cooking_time, ingredients, tags, image) {
        (Some(name), Some(text), Some(cooking_time), Some(ingredients), Some(tags), Some(image)) => {
            Ok(ValidRecipeChanges {
                scalars: ValidScalars {
                    name,
                    text,
                    cooking_time,
                },
                tags,
                ingredients,
                image,
            })
        }
        _ => Err(violations.into_error()),
    }
}

/// First submitted id missing from `existing`, in submission order.
pub fn first_unknown(ids: impl IntoIterator<Item = i32>, existing: &HashSet<i32>) -> Option<i32> {
    ids.into_iter().find(|id| !existing.contains(id))
}
