use crate::domain::repository::CatalogRepository;
use crate::domain::types::{Ingredient, NewIngredient, Tag};
use crate::error::RecipesServiceError;

pub const MAX_INGREDIENT_FIELD_LEN: usize = 200;

// ── Tags ─────────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<C: CatalogRepository> {
    pub catalog: C,
}

impl<C: CatalogRepository> ListTagsUseCase<C> {
    pub async fn execute(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        self.catalog.list_tags().await
    }
}

pub struct GetTagUseCase<C: CatalogRepository> {
    pub catalog: C,
}

impl<C: CatalogRepository> GetTagUseCase<C> {
    pub async fn execute(&self, id: i32) -> Result<Tag, RecipesServiceError> {
        self.catalog
            .find_tag(id)
            .await?
            .ok_or(RecipesServiceError::TagNotFound)
    }
}

// ── Ingredients ──────────────────────────────────────────────────────────────

pub struct ListIngredientsUseCase<C: CatalogRepository> {
    pub catalog: C,
}

impl<C: CatalogRepository> ListIngredientsUseCase<C> {
    /// Blank prefixes list everything.
    pub async fn execute(&self, name: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = name.map(str::trim).filter(|p| !p.is_empty());
        self.catalog.list_ingredients(prefix).await
    }
}

pub struct GetIngredientUseCase<C: CatalogRepository> {
    pub catalog: C,
}

impl<C: CatalogRepository> GetIngredientUseCase<C> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, RecipesServiceError> {
        self.catalog
            .find_ingredient(id)
            .await?
            .ok_or(RecipesServiceError::IngredientNotFound)
    }
}

// ── ImportIngredients ────────────────────────────────────────────────────────

pub fn validate_new_ingredient(ingredient: &NewIngredient) -> Result<(), RecipesServiceError> {
    for (field, value) in [
        ("name", &ingredient.name),
        ("measurement_unit", &ingredient.measurement_unit),
    ] {
        if value.trim().is_empty() {
            return Err(RecipesServiceError::InvalidField {
                field,
                reason: "may not be blank",
            });
        }
        if value.chars().count() > MAX_INGREDIENT_FIELD_LEN {
            return Err(RecipesServiceError::InvalidField {
                field,
                reason: "must be at most 200 characters",
            });
        }
    }
    Ok(())
}

/// Import outcome: rows inserted and rows skipped with the reason.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<(NewIngredient, RecipesServiceError)>,
}

pub struct ImportIngredientsUseCase<C: CatalogRepository> {
    pub catalog: C,
}

impl<C: CatalogRepository> ImportIngredientsUseCase<C> {
    /// Each row is validated and inserted on its own; failures are collected, not fatal.
    /// Storage failures other than duplicates abort the import.
    pub async fn execute(
        &self,
        rows: Vec<NewIngredient>,
    ) -> Result<ImportReport, RecipesServiceError> {
        let mut report = ImportReport::default();
        for row in rows {
            let row = NewIngredient {
                name: row.name.trim().to_owned(),
                measurement_unit: row.measurement_unit.trim().to_owned(),
            };
            if let Err(e) = validate_new_ingredient(&row) {
                tracing::warn!(name = %row.name, error = %e, "skipping invalid ingredient");
                report.skipped.push((row, e));
                continue;
            }
            match self.catalog.create_ingredient(&row).await {
                Ok(_) => report.imported += 1,
                Err(e @ RecipesServiceError::IngredientAlreadyExists) => {
                    tracing::warn!(
                        name = %row.name,
                        unit = %row.measurement_unit,
                        "skipping duplicate ingredient"
                    );
                    report.skipped.push((row, e));
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!(
            imported = report.imported,
            skipped = report.skipped.len(),
            "ingredient import finished"
        );
        Ok(report)
    }
}
