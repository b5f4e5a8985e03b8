use uuid::Uuid;

use larder_domain::pagination::{Page, PageRequest};
use larder_domain::user::UserRole;

use crate::domain::composition::{
    RecipeInput, Violations, first_unknown, validate_new_recipe, validate_recipe_changes,
};
use crate::domain::repository::{
    CatalogRepository, ImageStore, MembershipRepository, RecipeRepository, SubscriptionRepository,
    UserRepository,
};
use crate::domain::types::{
    IngredientAmount, MembershipKind, Recipe, RecipeChanges, RecipeDetail, RecipeDraft,
    RecipeFilter,
};
use crate::error::RecipesServiceError;
use crate::usecase::user::profile_for;

/// Build the full read projection of `recipe` relative to `viewer`.
pub async fn load_recipe_detail<R, U, M, S>(
    recipes: &R,
    users: &U,
    memberships: &M,
    subscriptions: &S,
    recipe: Recipe,
    viewer: Option<Uuid>,
) -> Result<RecipeDetail, RecipesServiceError>
where
    R: RecipeRepository,
    U: UserRepository,
    M: MembershipRepository,
    S: SubscriptionRepository,
{
    let author = users
        .find_by_id(recipe.author_id)
        .await?
        .ok_or(RecipesServiceError::UserNotFound)?;
    let author = profile_for(subscriptions, author, viewer).await?;
    let tags = recipes.tags_of(recipe.id).await?;
    let ingredients = recipes.ingredients_of(recipe.id).await?;
    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(user_id) => (
            memberships
                .contains(MembershipKind::Favorite, user_id, recipe.id)
                .await?,
            memberships
                .contains(MembershipKind::ShoppingCart, user_id, recipe.id)
                .await?,
        ),
        None => (false, false),
    };
    Ok(RecipeDetail {
        recipe,
        author,
        tags,
        ingredients,
        is_favorited,
        is_in_shopping_cart,
    })
}

/// Reject unknown tag or ingredient ids, reporting the first one of each in submission order.
async fn ensure_references_exist<C: CatalogRepository>(
    catalog: &C,
    tags: &[i32],
    ingredients: &[IngredientAmount],
) -> Result<(), RecipesServiceError> {
    let mut violations = Violations::default();
    let ingredient_ids: Vec<i32> = ingredients.iter().map(|i| i.ingredient_id).collect();
    let existing = catalog.existing_ingredient_ids(&ingredient_ids).await?;
    if let Some(id) = first_unknown(ingredient_ids, &existing) {
        violations.push(RecipesServiceError::UnknownIngredient(id));
    }
    let existing = catalog.existing_tag_ids(tags).await?;
    if let Some(id) = first_unknown(tags.iter().copied(), &existing) {
        violations.push(RecipesServiceError::UnknownTag(id));
    }
    violations.finish()
}

async fn discard_image<I: ImageStore>(images: &I, path: &str) {
    if let Err(e) = images.remove(path).await {
        tracing::warn!(path, error = %e, "failed to remove recipe image");
    }
}

fn ensure_can_modify(
    recipe: &Recipe,
    user_id: Uuid,
    role: UserRole,
) -> Result<(), RecipesServiceError> {
    if recipe.author_id == user_id || role.is_admin() {
        Ok(())
    } else {
        Err(RecipesServiceError::Forbidden)
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R: RecipeRepository, C: CatalogRepository, I: ImageStore> {
    pub recipes: R,
    pub catalog: C,
    pub images: I,
}

impl<R: RecipeRepository, C: CatalogRepository, I: ImageStore> CreateRecipeUseCase<R, C, I> {
    /// Validate and persist a new recipe authored by `author_id`. Returns its id.
    pub async fn execute(
        &self,
        author_id: Uuid,
        input: RecipeInput,
    ) -> Result<i32, RecipesServiceError> {
        let valid = validate_new_recipe(&input)?;
        ensure_references_exist(&self.catalog, &valid.tags, &valid.ingredients).await?;

        let image_path = self
            .images
            .save(&valid.image.bytes, valid.image.format)
            .await?;
        let draft = RecipeDraft {
            name: valid.scalars.name,
            text: valid.scalars.text,
            cooking_time: valid.scalars.cooking_time,
            image: image_path,
            tags: valid.tags,
            ingredients: valid.ingredients,
        };
        match self.recipes.create(author_id, &draft).await {
            Ok(id) => {
                tracing::info!(recipe_id = id, %author_id, "recipe created");
                Ok(id)
            }
            Err(e) => {
                discard_image(&self.images, &draft.image).await;
                Err(e)
            }
        }
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R: RecipeRepository, C: CatalogRepository, I: ImageStore> {
    pub recipes: R,
    pub catalog: C,
    pub images: I,
}

impl<R: RecipeRepository, C: CatalogRepository, I: ImageStore> UpdateRecipeUseCase<R, C, I> {
    /// Absent scalars stay as they are; tags and ingredients are always replaced.
    pub async fn execute(
        &self,
        user_id: Uuid,
        role: UserRole,
        recipe_id: i32,
        input: RecipeInput,
    ) -> Result<(), RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        ensure_can_modify(&recipe, user_id, role)?;

        let valid = validate_recipe_changes(&input)?;
        ensure_references_exist(&self.catalog, &valid.tags, &valid.ingredients).await?;

        let new_image = match &valid.image {
            Some(image) => Some(self.images.save(&image.bytes, image.format).await?),
            None => None,
        };
        let changes = RecipeChanges {
            name: valid.scalars.name,
            text: valid.scalars.text,
            cooking_time: valid.scalars.cooking_time,
            image: new_image,
            tags: valid.tags,
            ingredients: valid.ingredients,
        };
        if let Err(e) = self.recipes.update(recipe_id, &changes).await {
            if let Some(path) = &changes.image {
                discard_image(&self.images, path).await;
            }
            return Err(e);
        }
        if changes.image.is_some() {
            discard_image(&self.images, &recipe.image).await;
        }
        tracing::info!(recipe_id, %user_id, "recipe updated");
        Ok(())
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, I: ImageStore> {
    pub recipes: R,
    pub images: I,
}

impl<R: RecipeRepository, I: ImageStore> DeleteRecipeUseCase<R, I> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        role: UserRole,
        recipe_id: i32,
    ) -> Result<(), RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        ensure_can_modify(&recipe, user_id, role)?;
        if !self.recipes.delete(recipe_id).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        discard_image(&self.images, &recipe.image).await;
        tracing::info!(recipe_id, %user_id, "recipe deleted");
        Ok(())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R, U, M, S> {
    pub recipes: R,
    pub users: U,
    pub memberships: M,
    pub subscriptions: S,
}

impl<R, U, M, S> GetRecipeUseCase<R, U, M, S>
where
    R: RecipeRepository,
    U: UserRepository,
    M: MembershipRepository,
    S: SubscriptionRepository,
{
    pub async fn execute(
        &self,
        recipe_id: i32,
        viewer: Option<Uuid>,
    ) -> Result<RecipeDetail, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        load_recipe_detail(
            &self.recipes,
            &self.users,
            &self.memberships,
            &self.subscriptions,
            recipe,
            viewer,
        )
        .await
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

/// Listing filters as requested. The viewer-relative flags are ignored for anonymous viewers.
#[derive(Debug, Clone, Default)]
pub struct RecipeListQuery {
    pub author_id: Option<Uuid>,
    pub tag_slugs: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeListQuery {
    pub fn into_filter(self, viewer: Option<Uuid>) -> RecipeFilter {
        RecipeFilter {
            author_id: self.author_id,
            tag_slugs: self.tag_slugs,
            favorited_by: viewer.filter(|_| self.is_favorited),
            in_cart_of: viewer.filter(|_| self.is_in_shopping_cart),
        }
    }
}

pub struct ListRecipesUseCase<R, U, M, S> {
    pub recipes: R,
    pub users: U,
    pub memberships: M,
    pub subscriptions: S,
}

impl<R, U, M, S> ListRecipesUseCase<R, U, M, S>
where
    R: RecipeRepository,
    U: UserRepository,
    M: MembershipRepository,
    S: SubscriptionRepository,
{
    pub async fn execute(
        &self,
        query: RecipeListQuery,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<RecipeDetail>, RecipesServiceError> {
        let page = page.clamped();
        let filter = query.into_filter(viewer);
        let (recipes, count) = self.recipes.list(&filter, page).await?;
        let mut details = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            details.push(
                load_recipe_detail(
                    &self.recipes,
                    &self.users,
                    &self.memberships,
                    &self.subscriptions,
                    recipe,
                    viewer,
                )
                .await?,
            );
        }
        Ok(Page::new(details, count, page))
    }
}
