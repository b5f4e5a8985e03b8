use std::collections::HashSet;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, SqlErr,
    TransactionError, TransactionTrait,
    sea_query::{Expr, IntoColumnRef, IntoTableRef, Query, SelectStatement, SimpleExpr},
};
use uuid::Uuid;

use larder_core::sea_ext::StartsWithIgnoreCase;
use larder_domain::pagination::PageRequest;
use larder_domain::user::UserRole;
use larder_recipes_schema::{
    favorite_recipes, ingredients, recipe_ingredients, recipe_tags, recipes,
    shopping_cart_recipes, subscriptions, tags, users,
};

use crate::domain::repository::{
    CatalogRepository, MembershipRepository, RecipeRepository, SubscriptionRepository,
    UserRepository,
};
use crate::domain::types::{
    CartLine, Ingredient, IngredientAmount, MembershipKind, NewIngredient, Recipe, RecipeChanges,
    RecipeDraft, RecipeFilter, RecipeIngredientLine, Tag, User,
};
use crate::error::RecipesServiceError;

/// Check constraint on `subscriptions` forbidding `user_id = author_id`.
pub const SELF_SUBSCRIPTION_CONSTRAINT: &str = "user_not_subscribe_self";

/// How a failed write collided with the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteFailure {
    Duplicate,
    /// A referenced row, or the row being updated, no longer exists.
    MissingReference,
    SelfSubscription,
    Other,
}

impl WriteFailure {
    fn of(e: &DbErr) -> Self {
        if matches!(e, DbErr::RecordNotUpdated) {
            return Self::MissingReference;
        }
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => Self::MissingReference,
            // Check violations carry no SqlErr; the constraint name is in the message.
            _ if e.to_string().contains(SELF_SUBSCRIPTION_CONSTRAINT) => Self::SelfSubscription,
            _ => Self::Other,
        }
    }
}

fn internal<C>(e: DbErr, context: C) -> RecipesServiceError
where
    C: std::fmt::Display + Send + Sync + 'static,
{
    anyhow::Error::new(e).context(context).into()
}

fn user_insert_error(failure: WriteFailure, e: DbErr) -> RecipesServiceError {
    match failure {
        WriteFailure::Duplicate => RecipesServiceError::UserAlreadyExists,
        _ => internal(e, "create user"),
    }
}

fn ingredient_insert_error(failure: WriteFailure, e: DbErr) -> RecipesServiceError {
    match failure {
        WriteFailure::Duplicate => RecipesServiceError::IngredientAlreadyExists,
        _ => internal(e, "create ingredient"),
    }
}

fn recipe_update_error(failure: WriteFailure, e: DbErr) -> RecipesServiceError {
    match failure {
        WriteFailure::MissingReference => RecipesServiceError::RecipeNotFound,
        _ => internal(e, "update recipe"),
    }
}

fn membership_insert_error(
    kind: MembershipKind,
    failure: WriteFailure,
    e: DbErr,
) -> RecipesServiceError {
    match failure {
        WriteFailure::Duplicate => kind.already_exists(),
        WriteFailure::MissingReference => RecipesServiceError::RecipeNotFound,
        _ => internal(e, format!("add {} entry", kind.as_str())),
    }
}

fn subscription_insert_error(failure: WriteFailure, e: DbErr) -> RecipesServiceError {
    match failure {
        WriteFailure::Duplicate => RecipesServiceError::SubscriptionAlreadyExists,
        WriteFailure::SelfSubscription => RecipesServiceError::SelfSubscription,
        WriteFailure::MissingReference => RecipesServiceError::UserNotFound,
        WriteFailure::Other => internal(e, "create subscription"),
    }
}

async fn paginate<E>(
    db: &DatabaseConnection,
    query: Select<E>,
    page: PageRequest,
    what: &'static str,
) -> Result<(Vec<E::Model>, u64), RecipesServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let page = page.clamped();
    let count = query
        .clone()
        .count(db)
        .await
        .with_context(|| format!("count {what}"))?;
    let rows = query
        .offset(page.offset())
        .limit(u64::from(page.limit))
        .all(db)
        .await
        .with_context(|| format!("list {what}"))?;
    Ok((rows, count))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

fn users_in_display_order() -> Select<users::Entity> {
    users::Entity::find()
        .order_by_asc(users::Column::FirstName)
        .order_by_asc(users::Column::LastName)
        .order_by_asc(users::Column::Username)
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(i16::from(user.role.as_u8())),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(user_insert_error(WriteFailure::of(&e), e)),
        }
    }

    async fn list(&self, page: PageRequest) -> Result<(Vec<User>, u64), RecipesServiceError> {
        let (models, count) = paginate(&self.db, users_in_display_order(), page, "users").await?;
        Ok((models.into_iter().map(user_from_model).collect(), count))
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), RecipesServiceError> {
        users::Entity::update_many()
            .col_expr(users::Column::PasswordHash, Expr::value(password_hash))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update password hash")?;
        Ok(())
    }

    async fn has_admin(&self) -> Result<bool, RecipesServiceError> {
        let admins = users::Entity::find()
            .filter(users::Column::Role.eq(i16::from(UserRole::Admin.as_u8())))
            .count(&self.db)
            .await
            .context("count admins")?;
        Ok(admins > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .unwrap_or(UserRole::Normal);
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        role,
        created_at: model.created_at,
    }
}

// ── Catalog repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCatalogRepository {
    pub db: DatabaseConnection,
}

impl CatalogRepository for DbCatalogRepository {
    async fn list_tags(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_tag(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag")?;
        Ok(model.map(tag_from_model))
    }

    async fn list_ingredients(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            query = query.filter(ingredients::Column::Name.starts_with_ignore_case(prefix));
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::MeasurementUnit)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_ingredient(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn existing_tag_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = tags::Entity::find()
            .select_only()
            .column(tags::Column::Id)
            .filter(tags::Column::Id.is_in(ids.to_vec()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("check tag ids")?;
        Ok(found.into_iter().collect())
    }

    async fn existing_ingredient_ids(
        &self,
        ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(ids.to_vec()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("check ingredient ids")?;
        Ok(found.into_iter().collect())
    }

    async fn create_ingredient(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<Ingredient, RecipesServiceError> {
        let result = ingredients::ActiveModel {
            id: NotSet,
            name: Set(ingredient.name.clone()),
            measurement_unit: Set(ingredient.measurement_unit.clone()),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(ingredient_from_model(model)),
            Err(e) => Err(ingredient_insert_error(WriteFailure::of(&e), e)),
        }
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

/// Insert tag links and ingredient lines for `recipe_id`.
async fn insert_links(
    txn: &DatabaseTransaction,
    recipe_id: i32,
    tag_ids: &[i32],
    lines: &[IngredientAmount],
) -> Result<(), DbErr> {
    if !tag_ids.is_empty() {
        recipe_tags::Entity::insert_many(tag_ids.iter().map(|&tag_id| recipe_tags::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(tag_id),
        }))
        .exec_without_returning(txn)
        .await?;
    }
    if !lines.is_empty() {
        recipe_ingredients::Entity::insert_many(lines.iter().map(|line| {
            recipe_ingredients::ActiveModel {
                id: NotSet,
                recipe_id: Set(recipe_id),
                ingredient_id: Set(line.ingredient_id),
                amount: Set(line.amount),
            }
        }))
        .exec_without_returning(txn)
        .await?;
    }
    Ok(())
}

fn recipes_newest_first() -> Select<recipes::Entity> {
    recipes::Entity::find()
        .order_by_desc(recipes::Column::CreatedAt)
        .order_by_desc(recipes::Column::Id)
}

/// `SELECT recipe_col FROM table WHERE user_filter`, for membership `IN` filters.
fn recipe_ids_in(
    table: impl IntoTableRef,
    recipe_col: impl IntoColumnRef,
    user_filter: SimpleExpr,
) -> SelectStatement {
    Query::select()
        .column(recipe_col)
        .from(table)
        .and_where(user_filter)
        .to_owned()
}

impl RecipeRepository for DbRecipeRepository {
    async fn create(
        &self,
        author_id: Uuid,
        draft: &RecipeDraft,
    ) -> Result<i32, RecipesServiceError> {
        let draft = draft.clone();
        let id = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                Box::pin(async move {
                    let recipe = recipes::ActiveModel {
                        id: NotSet,
                        author_id: Set(author_id),
                        name: Set(draft.name),
                        text: Set(draft.text),
                        cooking_time: Set(draft.cooking_time),
                        image: Set(draft.image),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    insert_links(txn, recipe.id, &draft.tags, &draft.ingredients).await?;
                    Ok(recipe.id)
                })
            })
            .await
            .context("create recipe")?;
        Ok(id)
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), RecipesServiceError> {
        let changes = changes.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    let mut am = recipes::ActiveModel {
                        id: Unchanged(id),
                        ..Default::default()
                    };
                    if let Some(name) = changes.name {
                        am.name = Set(name);
                    }
                    if let Some(text) = changes.text {
                        am.text = Set(text);
                    }
                    if let Some(cooking_time) = changes.cooking_time {
                        am.cooking_time = Set(cooking_time);
                    }
                    if let Some(image) = changes.image {
                        am.image = Set(image);
                    }
                    if am.is_changed() {
                        am.update(txn).await?;
                    }

                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    insert_links(txn, id, &changes.tags, &changes.ingredients).await
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Transaction(e) => recipe_update_error(WriteFailure::of(&e), e),
                TransactionError::Connection(e) => internal(e, "update recipe"),
            })?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe")?;
        Ok(model.map(recipe_from_model))
    }

    async fn tags_of(&self, recipe_id: i32) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .join(JoinType::InnerJoin, tags::Relation::RecipeTags.def())
            .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list recipe tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn ingredients_of(
        &self,
        recipe_id: i32,
    ) -> Result<Vec<RecipeIngredientLine>, RecipesServiceError> {
        let rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
            .find_also_related(ingredients::Entity)
            .order_by_asc(recipe_ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("list recipe ingredients")?;
        rows.into_iter()
            .map(|(line, ingredient)| {
                let ingredient = ingredient.with_context(|| {
                    format!("ingredient {} missing for recipe line", line.ingredient_id)
                })?;
                Ok(RecipeIngredientLine {
                    ingredient: ingredient_from_model(ingredient),
                    amount: line.amount,
                })
            })
            .collect()
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<(Vec<Recipe>, u64), RecipesServiceError> {
        let mut query = recipes_newest_first();
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if !filter.tag_slugs.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                        .from(recipe_tags::Entity)
                        .inner_join(
                            tags::Entity,
                            Expr::col((tags::Entity, tags::Column::Id))
                                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                        )
                        .and_where(tags::Column::Slug.is_in(filter.tag_slugs.clone()))
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(recipes::Column::Id.in_subquery(recipe_ids_in(
                favorite_recipes::Entity,
                favorite_recipes::Column::RecipeId,
                favorite_recipes::Column::UserId.eq(user_id),
            )));
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(recipes::Column::Id.in_subquery(recipe_ids_in(
                shopping_cart_recipes::Entity,
                shopping_cart_recipes::Column::RecipeId,
                shopping_cart_recipes::Column::UserId.eq(user_id),
            )));
        }
        let (models, count) = paginate(&self.db, query, page, "recipes").await?;
        Ok((models.into_iter().map(recipe_from_model).collect(), count))
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let mut query = recipes_newest_first().filter(recipes::Column::AuthorId.eq(author_id));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query
            .all(&self.db)
            .await
            .context("list recipes by author")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(count)
    }
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        author_id: model.author_id,
        name: model.name,
        text: model.text,
        cooking_time: model.cooking_time,
        image: model.image,
        created_at: model.created_at,
    }
}

// ── Membership repository (favorites / shopping cart) ────────────────────────

#[derive(Clone)]
pub struct DbMembershipRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct CartLineRow {
    name: String,
    measurement_unit: String,
    amount: i32,
}

impl MembershipRepository for DbMembershipRepository {
    async fn add(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<(), RecipesServiceError> {
        let created_at = Utc::now();
        let result = match kind {
            MembershipKind::Favorite => favorite_recipes::ActiveModel {
                user_id: Set(user_id),
                recipe_id: Set(recipe_id),
                created_at: Set(created_at),
            }
            .insert(&self.db)
            .await
            .map(|_| ()),
            MembershipKind::ShoppingCart => shopping_cart_recipes::ActiveModel {
                user_id: Set(user_id),
                recipe_id: Set(recipe_id),
                created_at: Set(created_at),
            }
            .insert(&self.db)
            .await
            .map(|_| ()),
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) => Err(membership_insert_error(kind, WriteFailure::of(&e), e)),
        }
    }

    async fn remove(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let result = match kind {
            MembershipKind::Favorite => {
                favorite_recipes::Entity::delete_by_id((user_id, recipe_id))
                    .exec(&self.db)
                    .await
            }
            MembershipKind::ShoppingCart => {
                shopping_cart_recipes::Entity::delete_by_id((user_id, recipe_id))
                    .exec(&self.db)
                    .await
            }
        }
        .with_context(|| format!("remove {} entry", kind.as_str()))?;
        Ok(result.rows_affected > 0)
    }

    async fn contains(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let count = match kind {
            MembershipKind::Favorite => {
                favorite_recipes::Entity::find_by_id((user_id, recipe_id))
                    .count(&self.db)
                    .await
            }
            MembershipKind::ShoppingCart => {
                shopping_cart_recipes::Entity::find_by_id((user_id, recipe_id))
                    .count(&self.db)
                    .await
            }
        }
        .with_context(|| format!("check {} entry", kind.as_str()))?;
        Ok(count > 0)
    }

    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RecipesServiceError> {
        let rows = recipe_ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Name)
            .column(ingredients::Column::MeasurementUnit)
            .column(recipe_ingredients::Column::Amount)
            .join(
                JoinType::InnerJoin,
                recipe_ingredients::Relation::Ingredient.def(),
            )
            .filter(recipe_ingredients::Column::RecipeId.in_subquery(recipe_ids_in(
                shopping_cart_recipes::Entity,
                shopping_cart_recipes::Column::RecipeId,
                shopping_cart_recipes::Column::UserId.eq(user_id),
            )))
            .into_model::<CartLineRow>()
            .all(&self.db)
            .await
            .context("list shopping cart lines")?;
        Ok(rows
            .into_iter()
            .map(|row| CartLine {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: i64::from(row.amount),
            })
            .collect())
    }
}

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn create(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RecipesServiceError> {
        let result = subscriptions::ActiveModel {
            user_id: Set(user_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(subscription_insert_error(WriteFailure::of(&e), e)),
        }
    }

    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let result = subscriptions::Entity::delete_by_id((user_id, author_id))
            .exec(&self.db)
            .await
            .context("delete subscription")?;
        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let count = subscriptions::Entity::find_by_id((user_id, author_id))
            .count(&self.db)
            .await
            .context("check subscription")?;
        Ok(count > 0)
    }

    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), RecipesServiceError> {
        let query = users_in_display_order().filter(
            users::Column::Id.in_subquery(
                Query::select()
                    .column(subscriptions::Column::AuthorId)
                    .from(subscriptions::Entity)
                    .and_where(subscriptions::Column::UserId.eq(user_id))
                    .to_owned(),
            ),
        );
        let (models, count) = paginate(&self.db, query, page, "subscriptions").await?;
        Ok((models.into_iter().map(user_from_model).collect(), count))
    }
}
