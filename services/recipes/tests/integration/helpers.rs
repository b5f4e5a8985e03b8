use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use larder_domain::pagination::PageRequest;
use larder_domain::user::UserRole;
use larder_recipes::domain::composition::RecipeInput;
use larder_recipes::domain::image::ImageFormat;
use larder_recipes::domain::repository::{
    CatalogRepository, ImageStore, MembershipRepository, RecipeRepository,
    SubscriptionRepository, UserRepository,
};
use larder_recipes::domain::types::{
    CartLine, Ingredient, IngredientAmount, MembershipKind, NewIngredient, Recipe, RecipeChanges,
    RecipeDraft, RecipeFilter, RecipeIngredientLine, Tag, User,
};
use larder_recipes::error::RecipesServiceError;

/// Smallest payload that sniffs as a PNG.
pub const PNG_BASE64: &str = "data:image/png;base64,iVBORw0KGgoAAAAA";

// ── MemoryDb ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
    pub recipe_tags: Vec<(i32, i32)>,
    pub recipe_lines: Vec<(i32, IngredientAmount)>,
    pub favorites: Vec<(Uuid, i32)>,
    pub cart: Vec<(Uuid, i32)>,
    pub subscriptions: Vec<(Uuid, Uuid)>,
    pub images: Vec<String>,
    pub next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn members(&mut self, kind: MembershipKind) -> &mut Vec<(Uuid, i32)> {
        match kind {
            MembershipKind::Favorite => &mut self.favorites,
            MembershipKind::ShoppingCart => &mut self.cart,
        }
    }
}

/// In-memory stand-in for every repository, sharing one set of tables so cascades and joins
/// behave like the database.
#[derive(Clone, Default)]
pub struct MemoryDb {
    pub tables: Arc<Mutex<Tables>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared handle to the tables for post-execution inspection.
    pub fn tables_handle(&self) -> Arc<Mutex<Tables>> {
        Arc::clone(&self.tables)
    }

    pub fn add_user(&self, username: &str, role: UserRole) -> User {
        let user = User {
            id: Uuid::now_v7(),
            email: format!("{username}@example.com"),
            username: username.to_owned(),
            first_name: username.to_owned(),
            last_name: "Tester".to_owned(),
            password_hash: "unused".to_owned(),
            role,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn add_tag(&self, name: &str) -> Tag {
        let mut tables = self.tables.lock().unwrap();
        let tag = Tag {
            id: tables.next_id(),
            name: name.to_owned(),
            color: "#E26C2D".to_owned(),
            slug: name.to_lowercase(),
        };
        tables.tags.push(tag.clone());
        tag
    }

    pub fn add_ingredient(&self, name: &str, unit: &str) -> Ingredient {
        let mut tables = self.tables.lock().unwrap();
        let ingredient = Ingredient {
            id: tables.next_id(),
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        };
        tables.ingredients.push(ingredient.clone());
        ingredient
    }

    pub fn line_count(&self, recipe_id: i32) -> usize {
        self.tables
            .lock()
            .unwrap()
            .recipe_lines
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .count()
    }
}

pub fn recipe_input(name: &str, tags: &[i32], lines: &[(i32, i32)]) -> RecipeInput {
    RecipeInput {
        name: Some(name.to_owned()),
        text: Some(format!("How to cook {name}.")),
        cooking_time: Some(15),
        image: Some(PNG_BASE64.to_owned()),
        tags: Some(tags.to_vec()),
        ingredients: Some(
            lines
                .iter()
                .map(|&(ingredient_id, amount)| IngredientAmount {
                    ingredient_id,
                    amount,
                })
                .collect(),
        ),
    }
}

fn page_slice<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    let page = page.clamped();
    items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .cloned()
        .collect()
}

fn sort_users(users: &mut [User]) {
    users.sort_by(|a, b| {
        (&a.first_name, &a.last_name, &a.username).cmp(&(&b.first_name, &b.last_name, &b.username))
    });
}

impl UserRepository for MemoryDb {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(RecipesServiceError::UserAlreadyExists);
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<(Vec<User>, u64), RecipesServiceError> {
        let mut users = self.tables.lock().unwrap().users.clone();
        sort_users(&mut users);
        Ok((page_slice(&users, page), users.len() as u64))
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_owned();
        }
        Ok(())
    }

    async fn has_admin(&self) -> Result<bool, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().any(|u| u.role.is_admin()))
    }
}

impl CatalogRepository for MemoryDb {
    async fn list_tags(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let mut tags = self.tables.lock().unwrap().tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_tag(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn list_ingredients(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = name_prefix.map(str::to_lowercase);
        let mut ingredients: Vec<Ingredient> = self
            .tables
            .lock()
            .unwrap()
            .ingredients
            .iter()
            .filter(|i| {
                prefix
                    .as_deref()
                    .is_none_or(|p| i.name.to_lowercase().starts_with(p))
            })
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ingredients)
    }

    async fn find_ingredient(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn existing_tag_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .tags
            .iter()
            .map(|t| t.id)
            .filter(|id| ids.contains(id))
            .collect())
    }

    async fn existing_ingredient_ids(
        &self,
        ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .ingredients
            .iter()
            .map(|i| i.id)
            .filter(|id| ids.contains(id))
            .collect())
    }

    async fn create_ingredient(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<Ingredient, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.ingredients.iter().any(|i| {
            i.name == ingredient.name && i.measurement_unit == ingredient.measurement_unit
        }) {
            return Err(RecipesServiceError::IngredientAlreadyExists);
        }
        let created = Ingredient {
            id: tables.next_id(),
            name: ingredient.name.clone(),
            measurement_unit: ingredient.measurement_unit.clone(),
        };
        tables.ingredients.push(created.clone());
        Ok(created)
    }
}

fn insert_links(tables: &mut Tables, recipe_id: i32, tags: &[i32], lines: &[IngredientAmount]) {
    tables
        .recipe_tags
        .extend(tags.iter().map(|&tag_id| (recipe_id, tag_id)));
    tables
        .recipe_lines
        .extend(lines.iter().map(|&line| (recipe_id, line)));
}

impl RecipeRepository for MemoryDb {
    async fn create(
        &self,
        author_id: Uuid,
        draft: &RecipeDraft,
    ) -> Result<i32, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.recipes.push(Recipe {
            id,
            author_id,
            name: draft.name.clone(),
            text: draft.text.clone(),
            cooking_time: draft.cooking_time,
            image: draft.image.clone(),
            created_at: Utc::now(),
        });
        insert_links(&mut tables, id, &draft.tags, &draft.ingredients);
        Ok(id)
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let recipe = tables
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if let Some(name) = &changes.name {
            recipe.name = name.clone();
        }
        if let Some(text) = &changes.text {
            recipe.text = text.clone();
        }
        if let Some(cooking_time) = changes.cooking_time {
            recipe.cooking_time = cooking_time;
        }
        if let Some(image) = &changes.image {
            recipe.image = image.clone();
        }
        tables.recipe_tags.retain(|(r, _)| *r != id);
        tables.recipe_lines.retain(|(r, _)| *r != id);
        insert_links(&mut tables, id, &changes.tags, &changes.ingredients);
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.recipes.len();
        tables.recipes.retain(|r| r.id != id);
        if tables.recipes.len() == before {
            return Ok(false);
        }
        tables.recipe_tags.retain(|(r, _)| *r != id);
        tables.recipe_lines.retain(|(r, _)| *r != id);
        tables.favorites.retain(|(_, r)| *r != id);
        tables.cart.retain(|(_, r)| *r != id);
        Ok(true)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn tags_of(&self, recipe_id: i32) -> Result<Vec<Tag>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let mut tags: Vec<Tag> = tables
            .recipe_tags
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .filter_map(|(_, tag_id)| tables.tags.iter().find(|t| t.id == *tag_id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn ingredients_of(
        &self,
        recipe_id: i32,
    ) -> Result<Vec<RecipeIngredientLine>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .recipe_lines
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .filter_map(|(_, line)| {
                tables
                    .ingredients
                    .iter()
                    .find(|i| i.id == line.ingredient_id)
                    .map(|ingredient| RecipeIngredientLine {
                        ingredient: ingredient.clone(),
                        amount: line.amount,
                    })
            })
            .collect())
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<(Vec<Recipe>, u64), RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let tag_ids: Vec<i32> = tables
            .tags
            .iter()
            .filter(|t| filter.tag_slugs.contains(&t.slug))
            .map(|t| t.id)
            .collect();
        let mut recipes: Vec<Recipe> = tables
            .recipes
            .iter()
            .filter(|r| filter.author_id.is_none_or(|a| r.author_id == a))
            .filter(|r| {
                filter.tag_slugs.is_empty()
                    || tables
                        .recipe_tags
                        .iter()
                        .any(|(rid, tid)| *rid == r.id && tag_ids.contains(tid))
            })
            .filter(|r| {
                filter
                    .favorited_by
                    .is_none_or(|u| tables.favorites.contains(&(u, r.id)))
            })
            .filter(|r| {
                filter
                    .in_cart_of
                    .is_none_or(|u| tables.cart.contains(&(u, r.id)))
            })
            .cloned()
            .collect();
        recipes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok((page_slice(&recipes, page), recipes.len() as u64))
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let mut recipes: Vec<Recipe> = tables
            .recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        if let Some(limit) = limit {
            recipes.truncate(limit as usize);
        }
        Ok(recipes)
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .count() as u64)
    }
}

impl MembershipRepository for MemoryDb {
    async fn add(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<(), RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let members = tables.members(kind);
        if members.contains(&(user_id, recipe_id)) {
            return Err(kind.already_exists());
        }
        members.push((user_id, recipe_id));
        Ok(())
    }

    async fn remove(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let members = tables.members(kind);
        let before = members.len();
        members.retain(|entry| *entry != (user_id, recipe_id));
        Ok(members.len() < before)
    }

    async fn contains(
        &self,
        kind: MembershipKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.members(kind).contains(&(user_id, recipe_id)))
    }

    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let recipe_ids: Vec<i32> = tables
            .cart
            .iter()
            .filter(|(u, _)| *u == user_id)
            .map(|(_, r)| *r)
            .collect();
        Ok(tables
            .recipe_lines
            .iter()
            .filter(|(r, _)| recipe_ids.contains(r))
            .filter_map(|(_, line)| {
                tables
                    .ingredients
                    .iter()
                    .find(|i| i.id == line.ingredient_id)
                    .map(|ingredient| CartLine {
                        name: ingredient.name.clone(),
                        measurement_unit: ingredient.measurement_unit.clone(),
                        amount: i64::from(line.amount),
                    })
            })
            .collect())
    }
}

impl SubscriptionRepository for MemoryDb {
    async fn create(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RecipesServiceError> {
        if user_id == author_id {
            return Err(RecipesServiceError::SelfSubscription);
        }
        let mut tables = self.tables.lock().unwrap();
        if tables.subscriptions.contains(&(user_id, author_id)) {
            return Err(RecipesServiceError::SubscriptionAlreadyExists);
        }
        tables.subscriptions.push((user_id, author_id));
        Ok(())
    }

    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.subscriptions.len();
        tables
            .subscriptions
            .retain(|edge| *edge != (user_id, author_id));
        Ok(tables.subscriptions.len() < before)
    }

    async fn exists(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.subscriptions.contains(&(user_id, author_id)))
    }

    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let mut authors: Vec<User> = tables
            .users
            .iter()
            .filter(|u| tables.subscriptions.contains(&(user_id, u.id)))
            .cloned()
            .collect();
        sort_users(&mut authors);
        Ok((page_slice(&authors, page), authors.len() as u64))
    }
}

impl ImageStore for MemoryDb {
    async fn save(&self, _bytes: &[u8], format: ImageFormat) -> Result<String, RecipesServiceError> {
        let path = format!("recipes/images/{}.{}", Uuid::now_v7(), format.extension());
        self.tables.lock().unwrap().images.push(path.clone());
        Ok(path)
    }

    async fn remove(&self, path: &str) -> Result<(), RecipesServiceError> {
        self.tables.lock().unwrap().images.retain(|p| p != path);
        Ok(())
    }
}
