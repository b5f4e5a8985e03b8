use larder_domain::user::UserRole;
use larder_recipes::domain::types::MembershipKind;
use larder_recipes::error::RecipesServiceError;
use larder_recipes::usecase::membership::{AddMembershipUseCase, RemoveMembershipUseCase};
use larder_recipes::usecase::recipe::CreateRecipeUseCase;

use crate::helpers::{MemoryDb, recipe_input};

async fn seeded_recipe(db: &MemoryDb) -> i32 {
    let author = db.add_user("ada", UserRole::Normal);
    let tag = db.add_tag("Breakfast");
    let flour = db.add_ingredient("flour", "g");
    CreateRecipeUseCase {
        recipes: db.clone(),
        catalog: db.clone(),
        images: db.clone(),
    }
    .execute(author.id, recipe_input("Pancakes", &[tag.id], &[(flour.id, 200)]))
    .await
    .unwrap()
}

fn add_uc(db: &MemoryDb) -> AddMembershipUseCase<MemoryDb, MemoryDb> {
    AddMembershipUseCase {
        recipes: db.clone(),
        memberships: db.clone(),
    }
}

fn remove_uc(db: &MemoryDb) -> RemoveMembershipUseCase<MemoryDb, MemoryDb> {
    RemoveMembershipUseCase {
        recipes: db.clone(),
        memberships: db.clone(),
    }
}

#[tokio::test]
async fn should_reject_second_favorite_and_keep_one_row() {
    let db = MemoryDb::new();
    let recipe_id = seeded_recipe(&db).await;
    let user = db.add_user("bob", UserRole::Normal);

    let recipe = add_uc(&db)
        .execute(MembershipKind::Favorite, user.id, recipe_id)
        .await
        .unwrap();
    assert_eq!(recipe.id, recipe_id);
    assert_eq!(recipe.name, "Pancakes");

    let second = add_uc(&db)
        .execute(MembershipKind::Favorite, user.id, recipe_id)
        .await;
    assert!(matches!(
        second,
        Err(RecipesServiceError::FavoriteAlreadyExists)
    ));
    assert_eq!(
        db.tables_handle().lock().unwrap().favorites,
        vec![(user.id, recipe_id)]
    );
}

#[tokio::test]
async fn should_report_failure_when_unfavoriting_absent_entry() {
    let db = MemoryDb::new();
    let recipe_id = seeded_recipe(&db).await;
    let user = db.add_user("bob", UserRole::Normal);
    let other = db.add_user("carol", UserRole::Normal);
    add_uc(&db)
        .execute(MembershipKind::Favorite, other.id, recipe_id)
        .await
        .unwrap();

    let result = remove_uc(&db)
        .execute(MembershipKind::Favorite, user.id, recipe_id)
        .await;

    assert!(matches!(result, Err(RecipesServiceError::FavoriteNotFound)));
    assert_eq!(db.tables_handle().lock().unwrap().favorites.len(), 1);
}

#[tokio::test]
async fn should_report_missing_recipe_before_membership() {
    let db = MemoryDb::new();
    let user = db.add_user("bob", UserRole::Normal);

    let add = add_uc(&db)
        .execute(MembershipKind::ShoppingCart, user.id, 404)
        .await;
    assert!(matches!(add, Err(RecipesServiceError::RecipeNotFound)));

    let remove = remove_uc(&db)
        .execute(MembershipKind::ShoppingCart, user.id, 404)
        .await;
    assert!(matches!(remove, Err(RecipesServiceError::RecipeNotFound)));
}

#[tokio::test]
async fn should_keep_favorites_and_cart_independent() {
    let db = MemoryDb::new();
    let recipe_id = seeded_recipe(&db).await;
    let user = db.add_user("bob", UserRole::Normal);

    add_uc(&db)
        .execute(MembershipKind::ShoppingCart, user.id, recipe_id)
        .await
        .unwrap();
    add_uc(&db)
        .execute(MembershipKind::Favorite, user.id, recipe_id)
        .await
        .unwrap();
    remove_uc(&db)
        .execute(MembershipKind::ShoppingCart, user.id, recipe_id)
        .await
        .unwrap();

    let again = remove_uc(&db)
        .execute(MembershipKind::ShoppingCart, user.id, recipe_id)
        .await;
    assert!(matches!(
        again,
        Err(RecipesServiceError::ShoppingCartNotFound)
    ));
    let tables = db.tables_handle();
    let tables = tables.lock().unwrap();
    assert!(tables.cart.is_empty());
    assert_eq!(tables.favorites, vec![(user.id, recipe_id)]);
}
