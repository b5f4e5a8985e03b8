use larder_domain::user::UserRole;
use larder_recipes::domain::types::MembershipKind;
use larder_recipes::usecase::membership::AddMembershipUseCase;
use larder_recipes::usecase::recipe::CreateRecipeUseCase;
use larder_recipes::usecase::shopping_list::DownloadShoppingListUseCase;

use crate::helpers::{MemoryDb, recipe_input};

async fn recipe_in_cart(
    db: &MemoryDb,
    cart_owner: uuid::Uuid,
    name: &str,
    lines: &[(i32, i32)],
) -> i32 {
    let author = db.add_user(&format!("author-{name}"), UserRole::Normal);
    let tag = db.add_tag(name);
    let id = CreateRecipeUseCase {
        recipes: db.clone(),
        catalog: db.clone(),
        images: db.clone(),
    }
    .execute(author.id, recipe_input(name, &[tag.id], lines))
    .await
    .unwrap();
    AddMembershipUseCase {
        recipes: db.clone(),
        memberships: db.clone(),
    }
    .execute(MembershipKind::ShoppingCart, cart_owner, id)
    .await
    .unwrap();
    id
}

fn download_uc(db: &MemoryDb) -> DownloadShoppingListUseCase<MemoryDb> {
    DownloadShoppingListUseCase {
        memberships: db.clone(),
    }
}

#[tokio::test]
async fn should_sum_shared_ingredient_into_one_line() {
    let db = MemoryDb::new();
    let user = db.add_user("ada", UserRole::Normal);
    let flour = db.add_ingredient("flour", "g");
    recipe_in_cart(&db, user.id, "Bread", &[(flour.id, 200)]).await;
    recipe_in_cart(&db, user.id, "Pie", &[(flour.id, 300)]).await;

    let text = download_uc(&db).execute(user.id).await.unwrap();

    assert_eq!(text, "Shopping list:\nflour - 500 g\n");
}

#[tokio::test]
async fn should_yield_header_only_for_empty_cart() {
    let db = MemoryDb::new();
    let user = db.add_user("ada", UserRole::Normal);

    let text = download_uc(&db).execute(user.id).await.unwrap();

    assert_eq!(text, "Shopping list:\n");
}

#[tokio::test]
async fn should_group_by_name_and_unit_sorted_by_name() {
    let db = MemoryDb::new();
    let user = db.add_user("ada", UserRole::Normal);
    let stranger = db.add_user("bob", UserRole::Normal);
    let sugar = db.add_ingredient("sugar", "g");
    let sugar_spoons = db.add_ingredient("sugar", "tbsp");
    let butter = db.add_ingredient("butter", "g");
    recipe_in_cart(&db, user.id, "Cake", &[(sugar.id, 150), (butter.id, 100)]).await;
    recipe_in_cart(&db, user.id, "Tea", &[(sugar_spoons.id, 2)]).await;
    recipe_in_cart(&db, stranger.id, "Cookies", &[(butter.id, 999)]).await;

    let text = download_uc(&db).execute(user.id).await.unwrap();

    assert_eq!(
        text,
        "Shopping list:\nbutter - 100 g\nsugar - 150 g\nsugar - 2 tbsp\n"
    );
}
