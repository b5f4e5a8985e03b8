use uuid::Uuid;

use larder_domain::pagination::PageRequest;
use larder_domain::user::UserRole;
use larder_recipes::error::RecipesServiceError;
use larder_recipes::usecase::recipe::CreateRecipeUseCase;
use larder_recipes::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

use crate::helpers::{MemoryDb, recipe_input};

fn subscribe_uc(db: &MemoryDb) -> SubscribeUseCase<MemoryDb, MemoryDb, MemoryDb> {
    SubscribeUseCase {
        users: db.clone(),
        recipes: db.clone(),
        subscriptions: db.clone(),
    }
}

#[tokio::test]
async fn should_always_reject_self_subscription() {
    let db = MemoryDb::new();
    let user = db.add_user("ada", UserRole::Normal);

    let result = subscribe_uc(&db).execute(user.id, user.id, None).await;

    assert!(matches!(result, Err(RecipesServiceError::SelfSubscription)));
    assert!(db.tables_handle().lock().unwrap().subscriptions.is_empty());
}

#[tokio::test]
async fn should_reject_duplicate_subscription() {
    let db = MemoryDb::new();
    let user = db.add_user("ada", UserRole::Normal);
    let author = db.add_user("bob", UserRole::Normal);

    subscribe_uc(&db)
        .execute(user.id, author.id, None)
        .await
        .unwrap();
    let second = subscribe_uc(&db).execute(user.id, author.id, None).await;

    assert!(matches!(
        second,
        Err(RecipesServiceError::SubscriptionAlreadyExists)
    ));
    assert_eq!(db.tables_handle().lock().unwrap().subscriptions.len(), 1);
}

#[tokio::test]
async fn should_report_unknown_author() {
    let db = MemoryDb::new();
    let user = db.add_user("ada", UserRole::Normal);

    let result = subscribe_uc(&db).execute(user.id, Uuid::now_v7(), None).await;

    assert!(matches!(result, Err(RecipesServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_cap_author_recipes_but_count_all() {
    let db = MemoryDb::new();
    let user = db.add_user("ada", UserRole::Normal);
    let author = db.add_user("bob", UserRole::Normal);
    let tag = db.add_tag("Dinner");
    let flour = db.add_ingredient("flour", "g");
    let create = CreateRecipeUseCase {
        recipes: db.clone(),
        catalog: db.clone(),
        images: db.clone(),
    };
    for name in ["Pie", "Bread", "Pizza"] {
        create
            .execute(author.id, recipe_input(name, &[tag.id], &[(flour.id, 100)]))
            .await
            .unwrap();
    }

    let summary = subscribe_uc(&db)
        .execute(user.id, author.id, Some(2))
        .await
        .unwrap();

    assert!(summary.profile.is_subscribed);
    assert_eq!(summary.profile.user.id, author.id);
    assert_eq!(summary.recipes.len(), 2);
    assert_eq!(summary.recipes_count, 3);
    assert_eq!(summary.recipes[0].name, "Pizza");
}

#[tokio::test]
async fn should_unsubscribe_exactly_one_edge() {
    let db = MemoryDb::new();
    let user = db.add_user("ada", UserRole::Normal);
    let first = db.add_user("bob", UserRole::Normal);
    let second = db.add_user("carol", UserRole::Normal);
    subscribe_uc(&db).execute(user.id, first.id, None).await.unwrap();
    subscribe_uc(&db)
        .execute(user.id, second.id, None)
        .await
        .unwrap();

    let unsubscribe = UnsubscribeUseCase {
        users: db.clone(),
        subscriptions: db.clone(),
    };
    unsubscribe.execute(user.id, first.id).await.unwrap();
    let again = unsubscribe.execute(user.id, first.id).await;

    assert!(matches!(
        again,
        Err(RecipesServiceError::SubscriptionNotFound)
    ));
    assert_eq!(
        db.tables_handle().lock().unwrap().subscriptions,
        vec![(user.id, second.id)]
    );
}

#[tokio::test]
async fn should_list_subscribed_authors_paginated() {
    let db = MemoryDb::new();
    let user = db.add_user("ada", UserRole::Normal);
    for name in ["bob", "carol", "dave"] {
        let author = db.add_user(name, UserRole::Normal);
        subscribe_uc(&db)
            .execute(user.id, author.id, None)
            .await
            .unwrap();
    }
    let list = ListSubscriptionsUseCase {
        recipes: db.clone(),
        subscriptions: db.clone(),
    };

    let page = list
        .execute(user.id, PageRequest { limit: 2, page: 1 }, None)
        .await
        .unwrap();

    assert_eq!(page.count, 3);
    assert_eq!(page.next, Some(2));
    assert_eq!(page.previous, None);
    let names: Vec<&str> = page
        .results
        .iter()
        .map(|a| a.profile.user.username.as_str())
        .collect();
    assert_eq!(names, vec!["bob", "carol"]);
    assert!(page.results.iter().all(|a| a.profile.is_subscribed));
}
