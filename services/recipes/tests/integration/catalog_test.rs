use larder_recipes::domain::types::NewIngredient;
use larder_recipes::error::RecipesServiceError;
use larder_recipes::usecase::catalog::{
    GetTagUseCase, ImportIngredientsUseCase, ListIngredientsUseCase,
};

use crate::helpers::MemoryDb;

fn row(name: &str, unit: &str) -> NewIngredient {
    NewIngredient {
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

#[tokio::test]
async fn should_reject_second_salt_in_grams() {
    let db = MemoryDb::new();
    let import = ImportIngredientsUseCase {
        catalog: db.clone(),
    };

    let report = import
        .execute(vec![row("Salt", "g"), row("Salt", "g"), row("Salt", "pinch")])
        .await
        .unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(
        report.skipped[0].1,
        RecipesServiceError::IngredientAlreadyExists
    ));
    assert_eq!(db.tables_handle().lock().unwrap().ingredients.len(), 2);
}

#[tokio::test]
async fn should_skip_blank_rows_during_import() {
    let db = MemoryDb::new();
    let import = ImportIngredientsUseCase {
        catalog: db.clone(),
    };

    let report = import
        .execute(vec![row("  ", "g"), row("Pepper", "")])
        .await
        .unwrap();

    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped.len(), 2);
}

#[tokio::test]
async fn should_search_ingredients_by_case_insensitive_prefix() {
    let db = MemoryDb::new();
    db.add_ingredient("Salt", "g");
    db.add_ingredient("salmon", "g");
    db.add_ingredient("Sugar", "g");

    let list = ListIngredientsUseCase {
        catalog: db.clone(),
    };
    let names: Vec<String> = list
        .execute(Some("SAL"))
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["Salt", "salmon"]);

    assert_eq!(list.execute(Some("   ")).await.unwrap().len(), 3);
}

#[tokio::test]
async fn should_report_missing_tag() {
    let db = MemoryDb::new();
    let result = GetTagUseCase {
        catalog: db.clone(),
    }
    .execute(7)
    .await;
    assert!(matches!(result, Err(RecipesServiceError::TagNotFound)));
}
