use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_catalog;
mod m20250301_000003_create_recipes;
mod m20250301_000004_create_recipe_memberships;
mod m20250301_000005_create_subscriptions;
mod m20250301_000006_add_listing_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_catalog::Migration),
            Box::new(m20250301_000003_create_recipes::Migration),
            Box::new(m20250301_000004_create_recipe_memberships::Migration),
            Box::new(m20250301_000005_create_subscriptions::Migration),
            Box::new(m20250301_000006_add_listing_indexes::Migration),
        ]
    }
}
