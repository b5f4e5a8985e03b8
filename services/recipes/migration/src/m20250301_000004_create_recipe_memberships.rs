use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Favorites and shopping cart share one shape: (user, recipe) with a timestamp.
fn membership_table<T>(table: T) -> TableCreateStatement
where
    T: Iden + Copy + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(Membership::UserId).uuid().not_null())
        .col(ColumnDef::new(Membership::RecipeId).integer().not_null())
        .col(
            ColumnDef::new(Membership::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .primary_key(
            Index::create()
                .col(Membership::UserId)
                .col(Membership::RecipeId),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, Membership::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, Membership::RecipeId)
                .to(Recipes::Table, Recipes::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(membership_table(FavoriteRecipes::Table))
            .await?;
        manager
            .create_table(membership_table(ShoppingCartRecipes::Table))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShoppingCartRecipes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FavoriteRecipes::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum FavoriteRecipes {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum ShoppingCartRecipes {
    Table,
}

#[derive(Iden)]
enum Membership {
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
