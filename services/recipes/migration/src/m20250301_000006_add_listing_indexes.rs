use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::AuthorId)
                    .name("idx_recipes_author_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::CreatedAt)
                    .name("idx_recipes_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Subscriptions::Table)
                    .col(Subscriptions::AuthorId)
                    .name("idx_subscriptions_author_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_subscriptions_author_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_recipes_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_recipes_author_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Recipes {
    Table,
    AuthorId,
    CreatedAt,
}

#[derive(Iden)]
enum Subscriptions {
    Table,
    AuthorId,
}
