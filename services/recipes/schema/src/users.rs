use sea_orm::entity::prelude::*;

/// Account record. `email` is the login identity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: i16,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recipes::Entity")]
    Recipes,
    #[sea_orm(has_many = "super::favorite_recipes::Entity")]
    FavoriteRecipes,
    #[sea_orm(has_many = "super::shopping_cart_recipes::Entity")]
    ShoppingCartRecipes,
}

impl Related<super::recipes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipes.def()
    }
}

impl Related<super::favorite_recipes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoriteRecipes.def()
    }
}

impl Related<super::shopping_cart_recipes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingCartRecipes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
