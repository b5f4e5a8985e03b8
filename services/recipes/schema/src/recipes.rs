use sea_orm::entity::prelude::*;

/// Recipe header. Tag links and ingredient lines live in their own tables.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Path relative to the media root.
    pub image: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id"
    )]
    Author,
    #[sea_orm(has_many = "super::recipe_ingredients::Entity")]
    RecipeIngredients,
    #[sea_orm(has_many = "super::recipe_tags::Entity")]
    RecipeTags,
    #[sea_orm(has_many = "super::favorite_recipes::Entity")]
    FavoriteRecipes,
    #[sea_orm(has_many = "super::shopping_cart_recipes::Entity")]
    ShoppingCartRecipes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::recipe_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeIngredients.def()
    }
}

impl Related<super::recipe_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeTags.def()
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
