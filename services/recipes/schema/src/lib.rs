//! sea-orm entities for the recipes service.

pub mod favorite_recipes;
pub mod ingredients;
pub mod recipe_ingredients;
pub mod recipe_tags;
pub mod recipes;
pub mod shopping_cart_recipes;
pub mod subscriptions;
pub mod tags;
pub mod users;
