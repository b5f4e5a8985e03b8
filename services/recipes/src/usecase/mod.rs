pub mod auth;
pub mod catalog;
pub mod membership;
pub mod recipe;
pub mod shopping_list;
pub mod subscription;
pub mod user;
