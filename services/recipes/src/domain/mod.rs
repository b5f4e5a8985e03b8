pub mod account;
pub mod composition;
pub mod image;
pub mod repository;
pub mod shopping_list;
pub mod types;
