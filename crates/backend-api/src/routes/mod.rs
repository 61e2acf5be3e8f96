pub mod auth;
pub mod cart;
pub mod health;
pub mod models;
pub mod products;
pub mod users;
