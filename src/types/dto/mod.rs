// API data transfer objects - request bodies and response shapes
pub mod auth;
pub mod common;
pub mod order;
pub mod product;
pub mod user;
