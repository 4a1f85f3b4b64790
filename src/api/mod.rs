//! API handlers for bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
