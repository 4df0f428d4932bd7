//! API handlers for Libris REST endpoints

pub mod admin;
pub mod books;
pub mod borrowings;
pub mod health;
pub mod openapi;
pub mod users;
