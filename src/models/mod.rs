//! Data models for Libris

pub mod book;
pub mod borrowing;
pub mod user;

// Re-export commonly used types
pub use book::Book;
pub use borrowing::{Borrowing, PopularBook, UserBorrowingStats};
pub use user::{Role, User, UserStatus};
