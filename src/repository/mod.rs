//! Repository layer for database operations

pub mod books;
pub mod borrowings;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
    pub borrowings: borrowings::BorrowingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        let books = books::BooksRepository::new(pool.clone());
        Self {
            users: users::UsersRepository::new(pool.clone()),
            // The borrowing ledger mutates stock through the book store
            borrowings: borrowings::BorrowingsRepository::new(pool.clone(), books.clone()),
            books,
            pool,
        }
    }
}
