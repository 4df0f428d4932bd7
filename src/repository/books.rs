//! Books repository for database operations
//!
//! Besides CRUD and search this owns the inventory primitives
//! (`is_available`, `decrease_stock`, `increase_stock`). They are
//! generic over the executor so the borrowing ledger can run them on
//! its own transaction while plain callers pass the pool.

use sqlx::{PgExecutor, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Keyword search: substring match on title or author, exact ISBN match
    pub async fn search(&self, keyword: &str) -> AppResult<Vec<Book>> {
        let pattern = format!("%{}%", keyword);
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE title ILIKE $1 OR author ILIKE $1 OR isbn = $2
            ORDER BY title
            "#,
        )
        .bind(&pattern)
        .bind(keyword)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// List all books
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, category, stock, location)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.category)
        .bind(book.stock.unwrap_or(0))
        .bind(&book.location)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Update an existing book (administrative edit, may override stock)
    pub async fn update(&self, id: i64, book: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author = $2, isbn = $3, category = $4,
                stock = $5, location = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.category)
        .bind(book.stock)
        .bind(&book.location)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Administrative stock override
    pub async fn set_stock(&self, id: i64, stock: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "UPDATE books SET stock = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(stock)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// True iff the book exists and has stock.
    ///
    /// Takes the row lock when run inside a transaction, so a
    /// concurrent borrow of the last copy blocks until commit.
    pub async fn is_available<'e, E>(&self, executor: E, book_id: i64) -> AppResult<bool>
    where
        E: PgExecutor<'e>,
    {
        let available: Option<bool> =
            sqlx::query_scalar("SELECT stock > 0 FROM books WHERE id = $1 FOR UPDATE")
                .bind(book_id)
                .fetch_optional(executor)
                .await?;
        Ok(available.unwrap_or(false))
    }

    /// Decrement stock by one. Silent no-op when the book is missing or
    /// the stock is already zero; the floor keeps stock from ever going
    /// negative even without a prior availability check.
    pub async fn decrease_stock<'e, E>(&self, executor: E, book_id: i64) -> AppResult<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            "UPDATE books SET stock = stock - 1, updated_at = NOW() WHERE id = $1 AND stock > 0",
        )
        .bind(book_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Increment stock by one, no ceiling. Silent no-op when the book is
    /// missing so return flows survive stale book references.
    pub async fn increase_stock<'e, E>(&self, executor: E, book_id: i64) -> AppResult<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("UPDATE books SET stock = stock + 1, updated_at = NOW() WHERE id = $1")
            .bind(book_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
