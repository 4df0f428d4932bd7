//! Borrowings repository: the ledger's state machine and queries
//!
//! Borrow and return each run in a single transaction with a row lock,
//! so the availability check plus decrement is atomic and a borrowing
//! closes exactly once even under concurrent returns. Dropping the
//! transaction on an error path rolls everything back.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrowing::{Borrowing, PopularBook, UserBorrowingStats},
    repository::books::BooksRepository,
};

#[derive(Clone)]
pub struct BorrowingsRepository {
    pool: Pool<Postgres>,
    books: BooksRepository,
}

impl BorrowingsRepository {
    pub fn new(pool: Pool<Postgres>, books: BooksRepository) -> Self {
        Self { pool, books }
    }

    /// Get borrowing by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Borrowing> {
        sqlx::query_as::<_, Borrowing>("SELECT * FROM borrowings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrowing with id {} not found", id)))
    }

    /// Open a new borrowing: check availability, create the record,
    /// decrement stock, all under the book row lock.
    pub async fn create(
        &self,
        user_id: i64,
        book_id: i64,
        loan_period_days: i64,
    ) -> AppResult<Borrowing> {
        let mut tx = self.pool.begin().await?;

        if !self.books.is_available(&mut *tx, book_id).await? {
            return Err(AppError::NotAvailable("Book not available".to_string()));
        }

        let now = Utc::now();
        let due_date = Borrowing::due_date_for(now, loan_period_days);

        let borrowing = sqlx::query_as::<_, Borrowing>(
            r#"
            INSERT INTO borrowings (user_id, book_id, borrow_date, due_date, fine)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(now)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        self.books.decrease_stock(&mut *tx, book_id).await?;

        tx.commit().await?;
        Ok(borrowing)
    }

    /// Close a borrowing: set the return date, compute the fine once,
    /// put the copy back on the shelf. Rejects records already closed.
    pub async fn close(&self, id: i64, fine_per_day: Decimal) -> AppResult<Borrowing> {
        let mut tx = self.pool.begin().await?;

        let borrowing =
            sqlx::query_as::<_, Borrowing>("SELECT * FROM borrowings WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Borrowing with id {} not found", id)))?;

        if borrowing.return_date.is_some() {
            return Err(AppError::AlreadyReturned(format!(
                "Borrowing {} has already been returned",
                id
            )));
        }

        let now = Utc::now();
        let fine = Borrowing::late_fine(borrowing.due_date, now, fine_per_day);

        let closed = sqlx::query_as::<_, Borrowing>(
            r#"
            UPDATE borrowings
            SET return_date = $1, fine = $2, updated_at = $1
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(fine)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        self.books.increase_stock(&mut *tx, borrowing.book_id).await?;

        tx.commit().await?;
        Ok(closed)
    }

    /// Get borrowings for a user, most recent first
    pub async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Borrowing>> {
        let borrowings = sqlx::query_as::<_, Borrowing>(
            "SELECT * FROM borrowings WHERE user_id = $1 ORDER BY borrow_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(borrowings)
    }

    /// List all borrowings
    pub async fn list_all(&self) -> AppResult<Vec<Borrowing>> {
        let borrowings =
            sqlx::query_as::<_, Borrowing>("SELECT * FROM borrowings ORDER BY borrow_date DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(borrowings)
    }

    /// List open borrowings past their due date
    pub async fn list_overdue(&self) -> AppResult<Vec<Borrowing>> {
        let borrowings = sqlx::query_as::<_, Borrowing>(
            r#"
            SELECT * FROM borrowings
            WHERE return_date IS NULL AND due_date < NOW()
            ORDER BY due_date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(borrowings)
    }

    /// Count all borrowings
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrowings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count currently open borrowings
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM borrowings WHERE return_date IS NULL")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count open borrowings past their due date
    pub async fn count_overdue(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrowings WHERE return_date IS NULL AND due_date < NOW()",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Top ten most borrowed books
    pub async fn popular_books(&self) -> AppResult<Vec<PopularBook>> {
        let books = sqlx::query_as::<_, PopularBook>(
            r#"
            SELECT b.book_id, bk.title, COUNT(*) AS borrow_count
            FROM borrowings b
            JOIN books bk ON b.book_id = bk.id
            GROUP BY b.book_id, bk.title
            ORDER BY borrow_count DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Borrow counts per user, descending
    pub async fn user_borrowing_stats(&self) -> AppResult<Vec<UserBorrowingStats>> {
        let stats = sqlx::query_as::<_, UserBorrowingStats>(
            r#"
            SELECT b.user_id, u.username, COUNT(*) AS borrow_count
            FROM borrowings b
            JOIN users u ON b.user_id = u.id
            GROUP BY b.user_id, u.username
            ORDER BY borrow_count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }
}
