//! Borrowing ledger service

use crate::{
    config::CirculationConfig,
    error::{AppError, AppResult},
    models::borrowing::{Borrowing, PopularBook, UserBorrowingStats},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowingsService {
    repository: Repository,
    circulation: CirculationConfig,
}

impl BorrowingsService {
    pub fn new(repository: Repository, circulation: CirculationConfig) -> Self {
        Self {
            repository,
            circulation,
        }
    }

    /// Borrow a book for a user identified by username.
    /// Resolves the borrower and the book before touching the ledger.
    pub async fn borrow_by_username(&self, username: &str, book_id: i64) -> AppResult<Borrowing> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;
        self.repository.books.get_by_id(book_id).await?;

        self.borrow(user.id, book_id).await
    }

    /// Borrow a book: availability check, record creation and stock
    /// decrement happen atomically in the ledger.
    pub async fn borrow(&self, user_id: i64, book_id: i64) -> AppResult<Borrowing> {
        let borrowing = self
            .repository
            .borrowings
            .create(user_id, book_id, self.circulation.loan_period_days)
            .await?;

        tracing::info!(
            borrowing_id = borrowing.id,
            user_id,
            book_id,
            due_date = %borrowing.due_date,
            "Book borrowed"
        );
        Ok(borrowing)
    }

    /// Return a borrowed book, computing the fine at the configured rate
    pub async fn return_book(&self, borrowing_id: i64) -> AppResult<Borrowing> {
        let borrowing = self
            .repository
            .borrowings
            .close(borrowing_id, self.circulation.fine_per_day)
            .await?;

        tracing::info!(
            borrowing_id,
            fine = %borrowing.fine,
            "Book returned"
        );
        Ok(borrowing)
    }

    /// Get borrowings for a user
    pub async fn get_user_borrowings(&self, user_id: i64) -> AppResult<Vec<Borrowing>> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.borrowings.list_by_user(user_id).await
    }

    /// List all borrowings
    pub async fn list_all(&self) -> AppResult<Vec<Borrowing>> {
        self.repository.borrowings.list_all().await
    }

    /// List open borrowings past their due date
    pub async fn list_overdue(&self) -> AppResult<Vec<Borrowing>> {
        self.repository.borrowings.list_overdue().await
    }

    /// Top ten most borrowed books
    pub async fn popular_books(&self) -> AppResult<Vec<PopularBook>> {
        self.repository.borrowings.popular_books().await
    }

    /// Borrow counts per user
    pub async fn user_borrowing_stats(&self) -> AppResult<Vec<UserBorrowingStats>> {
        self.repository.borrowings.user_borrowing_stats().await
    }
}
