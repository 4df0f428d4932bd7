//! Book catalog and inventory service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Keyword search over title, author and ISBN
    pub async fn search(&self, keyword: &str) -> AppResult<Vec<Book>> {
        self.repository.books.search(keyword).await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Create a new book
    pub async fn create(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.create(&book).await
    }

    /// Update an existing book
    pub async fn update(&self, id: i64, book: UpdateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.update(id, &book).await
    }

    /// Delete a book
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Current stock count
    pub async fn get_stock(&self, id: i64) -> AppResult<i32> {
        let book = self.repository.books.get_by_id(id).await?;
        Ok(book.stock)
    }

    /// Administrative stock override
    pub async fn set_stock(&self, id: i64, stock: i32) -> AppResult<Book> {
        self.repository.books.set_stock(id, stock).await
    }
}
