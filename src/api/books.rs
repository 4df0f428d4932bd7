//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
};

#[derive(Deserialize, IntoParams)]
pub struct SearchQuery {
    pub keyword: String,
}

#[derive(Deserialize, IntoParams)]
pub struct StockParams {
    pub stock: i32,
}

/// Search books by keyword (title/author substring, exact ISBN)
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.search(&query.keyword).await?;
    Ok(Json(books))
}

/// List the whole catalog
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(book): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.books.update(id, book).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a book's current stock count
#[utoipa::path(
    get,
    path = "/books/{id}/stock",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Current stock", body = i32),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_stock(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<i32>> {
    let stock = state.services.books.get_stock(id).await?;
    Ok(Json(stock))
}

/// Administrative stock override
#[utoipa::path(
    put,
    path = "/books/{id}/stock",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID"),
        StockParams
    ),
    responses(
        (status = 200, description = "Stock updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn set_stock(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Query(params): Query<StockParams>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.set_stock(id, params.stock).await?;
    Ok(Json(book))
}
