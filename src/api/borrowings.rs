//! Borrow and return endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::borrowing::{Borrowing, BorrowRequest},
};

#[derive(Deserialize, IntoParams)]
pub struct ReturnParams {
    /// Identifier of the borrowing record to close
    #[serde(alias = "borrowingId")]
    pub borrowing_id: i64,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrowings",
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Borrowing created", body = Borrowing),
        (status = 400, description = "Book not available"),
        (status = 404, description = "User or book not found")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<Borrowing>)> {
    let borrowing = state
        .services
        .borrowings
        .borrow_by_username(&request.username, request.book_id)
        .await?;
    Ok((StatusCode::CREATED, Json(borrowing)))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/return",
    tag = "borrowings",
    params(ReturnParams),
    responses(
        (status = 200, description = "Borrowing closed", body = Borrowing),
        (status = 400, description = "Already returned"),
        (status = 404, description = "Borrowing not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Query(params): Query<ReturnParams>,
) -> AppResult<Json<Borrowing>> {
    let borrowing = state
        .services
        .borrowings
        .return_book(params.borrowing_id)
        .await?;
    Ok(Json(borrowing))
}

/// Get a user's borrowing history
#[utoipa::path(
    get,
    path = "/borrowings/{user_id}",
    tag = "borrowings",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's borrowings", body = Vec<Borrowing>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_borrowings(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Borrowing>>> {
    let borrowings = state
        .services
        .borrowings
        .get_user_borrowings(user_id)
        .await?;
    Ok(Json(borrowings))
}
