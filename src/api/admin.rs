//! Administrative statistics and user management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{
        borrowing::{Borrowing, PopularBook, UserBorrowingStats},
        user::{User, UserStatus},
    },
};

/// Dashboard counters
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub total_users: i64,
    pub total_books: i64,
    pub total_borrowings: i64,
    pub overdue_count: i64,
    pub active_borrowings: i64,
}

#[derive(Deserialize, IntoParams)]
pub struct StatusParams {
    pub status: UserStatus,
}

/// Global library statistics
#[utoipa::path(
    get,
    path = "/admin/statistics",
    tag = "admin",
    responses(
        (status = 200, description = "Dashboard counters", body = StatisticsResponse)
    )
)]
pub async fn statistics(
    State(state): State<crate::AppState>,
) -> AppResult<Json<StatisticsResponse>> {
    let stats = state.services.stats.statistics().await?;
    Ok(Json(stats))
}

/// Top ten most borrowed books
#[utoipa::path(
    get,
    path = "/admin/popular-books",
    tag = "admin",
    responses(
        (status = 200, description = "Most borrowed books", body = Vec<PopularBook>)
    )
)]
pub async fn popular_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<PopularBook>>> {
    let books = state.services.borrowings.popular_books().await?;
    Ok(Json(books))
}

/// All borrowing records
#[utoipa::path(
    get,
    path = "/admin/borrowing-records",
    tag = "admin",
    responses(
        (status = 200, description = "All borrowings", body = Vec<Borrowing>)
    )
)]
pub async fn borrowing_records(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Borrowing>>> {
    let borrowings = state.services.borrowings.list_all().await?;
    Ok(Json(borrowings))
}

/// Open borrowings past their due date
#[utoipa::path(
    get,
    path = "/admin/overdue-records",
    tag = "admin",
    responses(
        (status = 200, description = "Overdue borrowings", body = Vec<Borrowing>)
    )
)]
pub async fn overdue_records(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Borrowing>>> {
    let borrowings = state.services.borrowings.list_overdue().await?;
    Ok(Json(borrowings))
}

/// Borrow counts per user
#[utoipa::path(
    get,
    path = "/admin/user-borrowing-stats",
    tag = "admin",
    responses(
        (status = 200, description = "Per-user borrow counts", body = Vec<UserBorrowingStats>)
    )
)]
pub async fn user_borrowing_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<UserBorrowingStats>>> {
    let stats = state.services.borrowings.user_borrowing_stats().await?;
    Ok(Json(stats))
}

/// List all users
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "All users", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list().await?;
    Ok(Json(users))
}

/// Get user details by ID
#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(user))
}

/// Activate or deactivate a user
#[utoipa::path(
    put,
    path = "/admin/users/{id}/status",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "User ID"),
        StatusParams
    ),
    responses(
        (status = 200, description = "Status updated", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Query(params): Query<StatusParams>,
) -> AppResult<Json<User>> {
    let user = state.services.users.update_status(id, params.status).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
