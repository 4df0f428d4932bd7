//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, books, borrowings, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        // Users
        users::register,
        users::login,
        // Books
        books::search_books,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::get_stock,
        books::set_stock,
        // Borrowings
        borrowings::borrow_book,
        borrowings::return_book,
        borrowings::get_user_borrowings,
        // Admin
        admin::statistics,
        admin::popular_books,
        admin::borrowing_records,
        admin::overdue_records,
        admin::user_borrowing_stats,
        admin::list_users,
        admin::get_user,
        admin::update_user_status,
        admin::delete_user,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::Role,
            crate::models::user::UserStatus,
            crate::models::user::RegisterUser,
            crate::models::user::LoginRequest,
            users::LoginResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Borrowings
            crate::models::borrowing::Borrowing,
            crate::models::borrowing::BorrowRequest,
            crate::models::borrowing::PopularBook,
            crate::models::borrowing::UserBorrowingStats,
            // Admin
            admin::StatisticsResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Registration and login"),
        (name = "books", description = "Book catalog and inventory"),
        (name = "borrowings", description = "Borrow and return workflow"),
        (name = "admin", description = "Statistics and user administration")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
