//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
///
/// `stock` counts the physical copies currently on the shelf. It is
/// only mutated by the borrow/return flows and by administrative
/// overrides, and never goes negative.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: Option<String>,
    pub stock: i32,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(length(min = 1))]
    pub isbn: String,
    pub category: Option<String>,
    /// Initial number of copies (defaults to 0)
    pub stock: Option<i32>,
    /// Shelf location
    pub location: Option<String>,
}

/// Update book request (full replacement of editable fields)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(length(min = 1))]
    pub isbn: String,
    pub category: Option<String>,
    pub stock: i32,
    pub location: Option<String>,
}
