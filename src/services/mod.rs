//! Business logic services

pub mod books;
pub mod borrowings;
pub mod stats;
pub mod users;

use crate::{config::CirculationConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub users: users::UsersService,
    pub borrowings: borrowings::BorrowingsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, circulation: CirculationConfig) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            borrowings: borrowings::BorrowingsService::new(repository.clone(), circulation),
            stats: stats::StatsService::new(repository),
        }
    }
}
