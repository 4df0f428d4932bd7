//! Reporting service: read-only projections over the ledger

use crate::{api::admin::StatisticsResponse, error::AppResult, repository::Repository};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Administrative dashboard counters
    pub async fn statistics(&self) -> AppResult<StatisticsResponse> {
        Ok(StatisticsResponse {
            total_users: self.repository.users.count().await?,
            total_books: self.repository.books.count().await?,
            total_borrowings: self.repository.borrowings.count().await?,
            overdue_count: self.repository.borrowings.count_overdue().await?,
            active_borrowings: self.repository.borrowings.count_active().await?,
        })
    }
}
