//! Borrowing (loan) model and related types

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrowing record from database.
///
/// Lifecycle: created open (`return_date` is NULL, fine 0), closed
/// exactly once on return. A record with a non-null `return_date` is
/// terminal. `borrow_date` and `due_date` are fixed at creation and
/// never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrowing {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub fine: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Borrowing {
    /// Due date for a loan starting at `borrow_date`
    pub fn due_date_for(borrow_date: DateTime<Utc>, loan_period_days: i64) -> DateTime<Utc> {
        borrow_date + Duration::days(loan_period_days)
    }

    /// Fine owed when a loan due at `due_date` is returned at `return_date`.
    ///
    /// Zero when returned on or before the due date. Otherwise the number
    /// of whole days between the two (partial days truncate, never round
    /// up) times the per-day rate.
    pub fn late_fine(
        due_date: DateTime<Utc>,
        return_date: DateTime<Utc>,
        fine_per_day: Decimal,
    ) -> Decimal {
        if return_date <= due_date {
            return Decimal::ZERO;
        }
        let days_overdue = (return_date - due_date).num_days();
        Decimal::from(days_overdue) * fine_per_day
    }

    /// Open and past its due date
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.return_date.is_none() && self.due_date < now
    }
}

/// Borrow request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Borrower resolved by username, as scanned at the front desk
    pub username: String,
    pub book_id: i64,
}

/// Aggregate borrow count per book (descending)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PopularBook {
    pub book_id: i64,
    pub title: String,
    pub borrow_count: i64,
}

/// Aggregate borrow count per user (descending)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserBorrowingStats {
    pub user_id: i64,
    pub username: String,
    pub borrow_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rate() -> Decimal {
        Decimal::new(50, 2) // 0.50 per day
    }

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn due_date_is_exactly_fourteen_days_out() {
        let borrowed = at(2024, 3, 1, 10);
        let due = Borrowing::due_date_for(borrowed, 14);
        assert_eq!(due - borrowed, Duration::days(14));
        assert_eq!(due, at(2024, 3, 15, 10));
    }

    #[test]
    fn no_fine_when_returned_before_due_date() {
        let due = at(2024, 3, 15, 10);
        assert_eq!(Borrowing::late_fine(due, at(2024, 3, 10, 9), rate()), Decimal::ZERO);
    }

    #[test]
    fn no_fine_when_returned_exactly_at_due_date() {
        let due = at(2024, 3, 15, 10);
        assert_eq!(Borrowing::late_fine(due, due, rate()), Decimal::ZERO);
    }

    #[test]
    fn fine_is_half_unit_per_whole_day_overdue() {
        let due = at(2024, 3, 15, 10);
        // Borrowed at T, due T+14d, returned T+20d: 6 days late, 0.5 x 6
        let returned = due + Duration::days(6);
        assert_eq!(Borrowing::late_fine(due, returned, rate()), Decimal::new(300, 2));
    }

    #[test]
    fn partial_overdue_days_truncate() {
        let due = at(2024, 3, 15, 10);
        // 6 days 23 hours late still counts as 6 whole days
        let returned = due + Duration::days(6) + Duration::hours(23);
        assert_eq!(Borrowing::late_fine(due, returned, rate()), Decimal::new(300, 2));
        // under a full day late: zero whole days, zero fine
        let returned = due + Duration::hours(5);
        assert_eq!(Borrowing::late_fine(due, returned, rate()), Decimal::ZERO);
    }

    #[test]
    fn overdue_only_while_open() {
        let now = at(2024, 4, 1, 0);
        let mut b = Borrowing {
            id: 1,
            user_id: 1,
            book_id: 1,
            borrow_date: at(2024, 3, 1, 10),
            due_date: at(2024, 3, 15, 10),
            return_date: None,
            fine: Decimal::ZERO,
            created_at: at(2024, 3, 1, 10),
            updated_at: at(2024, 3, 1, 10),
        };
        assert!(b.is_overdue(now));
        b.return_date = Some(at(2024, 3, 20, 10));
        assert!(!b.is_overdue(now));
        b.return_date = None;
        assert!(!b.is_overdue(at(2024, 3, 10, 0)));
    }
}
