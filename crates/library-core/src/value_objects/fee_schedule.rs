//! Borrowing terms and overdue fee computation

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Terms applied to every loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub overdue_fee_per_day: Decimal,
    pub currency: String,
    pub default_borrow_days: u32,
    pub max_borrow_days: u32,
}

impl FeeSchedule {
    /// Whole days past `due`, rounding any partial day up. Zero when on time.
    pub fn overdue_days(due: DateTime<Utc>, returned_at: DateTime<Utc>) -> i64 {
        let late = returned_at - due;
        if late <= Duration::zero() {
            return 0;
        }
        let day = Duration::days(1).num_seconds();
        let secs = late.num_seconds();
        // sub-second lateness still counts as a started day
        (secs + day - 1).div_euclid(day).max(1)
    }

    /// Fee owed for a loan due at `due` and handed back at `returned_at`
    pub fn fee_for(&self, due: DateTime<Utc>, returned_at: DateTime<Utc>) -> Decimal {
        let days = Self::overdue_days(due, returned_at);
        (self.overdue_fee_per_day * Decimal::from(days))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Resolve a requested duration against the schedule
    pub fn resolve_duration(&self, requested: Option<u32>) -> Option<u32> {
        let days = requested.unwrap_or(self.default_borrow_days);
        (1..=self.max_borrow_days).contains(&days).then_some(days)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            overdue_fee_per_day: Decimal::new(1000, 2),
            currency: "KES".to_string(),
            default_borrow_days: 14,
            max_borrow_days: 60,
        }
    }
}
