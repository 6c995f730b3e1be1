//! Loan entity - a book issued to a member

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::error::DomainError;
use crate::value_objects::{FeeSchedule, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub id: RecordId,
    pub book_id: RecordId,
    pub member_id: RecordId,
    pub issued_date: DateTime<Utc>,
    pub borrow_duration: u32,
    /// Due date
    pub return_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub return_fee: Decimal,
    pub fee_paid: bool,
    pub returned: bool,
}

impl Loan {
    /// Issue a book today for `borrow_duration` days
    pub fn issue(book_id: RecordId, member_id: RecordId, borrow_duration: u32) -> Self {
        Self::issue_at(book_id, member_id, borrow_duration, Utc::now())
    }

    pub fn issue_at(
        book_id: RecordId,
        member_id: RecordId,
        borrow_duration: u32,
        issued_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            book_id,
            member_id,
            issued_date,
            borrow_duration,
            return_date: issued_date + Duration::days(i64::from(borrow_duration)),
            returned_at: None,
            return_fee: Decimal::ZERO,
            fee_paid: false,
            returned: false,
        }
    }

    /// Past the due date and not yet returned
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.returned && now > self.return_date
    }

    /// Fee that would be charged if returned at `at`
    pub fn fee_due(&self, schedule: &FeeSchedule, at: DateTime<Utc>) -> Decimal {
        schedule.fee_for(self.return_date, at)
    }

    /// Close the loan at `at` and settle the fee.
    ///
    /// A zero fee is always considered paid; otherwise `fee_paid` is recorded
    /// as given.
    pub fn mark_returned(
        &mut self,
        schedule: &FeeSchedule,
        at: DateTime<Utc>,
        fee_paid: bool,
    ) -> Result<Decimal, DomainError> {
        if self.returned {
            return Err(DomainError::AlreadyReturned);
        }
        let fee = self.fee_due(schedule, at);
        self.returned = true;
        self.returned_at = Some(at);
        self.return_fee = fee;
        self.fee_paid = fee.is_zero() || fee_paid;
        Ok(fee)
    }
}
