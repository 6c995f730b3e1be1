//! Loan database model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for book_issued table
#[derive(Debug, Clone, FromRow)]
pub struct LoanModel {
    pub id: Uuid,
    pub book_id: Uuid,
    pub member_id: Uuid,
    pub issued_date: DateTime<Utc>,
    pub borrow_duration: i32,
    pub return_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub return_fee: Decimal,
    pub fee_paid: bool,
    pub returned: bool,
}
