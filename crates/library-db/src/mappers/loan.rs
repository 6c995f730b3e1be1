//! Loan model -> entity

use library_core::{DomainError, Loan, RecordId};

use crate::models::LoanModel;

impl TryFrom<LoanModel> for Loan {
    type Error = DomainError;

    fn try_from(model: LoanModel) -> Result<Self, Self::Error> {
        let borrow_duration = u32::try_from(model.borrow_duration).map_err(|_| {
            DomainError::DatabaseError(format!("negative borrow duration: {}", model.borrow_duration))
        })?;

        Ok(Loan {
            id: RecordId::from_uuid(model.id),
            book_id: RecordId::from_uuid(model.book_id),
            member_id: RecordId::from_uuid(model.member_id),
            issued_date: model.issued_date,
            borrow_duration,
            return_date: model.return_date,
            returned_at: model.returned_at,
            return_fee: model.return_fee,
            fee_paid: model.fee_paid,
            returned: model.returned,
        })
    }
}

/// Value bound to the INTEGER `borrow_duration` column
pub fn borrow_duration_column(loan: &Loan) -> Result<i32, DomainError> {
    i32::try_from(loan.borrow_duration)
        .map_err(|_| DomainError::ValidationError("borrow duration out of range".to_string()))
}
