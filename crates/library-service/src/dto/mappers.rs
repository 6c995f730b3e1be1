//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::Utc;

use library_core::{
    Author, Book, Category, FeeSchedule, Loan, Member, State, StatusName, Transaction,
};

use super::responses::{
    AuthorResponse, BookResponse, BorrowFeeResponse, CategoryResponse, LoanResponse,
    MemberResponse, StateResponse, TransactionResponse,
};

// ============================================================================
// Registry and Audit Mappers
// ============================================================================

impl From<&State> for StateResponse {
    fn from(state: &State) -> Self {
        Self {
            id: state.id,
            name: state.name,
            description: Some(state.description.clone()),
        }
    }
}

impl From<&Transaction> for TransactionResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            transaction_type: tx.transaction_type.clone(),
            request: tx.request.clone(),
            response: tx.response.clone(),
            message: tx.message.clone(),
            user: tx.user.clone(),
            source_ip: tx.source_ip.clone(),
            response_code: tx.response_code.clone(),
            state_name: tx.status.into(),
            date_created: tx.date_created,
            date_modified: tx.date_modified,
        }
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            national_id: member.national_id.clone(),
            mobile_no: member.mobile_no.clone(),
            gender: member.gender,
            membership_no: member.membership_no.clone(),
            state_name: member.status.into(),
            date_created: member.date_created,
            date_modified: member.date_modified,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}

// ============================================================================
// Catalogue Mappers
// ============================================================================

impl From<&Author> for AuthorResponse {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            salutation: author.salutation.as_str().to_string(),
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            description: author.description.clone(),
            state_name: author.status.into(),
            date_created: author.date_created,
            date_modified: author.date_modified,
        }
    }
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            state_name: category.status.into(),
            date_created: category.date_created,
            date_modified: category.date_modified,
        }
    }
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            edition: book.edition.clone(),
            published_date: book.published_date,
            image_url: book.image_url.clone(),
            author_id: book.author_id,
            category_id: book.category_id,
            state_name: StatusName::from(book.status),
            date_created: book.date_created,
            date_modified: book.date_modified,
        }
    }
}

// ============================================================================
// Lending Mappers
// ============================================================================

impl LoanResponse {
    /// Map a loan, pricing any open overdue loan against `schedule`
    pub fn from_loan(loan: &Loan, schedule: &FeeSchedule) -> Self {
        let now = Utc::now();
        let fee_due = if loan.returned {
            loan.return_fee
        } else {
            loan.fee_due(schedule, now)
        };
        Self {
            id: loan.id,
            book_id: loan.book_id,
            member_id: loan.member_id,
            issued_date: loan.issued_date,
            borrow_duration: loan.borrow_duration,
            return_date: loan.return_date,
            returned_at: loan.returned_at,
            return_fee: loan.return_fee,
            fee_paid: loan.fee_paid,
            returned: loan.returned,
            overdue: loan.is_overdue(now),
            fee_due,
        }
    }
}

impl From<&FeeSchedule> for BorrowFeeResponse {
    fn from(schedule: &FeeSchedule) -> Self {
        Self {
            overdue_fee_per_day: schedule.overdue_fee_per_day,
            currency: schedule.currency.clone(),
            default_borrow_days: schedule.default_borrow_days,
            max_borrow_days: schedule.max_borrow_days,
        }
    }
}
