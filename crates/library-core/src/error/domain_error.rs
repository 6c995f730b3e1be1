//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{RecordId, StatusName};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(RecordId),

    #[error("Author not found: {0}")]
    AuthorNotFound(RecordId),

    #[error("Category not found: {0}")]
    CategoryNotFound(RecordId),

    #[error("Book not found: {0}")]
    BookNotFound(RecordId),

    #[error("No loan found for this book and member")]
    LoanNotFound,

    #[error("State not found: {0}")]
    StateNotFound(StatusName),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("State {state} is not valid for {entity}")]
    InvalidStatus {
        entity: &'static str,
        state: StatusName,
    },

    // =========================================================================
    // State Conflicts
    // =========================================================================
    #[error("Record is already deleted")]
    AlreadyDeleted,

    #[error("Record is already active")]
    AlreadyActive,

    #[error("Record is already disabled")]
    AlreadyDisabled,

    #[error("Book is already archived")]
    AlreadyArchived,

    #[error("Book is currently on loan")]
    BookOnLoan,

    #[error("Book is not available for borrowing")]
    BookUnavailable,

    #[error("Loan has already been returned")]
    AlreadyReturned,

    #[error("Member is not active")]
    MemberNotActive,

    #[error("Transaction is already finalized")]
    TransactionFinalized,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::AuthorNotFound(_) => "UNKNOWN_AUTHOR",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::BookNotFound(_) => "UNKNOWN_BOOK",
            Self::LoanNotFound => "UNKNOWN_LOAN",
            Self::StateNotFound(_) => "UNKNOWN_STATE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidName(_) => "INVALID_NAME",
            Self::InvalidStatus { .. } => "INVALID_STATUS",

            // State conflicts
            Self::AlreadyDeleted => "ALREADY_DELETED",
            Self::AlreadyActive => "ALREADY_ACTIVE",
            Self::AlreadyDisabled => "ALREADY_DISABLED",
            Self::AlreadyArchived => "ALREADY_ARCHIVED",
            Self::BookOnLoan => "BOOK_ON_LOAN",
            Self::BookUnavailable => "BOOK_UNAVAILABLE",
            Self::AlreadyReturned => "ALREADY_RETURNED",
            Self::MemberNotActive => "MEMBER_NOT_ACTIVE",
            Self::TransactionFinalized => "TRANSACTION_FINALIZED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound(_)
                | Self::AuthorNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::BookNotFound(_)
                | Self::LoanNotFound
                | Self::StateNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidName(_) | Self::InvalidStatus { .. }
        )
    }

    /// Check if this is a state-transition conflict
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyDeleted
                | Self::AlreadyActive
                | Self::AlreadyDisabled
                | Self::AlreadyArchived
                | Self::BookOnLoan
                | Self::BookUnavailable
                | Self::AlreadyReturned
                | Self::MemberNotActive
                | Self::TransactionFinalized
        )
    }
}
