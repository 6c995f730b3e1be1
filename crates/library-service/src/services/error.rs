//! Service layer error types
//!
//! [`ServiceError::code`] is the single mapping from a failure to the
//! response code written to the audit ledger and returned to the caller.

use library_common::{codes, AppError};
use library_core::{DomainError, RecordId};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or repository failure
    Domain(DomainError),

    /// Application error (auth, request parsing, ...)
    App(AppError),

    /// Record lookup came back empty
    NotFound {
        resource: &'static str,
        on_fetch: bool,
    },

    /// Identifier is not a UUID v4
    InvalidIdentifier {
        field: &'static str,
        on_fetch: bool,
    },

    /// Field value rejected
    Validation(String),

    /// Unknown status action
    InvalidAction(String),

    /// Persisting a create or update failed
    SaveFailed(String),

    /// Persisting a state transition failed
    StatusChangeFailed(String),

    /// Audit transaction could not be opened
    LedgerFailed(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, .. } => write!(f, "{resource} not found"),
            Self::InvalidIdentifier { field, .. } => write!(f, "Invalid {field} identifier"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::InvalidAction(action) => write!(f, "No action to be performed: {action}"),
            Self::SaveFailed(msg) => write!(f, "Failed to save record: {msg}"),
            Self::StatusChangeFailed(msg) => write!(f, "Failed to change state: {msg}"),
            Self::LedgerFailed(name) => write!(f, "{name} transaction failed"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Missing record on a mutation or listing
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound {
            resource,
            on_fetch: false,
        }
    }

    /// Missing record on a single-record fetch
    pub fn not_found_on_fetch(resource: &'static str) -> Self {
        Self::NotFound {
            resource,
            on_fetch: true,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Wrap a repository failure on create/update. Rule violations reported
    /// by the store (unique keys, open loans) keep their own code.
    pub fn save_failed(err: DomainError) -> Self {
        match err {
            DomainError::DatabaseError(msg) => Self::SaveFailed(msg),
            other => Self::Domain(other),
        }
    }

    /// Wrap a repository failure while persisting a state transition
    pub fn status_change_failed(err: DomainError) -> Self {
        match err {
            DomainError::DatabaseError(msg) => Self::StatusChangeFailed(msg),
            other => Self::Domain(other),
        }
    }

    /// Response code for the envelope and the audit record
    pub fn code(&self) -> &'static str {
        match self {
            Self::Domain(e) => domain_code(e),
            Self::App(e) => e.response_code(),
            Self::NotFound { on_fetch: true, .. } => codes::NOT_FOUND_ON_FETCH,
            Self::NotFound { .. } => codes::NOT_FOUND,
            Self::InvalidIdentifier { on_fetch: true, .. } => codes::INVALID_IDENTIFIER_ON_FETCH,
            Self::InvalidIdentifier { .. } => codes::INVALID_IDENTIFIER,
            Self::Validation(_) => codes::INVALID_FIELD,
            Self::InvalidAction(_) => codes::INVALID_ACTION,
            Self::SaveFailed(_) => codes::SAVE_FAILED,
            Self::StatusChangeFailed(_) => codes::STATUS_CHANGE_FAILED,
            Self::LedgerFailed(_) => codes::LEDGER_FAILED,
            Self::Internal(_) => codes::INTERNAL,
        }
    }

    /// Failures whose text is worth keeping in the audit response column
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self.code(),
            codes::INTERNAL | codes::SAVE_FAILED | codes::STATUS_CHANGE_FAILED
        )
    }
}

fn domain_code(err: &DomainError) -> &'static str {
    match err {
        DomainError::AlreadyDeleted => codes::ALREADY_DELETED,
        DomainError::AlreadyActive => codes::ALREADY_ACTIVE,
        DomainError::AlreadyDisabled => codes::ALREADY_DISABLED,
        DomainError::AlreadyArchived => codes::ALREADY_ARCHIVED,
        DomainError::BookOnLoan | DomainError::BookUnavailable => codes::BOOK_UNAVAILABLE,
        DomainError::AlreadyReturned => codes::ALREADY_RETURNED,
        DomainError::MemberNotActive => codes::MEMBER_NOT_ACTIVE,
        DomainError::InvalidName(_) => codes::INVALID_NAME,
        DomainError::ValidationError(_) | DomainError::InvalidStatus { .. } => codes::INVALID_FIELD,
        e if e.is_not_found() => codes::NOT_FOUND,
        _ => codes::INTERNAL,
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        // field names only; values may carry personal data
        let field_errors = err.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().map(AsRef::as_ref).collect();
        fields.sort_unstable();
        Self::Validation(format!("invalid value for {}", fields.join(", ")))
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Parse an identifier supplied by a caller
pub(crate) fn parse_id(
    raw: &str,
    field: &'static str,
    on_fetch: bool,
) -> ServiceResult<RecordId> {
    RecordId::parse(raw).map_err(|_| ServiceError::InvalidIdentifier { field, on_fetch })
}
