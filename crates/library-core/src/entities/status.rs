//! Per-entity lifecycle states
//!
//! Each entity only admits the subset of registry states that make sense
//! for it. Conversion into [`StatusName`] is infallible; conversion back
//! fails with [`DomainError::InvalidStatus`].

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::StatusName;

/// Lifecycle of a library member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MemberStatus {
    #[default]
    Active,
    Disabled,
    Deleted,
}

/// Lifecycle of authors, categories and transaction types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CatalogStatus {
    #[default]
    Active,
    Deleted,
}

/// Lifecycle of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookStatus {
    #[default]
    Active,
    Archived,
    Deleted,
}

/// Lifecycle of an audit transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl From<MemberStatus> for StatusName {
    fn from(status: MemberStatus) -> Self {
        match status {
            MemberStatus::Active => Self::Active,
            MemberStatus::Disabled => Self::Disabled,
            MemberStatus::Deleted => Self::Deleted,
        }
    }
}

impl TryFrom<StatusName> for MemberStatus {
    type Error = DomainError;

    fn try_from(name: StatusName) -> Result<Self, Self::Error> {
        match name {
            StatusName::Active => Ok(Self::Active),
            StatusName::Disabled => Ok(Self::Disabled),
            StatusName::Deleted => Ok(Self::Deleted),
            other => Err(DomainError::InvalidStatus {
                entity: "member",
                state: other,
            }),
        }
    }
}

impl From<CatalogStatus> for StatusName {
    fn from(status: CatalogStatus) -> Self {
        match status {
            CatalogStatus::Active => Self::Active,
            CatalogStatus::Deleted => Self::Deleted,
        }
    }
}

impl TryFrom<StatusName> for CatalogStatus {
    type Error = DomainError;

    fn try_from(name: StatusName) -> Result<Self, Self::Error> {
        match name {
            StatusName::Active => Ok(Self::Active),
            StatusName::Deleted => Ok(Self::Deleted),
            other => Err(DomainError::InvalidStatus {
                entity: "catalogue record",
                state: other,
            }),
        }
    }
}

impl From<BookStatus> for StatusName {
    fn from(status: BookStatus) -> Self {
        match status {
            BookStatus::Active => Self::Active,
            BookStatus::Archived => Self::Archived,
            BookStatus::Deleted => Self::Deleted,
        }
    }
}

impl TryFrom<StatusName> for BookStatus {
    type Error = DomainError;

    fn try_from(name: StatusName) -> Result<Self, Self::Error> {
        match name {
            StatusName::Active => Ok(Self::Active),
            StatusName::Archived => Ok(Self::Archived),
            StatusName::Deleted => Ok(Self::Deleted),
            other => Err(DomainError::InvalidStatus {
                entity: "book",
                state: other,
            }),
        }
    }
}

impl From<TransactionStatus> for StatusName {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Pending => Self::Pending,
            TransactionStatus::Completed => Self::Completed,
            TransactionStatus::Failed => Self::Failed,
        }
    }
}

impl TryFrom<StatusName> for TransactionStatus {
    type Error = DomainError;

    fn try_from(name: StatusName) -> Result<Self, Self::Error> {
        match name {
            StatusName::Pending => Ok(Self::Pending),
            StatusName::Completed => Ok(Self::Completed),
            StatusName::Failed => Ok(Self::Failed),
            other => Err(DomainError::InvalidStatus {
                entity: "transaction",
                state: other,
            }),
        }
    }
}
