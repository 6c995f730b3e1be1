//! Book entity

use chrono::{DateTime, NaiveDate, Utc};

use super::status::BookStatus;
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Catalogue entry for one title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub isbn: Option<String>,
    pub edition: String,
    pub published_date: NaiveDate,
    pub image_url: Option<String>,
    pub author_id: RecordId,
    pub category_id: RecordId,
    pub status: BookStatus,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl Book {
    pub fn new(
        title: String,
        edition: String,
        published_date: NaiveDate,
        author_id: RecordId,
        category_id: RecordId,
        status: BookStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            title,
            isbn: None,
            edition,
            published_date,
            image_url: None,
            author_id,
            category_id,
            status,
            date_created: now,
            date_modified: now,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.status == BookStatus::Deleted
    }

    /// Active books can be lent out
    #[inline]
    pub fn is_lendable(&self) -> bool {
        self.status == BookStatus::Active
    }

    pub fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::AlreadyDeleted);
        }
        Ok(())
    }

    /// Soft delete. `on_loan` must reflect whether an open loan exists.
    pub fn delete(&mut self, on_loan: bool) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::AlreadyDeleted);
        }
        if on_loan {
            return Err(DomainError::BookOnLoan);
        }
        self.transition(BookStatus::Deleted);
        Ok(())
    }

    /// Withdraw from circulation while keeping the record visible
    pub fn archive(&mut self, on_loan: bool) -> Result<(), DomainError> {
        match self.status {
            BookStatus::Deleted => return Err(DomainError::AlreadyDeleted),
            BookStatus::Archived => return Err(DomainError::AlreadyArchived),
            BookStatus::Active => {}
        }
        if on_loan {
            return Err(DomainError::BookOnLoan);
        }
        self.transition(BookStatus::Archived);
        Ok(())
    }

    fn transition(&mut self, status: BookStatus) {
        self.status = status;
        self.date_modified = Utc::now();
    }
}
