//! Category entity

use chrono::{DateTime, Utc};

use super::status::CatalogStatus;
use crate::error::DomainError;
use crate::value_objects::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub status: CatalogStatus,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, description: Option<String>, status: CatalogStatus) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            name,
            description,
            status,
            date_created: now,
            date_modified: now,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.status == CatalogStatus::Deleted
    }

    pub fn delete(&mut self) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::AlreadyDeleted);
        }
        self.status = CatalogStatus::Deleted;
        self.date_modified = Utc::now();
        Ok(())
    }

    pub fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::AlreadyDeleted);
        }
        Ok(())
    }
}
