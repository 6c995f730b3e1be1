//! Author entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::CatalogStatus;
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Honorific shown before an author's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Salutation {
    #[serde(rename = "Prof.")]
    Prof,
    #[serde(rename = "Dr.")]
    Dr,
    #[serde(rename = "Mr.")]
    Mr,
    #[serde(rename = "Mrs.")]
    Mrs,
    #[serde(rename = "Miss")]
    Miss,
    #[serde(rename = "Ms")]
    Ms,
}

impl Salutation {
    pub const ALL: [Salutation; 6] = [
        Self::Prof,
        Self::Dr,
        Self::Mr,
        Self::Mrs,
        Self::Miss,
        Self::Ms,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prof => "Prof.",
            Self::Dr => "Dr.",
            Self::Mr => "Mr.",
            Self::Mrs => "Mrs.",
            Self::Miss => "Miss",
            Self::Ms => "Ms",
        }
    }

    /// Exact stored form, or the same without the trailing dot
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|sal| {
            let stored = sal.as_str();
            stored.eq_ignore_ascii_case(s) || stored.trim_end_matches('.').eq_ignore_ascii_case(s)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: RecordId,
    pub salutation: Salutation,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub status: CatalogStatus,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl Author {
    pub fn new(
        salutation: Salutation,
        first_name: String,
        last_name: String,
        description: Option<String>,
        status: CatalogStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            salutation,
            first_name,
            last_name,
            description,
            status,
            date_created: now,
            date_modified: now,
        }
    }

    /// e.g. `Dr. Chinua Achebe`
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.salutation.as_str(), self.first_name, self.last_name)
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

    /// Rejects edits to a deleted author
    pub fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::AlreadyDeleted);
        }
        Ok(())
    }
}
