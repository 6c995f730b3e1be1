//! Member entity - a registered library patron

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::MemberStatus;
use crate::error::DomainError;
use crate::value_objects::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    /// Accepts `M`/`F` in either case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "M" | "m" => Some(Self::Male),
            "F" | "f" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Library member entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub mobile_no: Option<String>,
    pub gender: Option<Gender>,
    pub membership_no: String,
    pub status: MemberStatus,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl Member {
    /// Create a new member. A membership number is derived from the id
    /// when none is supplied.
    pub fn new(
        first_name: String,
        last_name: String,
        membership_no: Option<String>,
        status: MemberStatus,
    ) -> Self {
        let id = RecordId::new();
        let now = Utc::now();
        Self {
            id,
            first_name,
            last_name,
            national_id: None,
            mobile_no: None,
            gender: None,
            membership_no: membership_no.unwrap_or_else(|| Self::membership_no_for(id)),
            status,
            date_created: now,
            date_modified: now,
        }
    }

    /// `MBR-` followed by the first eight hex digits of the id
    pub fn membership_no_for(id: RecordId) -> String {
        format!("MBR-{}", id.short_code())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.status == MemberStatus::Deleted
    }

    /// Only active members may borrow
    #[inline]
    pub fn can_borrow(&self) -> bool {
        self.status == MemberStatus::Active
    }

    /// Soft delete
    pub fn delete(&mut self) -> Result<(), DomainError> {
        if self.status == MemberStatus::Deleted {
            return Err(DomainError::AlreadyDeleted);
        }
        self.transition(MemberStatus::Deleted);
        Ok(())
    }

    /// Re-activate a disabled or deleted member
    pub fn enable(&mut self) -> Result<(), DomainError> {
        if self.status == MemberStatus::Active {
            return Err(DomainError::AlreadyActive);
        }
        self.transition(MemberStatus::Active);
        Ok(())
    }

    /// Disable an active member. Deleted members cannot be disabled.
    pub fn disable(&mut self) -> Result<(), DomainError> {
        if matches!(self.status, MemberStatus::Disabled | MemberStatus::Deleted) {
            return Err(DomainError::AlreadyDisabled);
        }
        self.transition(MemberStatus::Disabled);
        Ok(())
    }

    fn transition(&mut self, status: MemberStatus) {
        self.status = status;
        self.date_modified = Utc::now();
    }
}
