//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub mobile_no: Option<String>,
    pub gender: Option<String>,
    pub membership_no: String,
    pub state_name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}
