//! Author database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct AuthorModel {
    pub id: Uuid,
    pub salutation: String,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub state_name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}
