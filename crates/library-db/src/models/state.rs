//! State registry model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for states table
#[derive(Debug, Clone, FromRow)]
pub struct StateModel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}
