//! Category database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct CategoryModel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub state_name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}
