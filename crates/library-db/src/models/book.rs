//! Book database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for books table
#[derive(Debug, Clone, FromRow)]
pub struct BookModel {
    pub id: Uuid,
    pub title: String,
    pub isbn: Option<String>,
    pub edition: String,
    pub published_date: NaiveDate,
    pub image_url: Option<String>,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub state_name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}
