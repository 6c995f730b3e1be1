//! State entity - a row in the state registry

use chrono::{DateTime, Utc};

use crate::value_objects::{RecordId, StatusName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub id: RecordId,
    pub name: StatusName,
    pub description: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl State {
    /// Build a registry row with its seed description
    pub fn seed(name: StatusName) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            name,
            description: name.description().to_string(),
            date_created: now,
            date_modified: now,
        }
    }
}
