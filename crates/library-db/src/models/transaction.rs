//! Audit ledger models

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for transaction_types table
#[derive(Debug, Clone, FromRow)]
pub struct TransactionTypeModel {
    pub id: Uuid,
    pub name: String,
    pub simple_name: String,
    pub state_name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

/// Database model for transactions table, joined with its type name
#[derive(Debug, Clone, FromRow)]
pub struct TransactionModel {
    pub id: Uuid,
    pub transaction_type_id: Uuid,
    pub transaction_type: String,
    pub request: Value,
    pub response: Option<Value>,
    pub message: Option<String>,
    pub user_name: Option<String>,
    pub source_ip: Option<String>,
    pub response_code: Option<String>,
    pub state_name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}
