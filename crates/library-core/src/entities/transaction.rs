//! Transaction entity - audit record of one attempted operation

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::status::{CatalogStatus, TransactionStatus};
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Maximum stored length of a transaction message
pub const MAX_MESSAGE_LENGTH: usize = 200;

/// Kind of operation being audited, e.g. `CreateMember`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionType {
    pub id: RecordId,
    pub name: String,
    pub simple_name: String,
    pub status: CatalogStatus,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl TransactionType {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            simple_name: spaced_name(&name),
            name,
            status: CatalogStatus::Active,
            date_created: now,
            date_modified: now,
        }
    }
}

/// `CreateMember` -> `Create Member`
fn spaced_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        out.push(c);
    }
    out
}

/// Audit record.
///
/// Opened as `Pending`, then finalized exactly once as `Completed` or
/// `Failed`. A finalized record rejects further transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: RecordId,
    pub transaction_type_id: RecordId,
    pub transaction_type: String,
    pub request: Value,
    pub response: Option<Value>,
    pub message: Option<String>,
    pub user: Option<String>,
    pub source_ip: Option<String>,
    pub response_code: Option<String>,
    pub status: TransactionStatus,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl Transaction {
    /// Open a pending transaction of the given type
    pub fn open(
        transaction_type: &TransactionType,
        request: Value,
        user: Option<String>,
        source_ip: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            transaction_type_id: transaction_type.id,
            transaction_type: transaction_type.name.clone(),
            request,
            response: None,
            message: None,
            user,
            source_ip,
            response_code: None,
            status: TransactionStatus::Pending,
            date_created: now,
            date_modified: now,
        }
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.status != TransactionStatus::Pending
    }

    /// Mark as completed
    pub fn complete(&mut self, message: &str, response_code: &str) -> Result<(), DomainError> {
        self.finalize(TransactionStatus::Completed, message, response_code, None)
    }

    /// Mark as failed
    pub fn fail(
        &mut self,
        message: &str,
        response_code: &str,
        response: Option<Value>,
    ) -> Result<(), DomainError> {
        self.finalize(TransactionStatus::Failed, message, response_code, response)
    }

    fn finalize(
        &mut self,
        status: TransactionStatus,
        message: &str,
        response_code: &str,
        response: Option<Value>,
    ) -> Result<(), DomainError> {
        if self.is_finalized() {
            return Err(DomainError::TransactionFinalized);
        }
        self.status = status;
        self.message = Some(message.chars().take(MAX_MESSAGE_LENGTH).collect());
        self.response_code = Some(response_code.to_string());
        self.response = response;
        self.date_modified = Utc::now();
        Ok(())
    }
}
