//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use library_common::codes;
use library_core::{Gender, RecordId, StatusName};

// ============================================================================
// Envelope
// ============================================================================

/// Body of every `/api/v1` response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            code: codes::SUCCESS.to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Registry and Audit Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct StateResponse {
    pub id: RecordId,
    pub name: StatusName,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub id: RecordId,
    pub transaction_type: String,
    pub request: Value,
    pub response: Option<Value>,
    pub message: Option<String>,
    pub user: Option<String>,
    pub source_ip: Option<String>,
    pub response_code: Option<String>,
    pub state_name: StatusName,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub mobile_no: Option<String>,
    pub gender: Option<Gender>,
    pub membership_no: String,
    pub state_name: StatusName,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

// ============================================================================
// Catalogue Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: RecordId,
    pub salutation: String,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub state_name: StatusName,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub state_name: StatusName,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub id: RecordId,
    pub title: String,
    pub isbn: Option<String>,
    pub edition: String,
    pub published_date: NaiveDate,
    pub image_url: Option<String>,
    pub author_id: RecordId,
    pub category_id: RecordId,
    pub state_name: StatusName,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

// ============================================================================
// Lending Responses
// ============================================================================

/// A loan, with the fee it would accrue if returned now
#[derive(Debug, Clone, Serialize)]
pub struct LoanResponse {
    pub id: RecordId,
    pub book_id: RecordId,
    pub member_id: RecordId,
    pub issued_date: DateTime<Utc>,
    pub borrow_duration: u32,
    pub return_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub return_fee: Decimal,
    pub fee_paid: bool,
    pub returned: bool,
    pub overdue: bool,
    pub fee_due: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BorrowFeeResponse {
    pub overdue_fee_per_day: Decimal,
    pub currency: String,
    pub default_borrow_days: u32,
    pub max_borrow_days: u32,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub state_registry: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, registry_seeded: bool) -> Self {
        let all_healthy = database_healthy && registry_seeded;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                state_registry: if registry_seeded { "seeded" } else { "missing" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
