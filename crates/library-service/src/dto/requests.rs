//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate`. Identifiers
//! arrive as raw strings and are parsed by the administration services so a
//! malformed id is answered with its own response code. Missing fields
//! default to empty and are rejected the same way.

use serde::Deserialize;
use validator::{Validate, ValidationError};

fn validate_digits(value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("digits"))
    }
}

fn validate_isbn(value: &str) -> Result<(), ValidationError> {
    let digits: Vec<char> = value.chars().filter(|c| *c != '-' && *c != ' ').collect();
    let well_formed = match digits.len() {
        13 => digits.iter().all(char::is_ascii_digit),
        10 => {
            digits[..9].iter().all(char::is_ascii_digit)
                && (digits[9].is_ascii_digit() || digits[9].eq_ignore_ascii_case(&'x'))
        }
        _ => false,
    };
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("isbn"))
    }
}

// ============================================================================
// Member Requests
// ============================================================================

/// Register a new library member
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[validate(length(max = 20), custom(function = "validate_digits"))]
    pub national_id: Option<String>,

    #[validate(length(min = 7, max = 20), custom(function = "validate_digits"))]
    pub mobile_no: Option<String>,

    pub gender: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub membership_no: Option<String>,
}

/// Fetch one member
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetMemberRequest {
    #[serde(default, alias = "id")]
    pub member_id: String,
}

/// Partial update of a member's details
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[serde(default, alias = "member_id")]
    pub id: String,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    #[validate(length(max = 20), custom(function = "validate_digits"))]
    pub national_id: Option<String>,

    #[validate(length(min = 7, max = 20), custom(function = "validate_digits"))]
    pub mobile_no: Option<String>,

    pub gender: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub membership_no: Option<String>,
}

/// Delete, enable or disable a member
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeMemberStatusRequest {
    #[serde(default, alias = "member_id")]
    pub id: String,

    /// `delete` (default), `enable` or `disable`, case-insensitive
    pub action: Option<String>,
}

// ============================================================================
// Catalogue Requests
// ============================================================================

/// Delete an author, category or book
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteRecordRequest {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAuthorRequest {
    #[serde(default)]
    pub salutation: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetAuthorRequest {
    #[serde(default, alias = "author_id", alias = "id")]
    pub author: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAuthorRequest {
    #[serde(default, alias = "author_id")]
    pub id: String,

    pub salutation: Option<String>,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetCategoryRequest {
    #[serde(default, alias = "category_id", alias = "id")]
    pub category: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[serde(default, alias = "category_id")]
    pub id: String,

    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 255))]
    pub description: Option<String>,
}

/// Add a book to the catalogue
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(custom(function = "validate_isbn"))]
    pub isbn: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 10))]
    pub edition: String,

    /// `YYYY-MM-DD`
    #[serde(default)]
    pub published_date: String,

    #[validate(url)]
    pub image_url: Option<String>,

    #[serde(default, alias = "author")]
    pub author_id: String,

    #[serde(default, alias = "category")]
    pub category_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetBookRequest {
    #[serde(default, alias = "book", alias = "id")]
    pub book_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[serde(default, alias = "book_id")]
    pub id: String,

    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_isbn"))]
    pub isbn: Option<String>,

    #[validate(length(min = 1, max = 10))]
    pub edition: Option<String>,

    pub published_date: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,

    #[serde(alias = "author")]
    pub author_id: Option<String>,

    #[serde(alias = "category")]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveBookRequest {
    #[serde(default, alias = "id")]
    pub book_id: String,
}

// ============================================================================
// Lending Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BorrowBookRequest {
    #[serde(default)]
    pub book_id: String,

    #[serde(default)]
    pub member_id: String,

    /// Days; the configured default applies when absent
    pub borrow_duration: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnBookRequest {
    #[serde(default)]
    pub book_id: String,

    #[serde(default)]
    pub member_id: String,

    /// Whether any overdue fee was settled at the desk
    pub fee_paid: Option<bool>,
}

/// Loan listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssuedBooksRequest {
    pub member_id: Option<String>,
    pub book_id: Option<String>,
    pub returned: Option<bool>,
    pub overdue: Option<bool>,
}

/// Catalogue search; every filter is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchBookRequest {
    pub title: Option<String>,

    /// Substring of the author's first or last name
    #[serde(alias = "author_name")]
    pub author: Option<String>,

    /// Category identifier
    #[serde(alias = "category_id")]
    pub category: Option<String>,

    pub isbn: Option<String>,
}

// ============================================================================
// Audit Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TransactionsRequest {
    /// Transaction type name, e.g. `CreateMember`
    pub transaction_type: Option<String>,

    /// `Pending`, `Completed` or `Failed`
    pub state: Option<String>,

    #[validate(range(min = 1, max = 500))]
    pub limit: Option<i64>,
}
