//! Test fixtures and data generators
//!
//! Request bodies for the API and a helper that seeds a member, an author,
//! a category and a book.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use serde_json::{json, Value};

use crate::helpers::TestServer;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub fn member_body() -> Value {
    let suffix = unique_suffix();
    json!({
        "first_name": "Wanjiru",
        "last_name": "Kamau",
        "national_id": format!("{:08}", 30_000_000 + suffix),
        "mobile_no": "0712345678",
        "gender": "F",
    })
}

pub fn author_body() -> Value {
    json!({
        "salutation": "Dr.",
        "first_name": "Ngugi",
        "last_name": "Thiongo",
        "description": "Novelist",
    })
}

pub fn category_body() -> Value {
    json!({
        "name": format!("Fiction {}", unique_suffix()),
        "description": "Novels and short stories",
    })
}

pub fn book_body(author_id: &str, category_id: &str) -> Value {
    json!({
        "title": format!("The River Between {}", unique_suffix()),
        "isbn": "9780435905484",
        "edition": "1st",
        "published_date": "1965-01-01",
        "author_id": author_id,
        "category_id": category_id,
    })
}

/// Identifiers of a freshly seeded lending scenario
#[derive(Debug, Clone)]
pub struct Seeded {
    pub member_id: String,
    pub author_id: String,
    pub category_id: String,
    pub book_id: String,
}

impl Seeded {
    /// Create one member and one lendable book through the API
    pub async fn create(server: &TestServer) -> Result<Self> {
        let member_id = server
            .call("/members/create_member/", &member_body())
            .await?
            .into_id()?;
        let author_id = server
            .call("/books/create_author", &author_body())
            .await?
            .into_id()?;
        let category_id = server
            .call("/books/create_category", &category_body())
            .await?
            .into_id()?;
        let book_id = server
            .call("/books/create_book/", &book_body(&author_id, &category_id))
            .await?
            .into_id()?;

        Ok(Self {
            member_id,
            author_id,
            category_id,
            book_id,
        })
    }

    /// Body naming this member and book
    pub fn loan_body(&self) -> Value {
        json!({ "book_id": self.book_id, "member_id": self.member_id })
    }
}
