//! Catalogue and lending administration
//!
//! Authors, categories and books are soft-deleted through state
//! transitions; listings hide deleted records. Lending is split into its
//! own module.

mod authors;
mod catalogue;
mod categories;
mod lending;

use chrono::NaiveDate;

use library_core::{Author, Book, BookStatus, CatalogStatus, Category, RecordId};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::ledger::TransactionLog;

pub struct BooksAdministration<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BooksAdministration<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn ledger(&self) -> TransactionLog<'a> {
        TransactionLog::new(self.ctx)
    }

    fn catalog_status(&self) -> ServiceResult<CatalogStatus> {
        Ok(CatalogStatus::try_from(self.ctx.library().default_state)?)
    }

    fn book_status(&self) -> ServiceResult<BookStatus> {
        Ok(BookStatus::try_from(self.ctx.library().default_state)?)
    }

    async fn load_author(&self, id: RecordId) -> ServiceResult<Author> {
        self.ctx
            .author_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Author"))
    }

    async fn load_category(&self, id: RecordId) -> ServiceResult<Category> {
        self.ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category"))
    }

    async fn load_book(&self, id: RecordId) -> ServiceResult<Book> {
        self.ctx
            .book_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Book"))
    }

    /// An author a book may reference: present and not deleted
    async fn live_author(&self, id: RecordId) -> ServiceResult<Author> {
        let author = self.load_author(id).await?;
        if author.is_deleted() {
            return Err(ServiceError::not_found("Author"));
        }
        Ok(author)
    }

    async fn live_category(&self, id: RecordId) -> ServiceResult<Category> {
        let category = self.load_category(id).await?;
        if category.is_deleted() {
            return Err(ServiceError::not_found("Category"));
        }
        Ok(category)
    }
}

/// Trimmed, with blank treated as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_published_date(raw: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ServiceError::validation("published_date must be YYYY-MM-DD"))
}
