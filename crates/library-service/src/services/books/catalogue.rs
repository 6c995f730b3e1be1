use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use library_core::traits::BookQuery;
use library_core::Book;

use super::{non_blank, parse_published_date, BooksAdministration};
use crate::dto::{
    ArchiveBookRequest, BookResponse, CreateBookRequest, DeleteRecordRequest, SearchBookRequest,
    UpdateBookRequest,
};
use crate::services::error::{parse_id, ServiceError, ServiceResult};
use crate::services::ledger::RequestContext;

impl BooksAdministration<'_> {
    /// Add a book under an existing author and category
    #[instrument(skip(self, rc, req))]
    pub async fn create_book(
        &self,
        rc: &RequestContext,
        req: CreateBookRequest,
    ) -> ServiceResult<BookResponse> {
        let tx = self.ledger().open("CreateBook", rc).await?;
        let result = self.insert_book(req).await;
        tx.settle(result, "Success").await
    }

    async fn insert_book(&self, req: CreateBookRequest) -> ServiceResult<BookResponse> {
        let author_id = parse_id(&req.author_id, "author", false)?;
        let category_id = parse_id(&req.category_id, "category", false)?;
        req.validate()?;
        let published_date = parse_published_date(&req.published_date)?;
        let title = non_blank(Some(req.title))
            .ok_or_else(|| ServiceError::validation("title is required"))?;
        let edition = non_blank(Some(req.edition))
            .ok_or_else(|| ServiceError::validation("edition is required"))?;

        self.live_author(author_id).await?;
        self.live_category(category_id).await?;

        let mut book = Book::new(
            title,
            edition,
            published_date,
            author_id,
            category_id,
            self.book_status()?,
        );
        book.isbn = non_blank(req.isbn);
        book.image_url = non_blank(req.image_url);

        self.ctx
            .book_repo()
            .create(&book)
            .await
            .map_err(ServiceError::save_failed)?;

        info!(book_id = %book.id, title = %book.title, "Book created");
        Ok(BookResponse::from(&book))
    }

    #[instrument(skip(self))]
    pub async fn get_book(&self, book_id: &str) -> ServiceResult<BookResponse> {
        let id = parse_id(book_id, "book", true)?;
        let book = self
            .ctx
            .book_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found_on_fetch("Book"))?;
        Ok(BookResponse::from(&book))
    }

    /// Every book that is not deleted
    #[instrument(skip(self))]
    pub async fn get_books(&self) -> ServiceResult<Vec<BookResponse>> {
        let books = self.ctx.book_repo().search(BookQuery::default()).await?;
        if books.is_empty() {
            return Err(ServiceError::not_found("Books"));
        }
        Ok(books.iter().map(BookResponse::from).collect())
    }

    #[instrument(skip(self, rc, req), fields(book_id = %req.id))]
    pub async fn update_book(
        &self,
        rc: &RequestContext,
        req: UpdateBookRequest,
    ) -> ServiceResult<BookResponse> {
        let tx = self.ledger().open("UpdateBook", rc).await?;
        let result = self.apply_book_update(req).await;
        tx.settle(result, "Success").await
    }

    async fn apply_book_update(&self, req: UpdateBookRequest) -> ServiceResult<BookResponse> {
        let id = parse_id(&req.id, "book", false)?;
        let mut book = self.load_book(id).await?;
        book.ensure_editable()?;
        req.validate()?;

        if let Some(raw) = req.author_id.as_deref() {
            let author_id = parse_id(raw, "author", false)?;
            book.author_id = self.live_author(author_id).await?.id;
        }
        if let Some(raw) = req.category_id.as_deref() {
            let category_id = parse_id(raw, "category", false)?;
            book.category_id = self.live_category(category_id).await?.id;
        }
        if let Some(raw) = req.published_date.as_deref() {
            book.published_date = parse_published_date(raw)?;
        }
        if let Some(title) = req.title {
            book.title =
                non_blank(Some(title)).ok_or_else(|| ServiceError::validation("title is required"))?;
        }
        if let Some(edition) = req.edition {
            book.edition = non_blank(Some(edition))
                .ok_or_else(|| ServiceError::validation("edition is required"))?;
        }
        if req.isbn.is_some() {
            book.isbn = non_blank(req.isbn);
        }
        if req.image_url.is_some() {
            book.image_url = non_blank(req.image_url);
        }
        book.date_modified = Utc::now();

        self.ctx
            .book_repo()
            .update(&book)
            .await
            .map_err(ServiceError::save_failed)?;

        info!(book_id = %book.id, "Book updated");
        Ok(BookResponse::from(&book))
    }

    /// Soft-delete a book that is not out on loan
    #[instrument(skip(self, rc, req), fields(book_id = %req.id))]
    pub async fn delete_book(
        &self,
        rc: &RequestContext,
        req: DeleteRecordRequest,
    ) -> ServiceResult<BookResponse> {
        let tx = self.ledger().open("DeleteBook", rc).await?;
        let result = self.remove_book(&req.id).await;
        tx.settle(result, "Delete book successfully").await
    }

    async fn remove_book(&self, raw_id: &str) -> ServiceResult<BookResponse> {
        let id = parse_id(raw_id, "book", false)?;
        let mut book = self.load_book(id).await?;
        let on_loan = self.ctx.loan_repo().has_open_loan(book.id).await?;
        book.delete(on_loan)?;

        self.ctx
            .book_repo()
            .update(&book)
            .await
            .map_err(ServiceError::status_change_failed)?;

        info!(book_id = %book.id, "Book deleted");
        Ok(BookResponse::from(&book))
    }

    /// Withdraw a book from lending while keeping it in the catalogue
    #[instrument(skip(self, rc, req), fields(book_id = %req.book_id))]
    pub async fn archive_book(
        &self,
        rc: &RequestContext,
        req: ArchiveBookRequest,
    ) -> ServiceResult<BookResponse> {
        let tx = self.ledger().open("ArchiveBook", rc).await?;
        let result = self.shelve_book(&req.book_id).await;
        tx.settle(result, "Archive book successfully").await
    }

    async fn shelve_book(&self, raw_id: &str) -> ServiceResult<BookResponse> {
        let id = parse_id(raw_id, "book", false)?;
        let mut book = self.load_book(id).await?;
        let on_loan = self.ctx.loan_repo().has_open_loan(book.id).await?;
        book.archive(on_loan)?;

        self.ctx
            .book_repo()
            .update(&book)
            .await
            .map_err(ServiceError::status_change_failed)?;

        info!(book_id = %book.id, "Book archived");
        Ok(BookResponse::from(&book))
    }

    /// Filter the catalogue by title, author name, category or ISBN
    #[instrument(skip(self))]
    pub async fn search_book(&self, req: SearchBookRequest) -> ServiceResult<Vec<BookResponse>> {
        let category_id = match non_blank(req.category) {
            Some(raw) => Some(parse_id(&raw, "category", true)?),
            None => None,
        };
        let query = BookQuery {
            title: non_blank(req.title),
            author_name: non_blank(req.author),
            category_id,
            isbn: non_blank(req.isbn),
        };
        let books = self.ctx.book_repo().search(query).await?;
        Ok(books.iter().map(BookResponse::from).collect())
    }
}
