//! PostgreSQL implementation of BookRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use library_core::entities::Book;
use library_core::traits::{BookQuery, BookRepository, RepoResult};
use library_core::{DomainError, RecordId, StatusName};

use crate::models::BookModel;

use super::error::{into_entities, like_pattern, map_db_error};

const BOOK_SELECT: &str = r"
    SELECT b.id, b.title, b.isbn, b.edition, b.published_date, b.image_url,
           b.author_id, b.category_id, s.name AS state_name, b.date_created, b.date_modified
    FROM books b
    JOIN states s ON s.id = b.state_id
";

/// PostgreSQL implementation of BookRepository
#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Book>> {
        let sql = format!("{BOOK_SELECT} WHERE b.id = $1");
        let result = sqlx::query_as::<_, BookModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Book::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn search(&self, query: BookQuery) -> RepoResult<Vec<Book>> {
        let sql = format!(
            r"
            {BOOK_SELECT}
            JOIN authors a ON a.id = b.author_id
            WHERE s.name <> 'Deleted'
              AND ($1::text IS NULL OR b.title ILIKE $1)
              AND ($2::text IS NULL OR a.first_name ILIKE $2 OR a.last_name ILIKE $2)
              AND ($3::uuid IS NULL OR b.category_id = $3)
              AND ($4::text IS NULL OR b.isbn = $4)
            ORDER BY b.title
            "
        );
        let rows = sqlx::query_as::<_, BookModel>(&sql)
            .bind(query.title.as_deref().map(like_pattern))
            .bind(query.author_name.as_deref().map(like_pattern))
            .bind(query.category_id.map(RecordId::into_inner))
            .bind(query.isbn.as_deref().map(str::trim))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }

    #[instrument(skip(self, book), fields(id = %book.id))]
    async fn create(&self, book: &Book) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO books (
                id, title, isbn, edition, published_date, image_url, author_id, category_id,
                state_id, date_created, date_modified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, (SELECT id FROM states WHERE name = $9), $10, $11)
            ",
        )
        .bind(book.id.into_inner())
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(&book.edition)
        .bind(book.published_date)
        .bind(&book.image_url)
        .bind(book.author_id.into_inner())
        .bind(book.category_id.into_inner())
        .bind(StatusName::from(book.status).as_str())
        .bind(book.date_created)
        .bind(book.date_modified)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, book), fields(id = %book.id))]
    async fn update(&self, book: &Book) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE books
            SET title = $2, isbn = $3, edition = $4, published_date = $5, image_url = $6,
                author_id = $7, category_id = $8,
                state_id = (SELECT id FROM states WHERE name = $9), date_modified = NOW()
            WHERE id = $1
            ",
        )
        .bind(book.id.into_inner())
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(&book.edition)
        .bind(book.published_date)
        .bind(&book.image_url)
        .bind(book.author_id.into_inner())
        .bind(book.category_id.into_inner())
        .bind(StatusName::from(book.status).as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BookNotFound(book.id));
        }

        Ok(())
    }
}
