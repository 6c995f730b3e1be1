//! PostgreSQL implementation of AuthorRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use library_core::entities::Author;
use library_core::traits::{AuthorRepository, RepoResult};
use library_core::{DomainError, RecordId, StatusName};

use crate::models::AuthorModel;

use super::error::{into_entities, map_db_error};

const AUTHOR_SELECT: &str = r"
    SELECT a.id, a.salutation, a.first_name, a.last_name, a.description,
           s.name AS state_name, a.date_created, a.date_modified
    FROM authors a
    JOIN states s ON s.id = a.state_id
";

#[derive(Clone)]
pub struct PgAuthorRepository {
    pool: PgPool,
}

impl PgAuthorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Author>> {
        let sql = format!("{AUTHOR_SELECT} WHERE a.id = $1");
        let result = sqlx::query_as::<_, AuthorModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Author::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_visible(&self) -> RepoResult<Vec<Author>> {
        let sql = format!("{AUTHOR_SELECT} WHERE s.name <> 'Deleted' ORDER BY a.last_name, a.first_name");
        let rows = sqlx::query_as::<_, AuthorModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }

    #[instrument(skip(self, author), fields(id = %author.id))]
    async fn create(&self, author: &Author) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO authors (
                id, salutation, first_name, last_name, description, state_id, date_created, date_modified
            )
            VALUES ($1, $2, $3, $4, $5, (SELECT id FROM states WHERE name = $6), $7, $8)
            ",
        )
        .bind(author.id.into_inner())
        .bind(author.salutation.as_str())
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.description)
        .bind(StatusName::from(author.status).as_str())
        .bind(author.date_created)
        .bind(author.date_modified)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, author), fields(id = %author.id))]
    async fn update(&self, author: &Author) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE authors
            SET salutation = $2, first_name = $3, last_name = $4, description = $5,
                state_id = (SELECT id FROM states WHERE name = $6), date_modified = NOW()
            WHERE id = $1
            ",
        )
        .bind(author.id.into_inner())
        .bind(author.salutation.as_str())
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.description)
        .bind(StatusName::from(author.status).as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AuthorNotFound(author.id));
        }

        Ok(())
    }
}
