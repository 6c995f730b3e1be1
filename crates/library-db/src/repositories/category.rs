//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use library_core::entities::Category;
use library_core::traits::{CategoryRepository, RepoResult};
use library_core::{DomainError, RecordId, StatusName};

use crate::models::CategoryModel;

use super::error::{into_entities, map_db_error};

const CATEGORY_SELECT: &str = r"
    SELECT c.id, c.name, c.description, s.name AS state_name, c.date_created, c.date_modified
    FROM categories c
    JOIN states s ON s.id = c.state_id
";

#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Category>> {
        let sql = format!("{CATEGORY_SELECT} WHERE c.id = $1");
        let result = sqlx::query_as::<_, CategoryModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Category::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_visible(&self) -> RepoResult<Vec<Category>> {
        let sql = format!("{CATEGORY_SELECT} WHERE s.name <> 'Deleted' ORDER BY c.name");
        let rows = sqlx::query_as::<_, CategoryModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }

    #[instrument(skip(self, category), fields(id = %category.id))]
    async fn create(&self, category: &Category) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO categories (id, name, description, state_id, date_created, date_modified)
            VALUES ($1, $2, $3, (SELECT id FROM states WHERE name = $4), $5, $6)
            ",
        )
        .bind(category.id.into_inner())
        .bind(&category.name)
        .bind(&category.description)
        .bind(StatusName::from(category.status).as_str())
        .bind(category.date_created)
        .bind(category.date_modified)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, category), fields(id = %category.id))]
    async fn update(&self, category: &Category) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE categories
            SET name = $2, description = $3,
                state_id = (SELECT id FROM states WHERE name = $4), date_modified = NOW()
            WHERE id = $1
            ",
        )
        .bind(category.id.into_inner())
        .bind(&category.name)
        .bind(&category.description)
        .bind(StatusName::from(category.status).as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CategoryNotFound(category.id));
        }

        Ok(())
    }
}
