//! PostgreSQL implementation of StateRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use library_core::entities::State;
use library_core::traits::{RepoResult, StateRepository};
use library_core::StatusName;

use crate::models::StateModel;

use super::error::{into_entities, map_db_error};

/// PostgreSQL implementation of StateRepository
#[derive(Clone)]
pub struct PgStateRepository {
    pool: PgPool,
}

impl PgStateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StateRepository for PgStateRepository {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: StatusName) -> RepoResult<Option<State>> {
        let result = sqlx::query_as::<_, StateModel>(
            r"
            SELECT id, name, description, date_created, date_modified
            FROM states
            WHERE name = $1
            ",
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(State::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<State>> {
        let rows = sqlx::query_as::<_, StateModel>(
            r"
            SELECT id, name, description, date_created, date_modified
            FROM states
            ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(rows)
    }

    #[instrument(skip(self), fields(name = %state.name))]
    async fn create(&self, state: &State) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO states (id, name, description, date_created, date_modified)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO NOTHING
            ",
        )
        .bind(state.id.into_inner())
        .bind(state.name.as_str())
        .bind(&state.description)
        .bind(state.date_created)
        .bind(state.date_modified)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
