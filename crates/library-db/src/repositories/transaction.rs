//! PostgreSQL implementation of TransactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use library_core::entities::{Transaction, TransactionType};
use library_core::traits::{RepoResult, TransactionQuery, TransactionRepository};
use library_core::{DomainError, RecordId, StatusName};

use crate::models::{TransactionModel, TransactionTypeModel};

use super::error::{into_entities, map_db_error};

const TRANSACTION_COLUMNS: &str = r"
    t.id, t.transaction_type_id, tt.name AS transaction_type, t.request, t.response,
    t.message, t.user_name, t.source_ip, t.response_code, s.name AS state_name,
    t.date_created, t.date_modified
";

/// PostgreSQL implementation of TransactionRepository
#[derive(Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    #[instrument(skip(self))]
    async fn find_type(&self, name: &str) -> RepoResult<Option<TransactionType>> {
        let result = sqlx::query_as::<_, TransactionTypeModel>(
            r"
            SELECT tt.id, tt.name, tt.simple_name, s.name AS state_name,
                   tt.date_created, tt.date_modified
            FROM transaction_types tt
            JOIN states s ON s.id = tt.state_id
            WHERE tt.name = $1
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(TransactionType::try_from).transpose()
    }

    #[instrument(skip(self), fields(name = %transaction_type.name))]
    async fn create_type(&self, transaction_type: &TransactionType) -> RepoResult<()> {
        // a concurrent request may have registered the same type first
        sqlx::query(
            r"
            INSERT INTO transaction_types (id, name, simple_name, state_id, date_created, date_modified)
            VALUES ($1, $2, $3, (SELECT id FROM states WHERE name = $4), $5, $6)
            ON CONFLICT (name) DO NOTHING
            ",
        )
        .bind(transaction_type.id.into_inner())
        .bind(&transaction_type.name)
        .bind(&transaction_type.simple_name)
        .bind(StatusName::from(transaction_type.status).as_str())
        .bind(transaction_type.date_created)
        .bind(transaction_type.date_modified)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Transaction>> {
        let sql = format!(
            r"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions t
            JOIN transaction_types tt ON tt.id = t.transaction_type_id
            JOIN states s ON s.id = t.state_id
            WHERE t.id = $1
            "
        );
        let result = sqlx::query_as::<_, TransactionModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Transaction::try_from).transpose()
    }

    #[instrument(skip(self, transaction), fields(id = %transaction.id, kind = %transaction.transaction_type))]
    async fn create(&self, transaction: &Transaction) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO transactions (
                id, transaction_type_id, request, response, message, user_name,
                source_ip, response_code, state_id, date_created, date_modified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, (SELECT id FROM states WHERE name = $9), $10, $11)
            ",
        )
        .bind(transaction.id.into_inner())
        .bind(transaction.transaction_type_id.into_inner())
        .bind(&transaction.request)
        .bind(&transaction.response)
        .bind(&transaction.message)
        .bind(&transaction.user)
        .bind(&transaction.source_ip)
        .bind(&transaction.response_code)
        .bind(StatusName::from(transaction.status).as_str())
        .bind(transaction.date_created)
        .bind(transaction.date_modified)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, transaction), fields(id = %transaction.id))]
    async fn update(&self, transaction: &Transaction) -> RepoResult<()> {
        // only a pending row may be finalized
        let result = sqlx::query(
            r"
            UPDATE transactions
            SET response = $2, message = $3, response_code = $4,
                state_id = (SELECT id FROM states WHERE name = $5), date_modified = $6
            WHERE id = $1
              AND state_id = (SELECT id FROM states WHERE name = 'Pending')
            ",
        )
        .bind(transaction.id.into_inner())
        .bind(&transaction.response)
        .bind(&transaction.message)
        .bind(&transaction.response_code)
        .bind(StatusName::from(transaction.status).as_str())
        .bind(transaction.date_modified)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TransactionFinalized);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: TransactionQuery) -> RepoResult<Vec<Transaction>> {
        let sql = format!(
            r"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions t
            JOIN transaction_types tt ON tt.id = t.transaction_type_id
            JOIN states s ON s.id = t.state_id
            WHERE ($1::text IS NULL OR tt.name = $1)
              AND ($2::text IS NULL OR s.name = $2)
            ORDER BY t.date_created DESC
            LIMIT $3
            "
        );
        let rows = sqlx::query_as::<_, TransactionModel>(&sql)
            .bind(query.transaction_type)
            .bind(query.status.map(|s| StatusName::from(s).as_str()))
            .bind(query.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }
}
