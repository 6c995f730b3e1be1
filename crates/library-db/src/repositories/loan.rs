//! PostgreSQL implementation of LoanRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use library_core::entities::Loan;
use library_core::traits::{LoanQuery, LoanRepository, RepoResult};
use library_core::{DomainError, RecordId};

use crate::mappers::borrow_duration_column;
use crate::models::LoanModel;

use super::error::{into_entities, map_db_error, map_unique_violation};

const LOAN_SELECT: &str = r"
    SELECT id, book_id, member_id, issued_date, borrow_duration, return_date,
           returned_at, return_fee, fee_paid, returned
    FROM book_issued
";

/// PostgreSQL implementation of LoanRepository
#[derive(Clone)]
pub struct PgLoanRepository {
    pool: PgPool,
}

impl PgLoanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanRepository for PgLoanRepository {
    #[instrument(skip(self, loan), fields(book_id = %loan.book_id, member_id = %loan.member_id))]
    async fn create(&self, loan: &Loan) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO book_issued (
                id, book_id, member_id, issued_date, borrow_duration, return_date,
                returned_at, return_fee, fee_paid, returned
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(loan.id.into_inner())
        .bind(loan.book_id.into_inner())
        .bind(loan.member_id.into_inner())
        .bind(loan.issued_date)
        .bind(borrow_duration_column(loan)?)
        .bind(loan.return_date)
        .bind(loan.returned_at)
        .bind(loan.return_fee)
        .bind(loan.fee_paid)
        .bind(loan.returned)
        .execute(&self.pool)
        .await
        // uq_book_issued_open: the book already has an open loan
        .map_err(|e| map_unique_violation(e, || DomainError::BookOnLoan))?;

        Ok(())
    }

    #[instrument(skip(self, loan), fields(id = %loan.id))]
    async fn update(&self, loan: &Loan) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE book_issued
            SET returned_at = $2, return_fee = $3, fee_paid = $4, returned = $5
            WHERE id = $1
            ",
        )
        .bind(loan.id.into_inner())
        .bind(loan.returned_at)
        .bind(loan.return_fee)
        .bind(loan.fee_paid)
        .bind(loan.returned)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LoanNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_open(&self, book_id: RecordId, member_id: RecordId) -> RepoResult<Option<Loan>> {
        let sql = format!("{LOAN_SELECT} WHERE book_id = $1 AND member_id = $2 AND NOT returned");
        let result = sqlx::query_as::<_, LoanModel>(&sql)
            .bind(book_id.into_inner())
            .bind(member_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Loan::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_latest(
        &self,
        book_id: RecordId,
        member_id: RecordId,
    ) -> RepoResult<Option<Loan>> {
        let sql = format!(
            "{LOAN_SELECT} WHERE book_id = $1 AND member_id = $2 ORDER BY issued_date DESC LIMIT 1"
        );
        let result = sqlx::query_as::<_, LoanModel>(&sql)
            .bind(book_id.into_inner())
            .bind(member_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Loan::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn has_open_loan(&self, book_id: RecordId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM book_issued WHERE book_id = $1 AND NOT returned)
            ",
        )
        .bind(book_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: LoanQuery) -> RepoResult<Vec<Loan>> {
        let sql = format!(
            r"
            {LOAN_SELECT}
            WHERE ($1::uuid IS NULL OR member_id = $1)
              AND ($2::uuid IS NULL OR book_id = $2)
              AND ($3::bool IS NULL OR returned = $3)
              AND ($4::timestamptz IS NULL OR (NOT returned AND return_date < $4))
            ORDER BY issued_date DESC
            "
        );
        let rows = sqlx::query_as::<_, LoanModel>(&sql)
            .bind(query.member_id.map(RecordId::into_inner))
            .bind(query.book_id.map(RecordId::into_inner))
            .bind(query.returned)
            .bind(query.overdue_at)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }
}
