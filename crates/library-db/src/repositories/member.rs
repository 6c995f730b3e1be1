//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use library_core::entities::Member;
use library_core::traits::{MemberRepository, RepoResult};
use library_core::{DomainError, RecordId, StatusName};

use crate::models::MemberModel;

use super::error::{into_entities, map_db_error, map_unique_violation};

const MEMBER_SELECT: &str = r"
    SELECT m.id, m.first_name, m.last_name, m.national_id, m.mobile_no, m.gender,
           m.membership_no, s.name AS state_name, m.date_created, m.date_modified
    FROM members m
    JOIN states s ON s.id = m.state_id
";

fn taken(membership_no: &str) -> DomainError {
    DomainError::ValidationError(format!("membership number {membership_no} is already taken"))
}

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Member>> {
        let sql = format!("{MEMBER_SELECT} WHERE m.id = $1");
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Member>> {
        let sql = format!("{MEMBER_SELECT} ORDER BY m.date_created DESC");
        let rows = sqlx::query_as::<_, MemberModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }

    #[instrument(skip(self, member), fields(id = %member.id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO members (
                id, first_name, last_name, national_id, mobile_no, gender,
                membership_no, state_id, date_created, date_modified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, (SELECT id FROM states WHERE name = $8), $9, $10)
            ",
        )
        .bind(member.id.into_inner())
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.national_id)
        .bind(&member.mobile_no)
        .bind(member.gender.map(|g| g.as_str()))
        .bind(&member.membership_no)
        .bind(StatusName::from(member.status).as_str())
        .bind(member.date_created)
        .bind(member.date_modified)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || taken(&member.membership_no)))?;

        Ok(())
    }

    #[instrument(skip(self, member), fields(id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE members
            SET first_name = $2, last_name = $3, national_id = $4, mobile_no = $5, gender = $6,
                state_id = (SELECT id FROM states WHERE name = $7), membership_no = $8,
                date_modified = NOW()
            WHERE id = $1
            ",
        )
        .bind(member.id.into_inner())
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.national_id)
        .bind(&member.mobile_no)
        .bind(member.gender.map(|g| g.as_str()))
        .bind(StatusName::from(member.status).as_str())
        .bind(&member.membership_no)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || taken(&member.membership_no)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(member.id));
        }

        Ok(())
    }
}
