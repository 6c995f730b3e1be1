//! Audit and registry queries

use tracing::instrument;
use validator::Validate;

use library_core::traits::TransactionQuery;
use library_core::{StatusName, TransactionStatus};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::state::StateService;
use crate::dto::{StateResponse, TransactionResponse, TransactionsRequest};

pub const DEFAULT_TRANSACTION_LIMIT: i64 = 50;
pub const MAX_TRANSACTION_LIMIT: i64 = 500;

pub struct TransactionsAdministration<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TransactionsAdministration<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Recent audit records, newest first
    #[instrument(skip(self))]
    pub async fn get_transactions(
        &self,
        req: TransactionsRequest,
    ) -> ServiceResult<Vec<TransactionResponse>> {
        req.validate()?;

        let status = match req.state.as_deref() {
            Some(raw) => {
                let name = StatusName::parse(raw)
                    .ok_or_else(|| ServiceError::validation(format!("unknown state {raw}")))?;
                Some(TransactionStatus::try_from(name)?)
            }
            None => None,
        };

        let query = TransactionQuery {
            transaction_type: req.transaction_type.filter(|t| !t.trim().is_empty()),
            status,
            limit: req
                .limit
                .unwrap_or(DEFAULT_TRANSACTION_LIMIT)
                .min(MAX_TRANSACTION_LIMIT),
        };
        let transactions = self.ctx.transaction_repo().list(query).await?;
        Ok(transactions.iter().map(TransactionResponse::from).collect())
    }

    pub async fn get_states(&self) -> ServiceResult<Vec<StateResponse>> {
        let states = StateService::new(self.ctx).list().await?;
        Ok(states.iter().map(StateResponse::from).collect())
    }
}
