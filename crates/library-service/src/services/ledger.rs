//! Audit ledger
//!
//! Every mutating administration call is recorded as a [`Transaction`]:
//! opened as `Pending` before any validation, then finalized once as either
//! `Completed` or `Failed`. Ledger write failures after the operation are
//! logged and never replace the operation's own result.

use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use library_common::codes;
use library_core::{Transaction, TransactionType};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Who asked for an operation, from where, and with what payload
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub user: Option<String>,
    pub source_ip: Option<String>,
    pub request: Value,
}

impl RequestContext {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            ..Self::default()
        }
    }

    pub fn with_source_ip(mut self, source_ip: Option<String>) -> Self {
        self.source_ip = source_ip;
        self
    }

    pub fn with_request(mut self, request: Value) -> Self {
        self.request = request;
        self
    }
}

/// Writes audit transactions through the transaction repository
#[derive(Clone, Copy)]
pub struct TransactionLog<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TransactionLog<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a `Pending` transaction of type `name`, creating the type on
    /// first use. `None` when either write fails.
    #[instrument(skip(self, request), fields(user = ?request.user))]
    pub async fn log_transaction(&self, name: &str, request: &RequestContext) -> Option<Transaction> {
        let repo = self.ctx.transaction_repo();

        let transaction_type = match repo.find_type(name).await {
            Ok(Some(tt)) => tt,
            Ok(None) => {
                let tt = TransactionType::new(name);
                if let Err(e) = repo.create_type(&tt).await {
                    // a concurrent request may have created it first
                    warn!(error = %e, "Transaction type insert failed, re-reading");
                    match repo.find_type(name).await {
                        Ok(Some(existing)) => existing,
                        _ => {
                            error!(error = %e, "Could not resolve transaction type");
                            return None;
                        }
                    }
                } else {
                    tt
                }
            }
            Err(e) => {
                error!(error = %e, "Could not resolve transaction type");
                return None;
            }
        };

        let transaction = Transaction::open(
            &transaction_type,
            request.request.clone(),
            request.user.clone(),
            request.source_ip.clone(),
        );
        if let Err(e) = repo.create(&transaction).await {
            error!(error = %e, "Could not open transaction");
            return None;
        }
        debug!(transaction_id = %transaction.id, "Transaction opened");
        Some(transaction)
    }

    /// Mark a transaction `Failed`. No-op for `None` or an already
    /// finalized transaction.
    pub async fn mark_transaction_failed(
        &self,
        transaction: Option<&mut Transaction>,
        message: Option<&str>,
        response_code: Option<&str>,
        response: Option<Value>,
    ) {
        let Some(transaction) = transaction else {
            return;
        };
        let message = message.unwrap_or("Failed");
        let code = response_code.unwrap_or(codes::INTERNAL);
        if transaction.fail(message, code, response).is_err() {
            debug!(transaction_id = %transaction.id, "Transaction already finalized");
            return;
        }
        if let Err(e) = self.ctx.transaction_repo().update(transaction).await {
            error!(transaction_id = %transaction.id, error = %e, "Could not mark transaction failed");
        }
    }

    /// Mark a transaction `Completed` with the success code. No-op on an
    /// already finalized transaction.
    pub async fn complete_transaction(&self, transaction: &mut Transaction, message: &str) {
        if transaction.complete(message, codes::SUCCESS).is_err() {
            debug!(transaction_id = %transaction.id, "Transaction already finalized");
            return;
        }
        if let Err(e) = self.ctx.transaction_repo().update(transaction).await {
            error!(transaction_id = %transaction.id, error = %e, "Could not complete transaction");
        }
    }

    /// Open a transaction as a handle that must be settled
    ///
    /// # Errors
    /// `ServiceError::LedgerFailed` when the transaction could not be written
    pub async fn open(&self, name: &str, request: &RequestContext) -> ServiceResult<OpenTransaction<'a>> {
        match self.log_transaction(name, request).await {
            Some(transaction) => Ok(OpenTransaction {
                log: *self,
                transaction,
            }),
            None => Err(ServiceError::LedgerFailed(name.to_string())),
        }
    }
}

/// An opened audit transaction. Settling consumes the handle, so each
/// operation is finalized exactly once.
pub struct OpenTransaction<'a> {
    log: TransactionLog<'a>,
    transaction: Transaction,
}

impl OpenTransaction<'_> {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Finalize from the operation's outcome and hand the outcome back
    pub async fn settle<T>(mut self, result: ServiceResult<T>, success_message: &str) -> ServiceResult<T> {
        match &result {
            Ok(_) => {
                self.log
                    .complete_transaction(&mut self.transaction, success_message)
                    .await;
            }
            Err(e) => {
                let response = e.is_unexpected().then(|| Value::String(e.to_string()));
                if e.is_unexpected() {
                    error!(transaction = %self.transaction.transaction_type, error = %e, "Operation failed");
                } else {
                    warn!(transaction = %self.transaction.transaction_type, code = e.code(), error = %e, "Operation rejected");
                }
                self.log
                    .mark_transaction_failed(
                        Some(&mut self.transaction),
                        Some(&e.to_string()),
                        Some(e.code()),
                        response,
                    )
                    .await;
            }
        }
        result
    }
}
