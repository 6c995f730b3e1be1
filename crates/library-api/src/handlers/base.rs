//! Registry and audit handlers
//!
//! Endpoints under `/api/v1/base`.

use axum::extract::State;
use library_service::dto::{StateResponse, TransactionResponse, TransactionsRequest};
use library_service::TransactionsAdministration;
use serde_json::Value;

use crate::extractors::{AuthUser, JsonBody};
use crate::response::{success, ApiResult, Envelope};
use crate::state::AppState;

/// POST /base/get_states/
pub async fn get_states(
    State(state): State<AppState>,
    _auth: AuthUser,
    _body: JsonBody<Value>,
) -> ApiResult<Envelope<Vec<StateResponse>>> {
    let states = TransactionsAdministration::new(state.service_context())
        .get_states()
        .await?;
    Ok(success(states))
}

/// POST /base/get_transactions/
pub async fn get_transactions(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody { body, .. }: JsonBody<TransactionsRequest>,
) -> ApiResult<Envelope<Vec<TransactionResponse>>> {
    let transactions = TransactionsAdministration::new(state.service_context())
        .get_transactions(body)
        .await?;
    Ok(success(transactions))
}
