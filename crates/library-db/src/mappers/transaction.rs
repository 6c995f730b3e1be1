//! Ledger models -> entities

use library_core::{DomainError, RecordId, Transaction, TransactionType};

use super::decode_status;
use crate::models::{TransactionModel, TransactionTypeModel};

impl TryFrom<TransactionTypeModel> for TransactionType {
    type Error = DomainError;

    fn try_from(model: TransactionTypeModel) -> Result<Self, Self::Error> {
        Ok(TransactionType {
            id: RecordId::from_uuid(model.id),
            name: model.name,
            simple_name: model.simple_name,
            status: decode_status(&model.state_name)?,
            date_created: model.date_created,
            date_modified: model.date_modified,
        })
    }
}

impl TryFrom<TransactionModel> for Transaction {
    type Error = DomainError;

    fn try_from(model: TransactionModel) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: RecordId::from_uuid(model.id),
            transaction_type_id: RecordId::from_uuid(model.transaction_type_id),
            transaction_type: model.transaction_type,
            request: model.request,
            response: model.response,
            message: model.message,
            user: model.user_name,
            source_ip: model.source_ip,
            response_code: model.response_code,
            status: decode_status(&model.state_name)?,
            date_created: model.date_created,
            date_modified: model.date_modified,
        })
    }
}
