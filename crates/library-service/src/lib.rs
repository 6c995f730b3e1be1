//! # library-service
//!
//! Application layer containing the administration use cases, the audit
//! ledger and the request/response DTOs.

pub mod dto;
pub mod services;

pub use services::{
    BooksAdministration, MembersAdministration, RequestContext, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, StateService, TransactionLog,
    TransactionsAdministration,
};
