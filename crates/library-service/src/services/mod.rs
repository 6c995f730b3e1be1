//! Administration services
//!
//! Each mutating use case runs inside an audit transaction opened through
//! [`TransactionLog`]: open, validate, mutate, then settle exactly once.

pub mod books;
pub mod context;
pub mod error;
pub mod ledger;
pub mod members;
pub mod state;
pub mod transactions;

pub use books::BooksAdministration;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use ledger::{OpenTransaction, RequestContext, TransactionLog};
pub use members::{MemberAction, MembersAdministration};
pub use state::StateService;
pub use transactions::TransactionsAdministration;
