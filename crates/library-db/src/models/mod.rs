//! Database models
//!
//! Row shapes returned by SQLx. Stateful rows carry the joined
//! `state_name` instead of the raw `state_id`.

mod author;
mod book;
mod category;
mod loan;
mod member;
mod state;
mod transaction;

pub use author::AuthorModel;
pub use book::BookModel;
pub use category::CategoryModel;
pub use loan::LoanModel;
pub use member::MemberModel;
pub use state::StateModel;
pub use transaction::{TransactionModel, TransactionTypeModel};
