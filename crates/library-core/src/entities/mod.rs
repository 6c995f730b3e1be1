//! Domain entities - core business objects

mod author;
mod book;
mod category;
mod loan;
mod member;
mod state;
mod status;
mod transaction;

pub use author::{Author, Salutation};
pub use book::Book;
pub use category::Category;
pub use loan::Loan;
pub use member::{Gender, Member};
pub use state::State;
pub use status::{BookStatus, CatalogStatus, MemberStatus, TransactionStatus};
pub use transaction::{Transaction, TransactionType, MAX_MESSAGE_LENGTH};
