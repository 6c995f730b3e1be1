//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in library-core.
//! Each repository handles database operations for a specific domain entity.

mod author;
mod book;
mod category;
mod error;
mod loan;
mod member;
mod state;
mod transaction;

pub use author::PgAuthorRepository;
pub use book::PgBookRepository;
pub use category::PgCategoryRepository;
pub use loan::PgLoanRepository;
pub use member::PgMemberRepository;
pub use state::PgStateRepository;
pub use transaction::PgTransactionRepository;
