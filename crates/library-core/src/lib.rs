//! # library-core
//!
//! Domain layer containing entities, the state vocabulary, value objects and
//! repository traits. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Author, Book, BookStatus, CatalogStatus, Category, Gender, Loan, Member, MemberStatus,
    Salutation, State, Transaction, TransactionStatus, TransactionType,
};
pub use error::DomainError;
pub use traits::{
    AuthorRepository, BookQuery, BookRepository, CategoryRepository, LoanQuery, LoanRepository,
    MemberRepository, RepoResult, StateRepository, TransactionQuery, TransactionRepository,
};
pub use value_objects::{FeeSchedule, RecordId, RecordIdParseError, StatusName};
