//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    AuthorRepository, BookQuery, BookRepository, CategoryRepository, LoanQuery, LoanRepository,
    MemberRepository, RepoResult, StateRepository, TransactionQuery, TransactionRepository,
};
