//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Rows are never removed: deletion is a
//! status change persisted through `update`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Author, Book, Category, Loan, Member, State, Transaction, TransactionStatus, TransactionType,
};
use crate::error::DomainError;
use crate::value_objects::{RecordId, StatusName};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// State Repository
// ============================================================================

#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Find a registry row by name
    async fn find_by_name(&self, name: StatusName) -> RepoResult<Option<State>>;

    /// List every registry row ordered by name
    async fn list(&self) -> RepoResult<Vec<State>>;

    /// Insert a registry row; an existing row with the same name is left untouched
    async fn create(&self, state: &State) -> RepoResult<()>;
}

// ============================================================================
// Transaction Repository
// ============================================================================

/// Filters for audit queries
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub transaction_type: Option<String>,
    pub status: Option<TransactionStatus>,
    pub limit: i64,
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Find a transaction type by its unique name
    async fn find_type(&self, name: &str) -> RepoResult<Option<TransactionType>>;

    /// Create a transaction type
    async fn create_type(&self, transaction_type: &TransactionType) -> RepoResult<()>;

    /// Find transaction by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Transaction>>;

    /// Insert a newly opened transaction
    async fn create(&self, transaction: &Transaction) -> RepoResult<()>;

    /// Persist the finalized fields of a transaction
    async fn update(&self, transaction: &Transaction) -> RepoResult<()>;

    /// Recent transactions, newest first
    async fn list(&self, query: TransactionQuery) -> RepoResult<Vec<Transaction>>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Member>>;

    /// List all members regardless of state, newest first
    async fn list(&self) -> RepoResult<Vec<Member>>;

    /// Create a new member
    async fn create(&self, member: &Member) -> RepoResult<()>;

    /// Update an existing member, including its state
    async fn update(&self, member: &Member) -> RepoResult<()>;
}

// ============================================================================
// Author Repository
// ============================================================================

#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find author by ID, whatever its state
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Author>>;

    /// List authors that are not deleted
    async fn list_visible(&self) -> RepoResult<Vec<Author>>;

    async fn create(&self, author: &Author) -> RepoResult<()>;

    async fn update(&self, author: &Author) -> RepoResult<()>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find category by ID, whatever its state
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Category>>;

    /// List categories that are not deleted, ordered by name
    async fn list_visible(&self) -> RepoResult<Vec<Category>>;

    async fn create(&self, category: &Category) -> RepoResult<()>;

    async fn update(&self, category: &Category) -> RepoResult<()>;
}

// ============================================================================
// Book Repository
// ============================================================================

/// Catalogue search filters. Deleted books are never returned.
#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of the author's first or last name
    pub author_name: Option<String>,
    pub category_id: Option<RecordId>,
    pub isbn: Option<String>,
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find book by ID, whatever its state
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Book>>;

    /// Search books that are not deleted, ordered by title
    async fn search(&self, query: BookQuery) -> RepoResult<Vec<Book>>;

    async fn create(&self, book: &Book) -> RepoResult<()>;

    async fn update(&self, book: &Book) -> RepoResult<()>;
}

// ============================================================================
// Loan Repository
// ============================================================================

/// Loan listing filters
#[derive(Debug, Clone, Default)]
pub struct LoanQuery {
    pub member_id: Option<RecordId>,
    pub book_id: Option<RecordId>,
    pub returned: Option<bool>,
    /// Only open loans whose due date is before this instant
    pub overdue_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// Insert a new loan. Fails with `BookOnLoan` when the book already has
    /// an open loan.
    async fn create(&self, loan: &Loan) -> RepoResult<()>;

    /// Persist return details
    async fn update(&self, loan: &Loan) -> RepoResult<()>;

    /// The open loan of a book by a member, if any
    async fn find_open(&self, book_id: RecordId, member_id: RecordId) -> RepoResult<Option<Loan>>;

    /// Most recently issued loan of a book by a member, open or returned
    async fn find_latest(&self, book_id: RecordId, member_id: RecordId)
        -> RepoResult<Option<Loan>>;

    /// Whether the book currently has any open loan
    async fn has_open_loan(&self, book_id: RecordId) -> RepoResult<bool>;

    /// Loans matching the filters, newest first
    async fn list(&self, query: LoanQuery) -> RepoResult<Vec<Loan>>;
}
