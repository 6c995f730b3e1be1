//! In-memory repositories
//!
//! One `MemoryStore` implements every repository port so the whole service
//! stack can run without PostgreSQL. Semantics follow the SQL
//! implementations: rows are never removed, listings honour the same
//! ordering and a book can only have one open loan. Column widths and
//! unique keys of the schema are enforced as well.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use parking_lot::RwLock;

use library_common::{JwtService, LibraryConfig};
use library_core::{
    Author, AuthorRepository, Book, BookQuery, BookRepository, Category, CategoryRepository,
    DomainError, Loan, LoanQuery, LoanRepository, Member, MemberRepository, RecordId, RepoResult,
    State, StateRepository, StatusName, Transaction, TransactionQuery, TransactionRepository,
    TransactionType,
};
use library_service::{ServiceContext, ServiceContextBuilder};

/// `transaction_types.name`
const TYPE_NAME_WIDTH: usize = 200;
/// `transaction_types.simple_name`
const TYPE_SIMPLE_NAME_WIDTH: usize = 50;

#[derive(Default)]
struct Tables {
    states: RwLock<Vec<State>>,
    transaction_types: RwLock<Vec<TransactionType>>,
    transactions: RwLock<Vec<Transaction>>,
    members: RwLock<Vec<Member>>,
    authors: RwLock<Vec<Author>>,
    categories: RwLock<Vec<Category>>,
    books: RwLock<Vec<Book>>,
    loans: RwLock<Vec<Loan>>,
    fail_writes: AtomicBool,
}

/// Shared in-memory database
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every record write (not ledger or registry writes) fail as a
    /// database outage would
    pub fn fail_writes(&self, fail: bool) {
        self.tables.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> RepoResult<()> {
        if self.tables.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        Ok(())
    }

    /// Move a loan `days` into the past, keeping its duration
    pub fn backdate_loan(&self, loan_id: RecordId, days: i64) {
        let mut loans = self.tables.loans.write();
        if let Some(loan) = loans.iter_mut().find(|l| l.id == loan_id) {
            loan.issued_date -= Duration::days(days);
            loan.return_date -= Duration::days(days);
        }
    }

    /// Every ledger entry, oldest first
    pub fn transactions(&self) -> Vec<Transaction> {
        self.tables.transactions.read().clone()
    }

    pub fn loans(&self) -> Vec<Loan> {
        self.tables.loans.read().clone()
    }

    /// Wire a service context over this store
    pub fn service_context(
        &self,
        jwt_service: Arc<JwtService>,
        library: LibraryConfig,
    ) -> anyhow::Result<ServiceContext> {
        let ctx = ServiceContextBuilder::new()
            .state_repo(Arc::new(self.clone()))
            .transaction_repo(Arc::new(self.clone()))
            .member_repo(Arc::new(self.clone()))
            .author_repo(Arc::new(self.clone()))
            .category_repo(Arc::new(self.clone()))
            .book_repo(Arc::new(self.clone()))
            .loan_repo(Arc::new(self.clone()))
            .jwt_service(jwt_service)
            .library(library)
            .build()?;
        Ok(ctx)
    }
}

fn upsert<T: Clone>(rows: &RwLock<Vec<T>>, row: &T, same: impl Fn(&T) -> bool) -> RepoResult<()> {
    let mut rows = rows.write();
    match rows.iter_mut().find(|r| same(r)) {
        Some(existing) => {
            *existing = row.clone();
            Ok(())
        }
        None => Err(DomainError::DatabaseError("row vanished".to_string())),
    }
}

fn check_width(column: &str, value: &str, width: usize) -> RepoResult<()> {
    if value.chars().count() > width {
        return Err(DomainError::DatabaseError(format!(
            "value too long for {column} (varchar({width}))"
        )));
    }
    Ok(())
}

fn check_membership_no(members: &[Member], member: &Member) -> RepoResult<()> {
    if members
        .iter()
        .any(|m| m.id != member.id && m.membership_no == member.membership_no)
    {
        return Err(DomainError::ValidationError(format!(
            "membership number {} is already taken",
            member.membership_no
        )));
    }
    Ok(())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl StateRepository for MemoryStore {
    async fn find_by_name(&self, name: StatusName) -> RepoResult<Option<State>> {
        Ok(self.tables.states.read().iter().find(|s| s.name == name).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<State>> {
        let mut states = self.tables.states.read().clone();
        states.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(states)
    }

    async fn create(&self, state: &State) -> RepoResult<()> {
        let mut states = self.tables.states.write();
        if !states.iter().any(|s| s.name == state.name) {
            states.push(state.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for MemoryStore {
    async fn find_type(&self, name: &str) -> RepoResult<Option<TransactionType>> {
        Ok(self
            .tables
            .transaction_types
            .read()
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn create_type(&self, transaction_type: &TransactionType) -> RepoResult<()> {
        check_width("name", &transaction_type.name, TYPE_NAME_WIDTH)?;
        check_width("simple_name", &transaction_type.simple_name, TYPE_SIMPLE_NAME_WIDTH)?;
        let mut types = self.tables.transaction_types.write();
        if types.iter().any(|t| t.name == transaction_type.name) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate transaction type {}",
                transaction_type.name
            )));
        }
        types.push(transaction_type.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Transaction>> {
        Ok(self.tables.transactions.read().iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, transaction: &Transaction) -> RepoResult<()> {
        self.tables.transactions.write().push(transaction.clone());
        Ok(())
    }

    async fn update(&self, transaction: &Transaction) -> RepoResult<()> {
        upsert(&self.tables.transactions, transaction, |t| t.id == transaction.id)
    }

    async fn list(&self, query: TransactionQuery) -> RepoResult<Vec<Transaction>> {
        let limit = usize::try_from(query.limit).unwrap_or(0);
        Ok(self
            .tables
            .transactions
            .read()
            .iter()
            .rev()
            .filter(|t| {
                query
                    .transaction_type
                    .as_deref()
                    .map_or(true, |name| t.transaction_type == name)
            })
            .filter(|t| query.status.map_or(true, |status| t.status == status))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Member>> {
        Ok(self.tables.members.read().iter().find(|m| m.id == id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Member>> {
        Ok(self.tables.members.read().iter().rev().cloned().collect())
    }

    async fn create(&self, member: &Member) -> RepoResult<()> {
        self.check_writable()?;
        let mut members = self.tables.members.write();
        check_membership_no(&members, member)?;
        members.push(member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> RepoResult<()> {
        self.check_writable()?;
        check_membership_no(&self.tables.members.read(), member)?;
        upsert(&self.tables.members, member, |m| m.id == member.id)
    }
}

#[async_trait]
impl AuthorRepository for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Author>> {
        Ok(self.tables.authors.read().iter().find(|a| a.id == id).cloned())
    }

    async fn list_visible(&self) -> RepoResult<Vec<Author>> {
        Ok(self
            .tables
            .authors
            .read()
            .iter()
            .filter(|a| !a.is_deleted())
            .cloned()
            .collect())
    }

    async fn create(&self, author: &Author) -> RepoResult<()> {
        self.check_writable()?;
        self.tables.authors.write().push(author.clone());
        Ok(())
    }

    async fn update(&self, author: &Author) -> RepoResult<()> {
        self.check_writable()?;
        upsert(&self.tables.authors, author, |a| a.id == author.id)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Category>> {
        Ok(self.tables.categories.read().iter().find(|c| c.id == id).cloned())
    }

    async fn list_visible(&self) -> RepoResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .tables
            .categories
            .read()
            .iter()
            .filter(|c| !c.is_deleted())
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn create(&self, category: &Category) -> RepoResult<()> {
        self.check_writable()?;
        self.tables.categories.write().push(category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> RepoResult<()> {
        self.check_writable()?;
        upsert(&self.tables.categories, category, |c| c.id == category.id)
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Book>> {
        Ok(self.tables.books.read().iter().find(|b| b.id == id).cloned())
    }

    async fn search(&self, query: BookQuery) -> RepoResult<Vec<Book>> {
        let authors = self.tables.authors.read();
        let author_matches = |book: &Book, needle: &str| {
            authors.iter().any(|a| {
                a.id == book.author_id
                    && (contains_ci(&a.first_name, needle) || contains_ci(&a.last_name, needle))
            })
        };

        let mut books: Vec<Book> = self
            .tables
            .books
            .read()
            .iter()
            .filter(|b| !b.is_deleted())
            .filter(|b| query.title.as_deref().map_or(true, |t| contains_ci(&b.title, t)))
            .filter(|b| query.author_name.as_deref().map_or(true, |n| author_matches(b, n)))
            .filter(|b| query.category_id.map_or(true, |id| b.category_id == id))
            .filter(|b| {
                query
                    .isbn
                    .as_deref()
                    .map_or(true, |isbn| b.isbn.as_deref() == Some(isbn))
            })
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn create(&self, book: &Book) -> RepoResult<()> {
        self.check_writable()?;
        self.tables.books.write().push(book.clone());
        Ok(())
    }

    async fn update(&self, book: &Book) -> RepoResult<()> {
        self.check_writable()?;
        upsert(&self.tables.books, book, |b| b.id == book.id)
    }
}

#[async_trait]
impl LoanRepository for MemoryStore {
    async fn create(&self, loan: &Loan) -> RepoResult<()> {
        self.check_writable()?;
        let mut loans = self.tables.loans.write();
        if loans.iter().any(|l| l.book_id == loan.book_id && !l.returned) {
            return Err(DomainError::BookOnLoan);
        }
        loans.push(loan.clone());
        Ok(())
    }

    async fn update(&self, loan: &Loan) -> RepoResult<()> {
        self.check_writable()?;
        upsert(&self.tables.loans, loan, |l| l.id == loan.id)
    }

    async fn find_open(&self, book_id: RecordId, member_id: RecordId) -> RepoResult<Option<Loan>> {
        Ok(self
            .tables
            .loans
            .read()
            .iter()
            .find(|l| l.book_id == book_id && l.member_id == member_id && !l.returned)
            .cloned())
    }

    async fn find_latest(
        &self,
        book_id: RecordId,
        member_id: RecordId,
    ) -> RepoResult<Option<Loan>> {
        Ok(self
            .tables
            .loans
            .read()
            .iter()
            .filter(|l| l.book_id == book_id && l.member_id == member_id)
            .max_by_key(|l| l.issued_date)
            .cloned())
    }

    async fn has_open_loan(&self, book_id: RecordId) -> RepoResult<bool> {
        Ok(self
            .tables
            .loans
            .read()
            .iter()
            .any(|l| l.book_id == book_id && !l.returned))
    }

    async fn list(&self, query: LoanQuery) -> RepoResult<Vec<Loan>> {
        let mut loans: Vec<Loan> = self
            .tables
            .loans
            .read()
            .iter()
            .filter(|l| query.member_id.map_or(true, |id| l.member_id == id))
            .filter(|l| query.book_id.map_or(true, |id| l.book_id == id))
            .filter(|l| query.returned.map_or(true, |r| l.returned == r))
            .filter(|l| query.overdue_at.map_or(true, |at| l.is_overdue(at)))
            .cloned()
            .collect();
        loans.sort_by(|a, b| b.issued_date.cmp(&a.issued_date));
        Ok(loans)
    }
}
