//! Service context - dependency container for services
//!
//! Holds the repositories, the JWT service and the lending configuration.

use std::sync::Arc;

use library_common::auth::JwtService;
use library_common::LibraryConfig;
use library_core::traits::{
    AuthorRepository, BookRepository, CategoryRepository, LoanRepository, MemberRepository,
    StateRepository, TransactionRepository,
};
use library_core::FeeSchedule;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every administration service borrows it for the
/// duration of a request.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    state_repo: Arc<dyn StateRepository>,
    transaction_repo: Arc<dyn TransactionRepository>,
    member_repo: Arc<dyn MemberRepository>,
    author_repo: Arc<dyn AuthorRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    book_repo: Arc<dyn BookRepository>,
    loan_repo: Arc<dyn LoanRepository>,

    // Services
    jwt_service: Arc<JwtService>,

    // Lending rules
    library: LibraryConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state_repo: Arc<dyn StateRepository>,
        transaction_repo: Arc<dyn TransactionRepository>,
        member_repo: Arc<dyn MemberRepository>,
        author_repo: Arc<dyn AuthorRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        book_repo: Arc<dyn BookRepository>,
        loan_repo: Arc<dyn LoanRepository>,
        jwt_service: Arc<JwtService>,
        library: LibraryConfig,
    ) -> Self {
        Self {
            state_repo,
            transaction_repo,
            member_repo,
            author_repo,
            category_repo,
            book_repo,
            loan_repo,
            jwt_service,
            library,
        }
    }

    // === Repositories ===

    pub fn state_repo(&self) -> &dyn StateRepository {
        self.state_repo.as_ref()
    }

    pub fn transaction_repo(&self) -> &dyn TransactionRepository {
        self.transaction_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn author_repo(&self) -> &dyn AuthorRepository {
        self.author_repo.as_ref()
    }

    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    pub fn book_repo(&self) -> &dyn BookRepository {
        self.book_repo.as_ref()
    }

    pub fn loan_repo(&self) -> &dyn LoanRepository {
        self.loan_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    // === Configuration ===

    /// Lending rules and record defaults
    pub fn library(&self) -> &LibraryConfig {
        &self.library
    }

    /// Borrowing terms derived from the configuration
    pub fn fee_schedule(&self) -> FeeSchedule {
        self.library.fee_schedule()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("library", &self.library)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    state_repo: Option<Arc<dyn StateRepository>>,
    transaction_repo: Option<Arc<dyn TransactionRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    author_repo: Option<Arc<dyn AuthorRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    book_repo: Option<Arc<dyn BookRepository>>,
    loan_repo: Option<Arc<dyn LoanRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    library: Option<LibraryConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_repo(mut self, repo: Arc<dyn StateRepository>) -> Self {
        self.state_repo = Some(repo);
        self
    }

    pub fn transaction_repo(mut self, repo: Arc<dyn TransactionRepository>) -> Self {
        self.transaction_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn author_repo(mut self, repo: Arc<dyn AuthorRepository>) -> Self {
        self.author_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn book_repo(mut self, repo: Arc<dyn BookRepository>) -> Self {
        self.book_repo = Some(repo);
        self
    }

    pub fn loan_repo(mut self, repo: Arc<dyn LoanRepository>) -> Self {
        self.loan_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Lending configuration; defaults apply when not set
    pub fn library(mut self, library: LibraryConfig) -> Self {
        self.library = Some(library);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext::new(
            required(self.state_repo, "state_repo")?,
            required(self.transaction_repo, "transaction_repo")?,
            required(self.member_repo, "member_repo")?,
            required(self.author_repo, "author_repo")?,
            required(self.category_repo, "category_repo")?,
            required(self.book_repo, "book_repo")?,
            required(self.loan_repo, "loan_repo")?,
            required(self.jwt_service, "jwt_service")?,
            self.library.unwrap_or_default(),
        ))
    }
}
