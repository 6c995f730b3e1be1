//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ArchiveBookRequest, BorrowBookRequest, ChangeMemberStatusRequest, CreateAuthorRequest,
    CreateBookRequest, CreateCategoryRequest, CreateMemberRequest, DeleteRecordRequest,
    GetAuthorRequest, GetBookRequest, GetCategoryRequest, GetMemberRequest, IssuedBooksRequest,
    ReturnBookRequest, SearchBookRequest, TransactionsRequest, UpdateAuthorRequest,
    UpdateBookRequest, UpdateCategoryRequest, UpdateMemberRequest,
};

pub use responses::{
    ApiResponse, AuthorResponse, BookResponse, BorrowFeeResponse, CategoryResponse, HealthChecks,
    HealthResponse, LoanResponse, MemberResponse, ReadinessResponse, StateResponse,
    TransactionResponse,
};
