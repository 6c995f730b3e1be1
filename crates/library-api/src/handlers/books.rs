//! Catalogue and lending handlers
//!
//! Endpoints under `/api/v1/books`.

use axum::extract::State;
use library_service::dto::{
    ArchiveBookRequest, AuthorResponse, BookResponse, BorrowBookRequest, BorrowFeeResponse,
    CategoryResponse, CreateAuthorRequest, CreateBookRequest, CreateCategoryRequest,
    DeleteRecordRequest, GetAuthorRequest, GetBookRequest, GetCategoryRequest,
    IssuedBooksRequest, LoanResponse, ReturnBookRequest, SearchBookRequest, UpdateAuthorRequest,
    UpdateBookRequest, UpdateCategoryRequest,
};
use library_service::BooksAdministration;
use serde_json::Value;

use super::request_context;
use crate::extractors::{AuthUser, ClientIp, JsonBody};
use crate::response::{success, ApiResult, Envelope};
use crate::state::AppState;

// ============================================================================
// Authors
// ============================================================================

/// POST /books/create_author
pub async fn create_author(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<CreateAuthorRequest>,
) -> ApiResult<Envelope<AuthorResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .create_author(&rc, body)
        .await?;
    Ok(success(data))
}

/// POST /books/get_author
pub async fn get_author(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody { body, .. }: JsonBody<GetAuthorRequest>,
) -> ApiResult<Envelope<AuthorResponse>> {
    let data = BooksAdministration::new(state.service_context())
        .get_author(&body.author)
        .await?;
    Ok(success(data))
}

/// POST /books/fetch_authors
pub async fn fetch_authors(
    State(state): State<AppState>,
    _auth: AuthUser,
    _body: JsonBody<Value>,
) -> ApiResult<Envelope<Vec<AuthorResponse>>> {
    let data = BooksAdministration::new(state.service_context())
        .get_authors()
        .await?;
    Ok(success(data))
}

/// POST /books/update_author
pub async fn update_author(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<UpdateAuthorRequest>,
) -> ApiResult<Envelope<AuthorResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .update_author(&rc, body)
        .await?;
    Ok(success(data))
}

/// POST /books/delete_author
pub async fn delete_author(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<DeleteRecordRequest>,
) -> ApiResult<Envelope<AuthorResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .delete_author(&rc, body)
        .await?;
    Ok(success(data))
}

// ============================================================================
// Categories
// ============================================================================

/// POST /books/create_category
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<CreateCategoryRequest>,
) -> ApiResult<Envelope<CategoryResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .create_category(&rc, body)
        .await?;
    Ok(success(data))
}

/// POST /books/get_category
pub async fn get_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody { body, .. }: JsonBody<GetCategoryRequest>,
) -> ApiResult<Envelope<CategoryResponse>> {
    let data = BooksAdministration::new(state.service_context())
        .get_category(&body.category)
        .await?;
    Ok(success(data))
}

/// POST /books/get_categories
pub async fn get_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
    _body: JsonBody<Value>,
) -> ApiResult<Envelope<Vec<CategoryResponse>>> {
    let data = BooksAdministration::new(state.service_context())
        .get_categories()
        .await?;
    Ok(success(data))
}

/// POST /books/update_category
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<UpdateCategoryRequest>,
) -> ApiResult<Envelope<CategoryResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .update_category(&rc, body)
        .await?;
    Ok(success(data))
}

/// POST /books/delete_category
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<DeleteRecordRequest>,
) -> ApiResult<Envelope<CategoryResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .delete_category(&rc, body)
        .await?;
    Ok(success(data))
}

// ============================================================================
// Books
// ============================================================================

/// POST /books/create_book/
pub async fn create_book(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<CreateBookRequest>,
) -> ApiResult<Envelope<BookResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .create_book(&rc, body)
        .await?;
    Ok(success(data))
}

/// POST /books/get_book/
pub async fn get_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody { body, .. }: JsonBody<GetBookRequest>,
) -> ApiResult<Envelope<BookResponse>> {
    let data = BooksAdministration::new(state.service_context())
        .get_book(&body.book_id)
        .await?;
    Ok(success(data))
}

/// POST /books/get_books/
pub async fn get_books(
    State(state): State<AppState>,
    _auth: AuthUser,
    _body: JsonBody<Value>,
) -> ApiResult<Envelope<Vec<BookResponse>>> {
    let data = BooksAdministration::new(state.service_context())
        .get_books()
        .await?;
    Ok(success(data))
}

/// POST /books/update_book/
pub async fn update_book(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<UpdateBookRequest>,
) -> ApiResult<Envelope<BookResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .update_book(&rc, body)
        .await?;
    Ok(success(data))
}

/// POST /books/delete_book/
pub async fn delete_book(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<DeleteRecordRequest>,
) -> ApiResult<Envelope<BookResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .delete_book(&rc, body)
        .await?;
    Ok(success(data))
}

/// POST /books/archive_book/
pub async fn archive_book(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<ArchiveBookRequest>,
) -> ApiResult<Envelope<BookResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .archive_book(&rc, body)
        .await?;
    Ok(success(data))
}

/// POST /books/search_book/
pub async fn search_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody { body, .. }: JsonBody<SearchBookRequest>,
) -> ApiResult<Envelope<Vec<BookResponse>>> {
    let data = BooksAdministration::new(state.service_context())
        .search_book(body)
        .await?;
    Ok(success(data))
}

// ============================================================================
// Lending
// ============================================================================

/// POST /books/borrow_book/
pub async fn borrow_book(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<BorrowBookRequest>,
) -> ApiResult<Envelope<LoanResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .borrow_book(&rc, body)
        .await?;
    Ok(success(data))
}

/// POST /books/return_book/
pub async fn return_book(
    State(state): State<AppState>,
    auth: AuthUser,
    ip: ClientIp,
    JsonBody { body, raw }: JsonBody<ReturnBookRequest>,
) -> ApiResult<Envelope<LoanResponse>> {
    let rc = request_context(&auth, ip, raw);
    let data = BooksAdministration::new(state.service_context())
        .return_book(&rc, body)
        .await?;
    Ok(success(data))
}

/// POST /books/issued_books/
pub async fn issued_books(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody { body, .. }: JsonBody<IssuedBooksRequest>,
) -> ApiResult<Envelope<Vec<LoanResponse>>> {
    let data = BooksAdministration::new(state.service_context())
        .issued_books(body)
        .await?;
    Ok(success(data))
}

/// POST /books/borrow_fee_lookup/
pub async fn borrow_fee_lookup(
    State(state): State<AppState>,
    _auth: AuthUser,
    _body: JsonBody<Value>,
) -> ApiResult<Envelope<BorrowFeeResponse>> {
    let terms = BooksAdministration::new(state.service_context()).borrow_fee_lookup();
    Ok(success(terms))
}
