//! Route definitions
//!
//! Every operation is a `POST` under `/api/v1`, grouped by area.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{base, books, health, members};
use crate::state::AppState;

/// Create the main API router (health checks are merged separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Liveness and readiness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(member_routes())
        .merge(author_routes())
        .merge(category_routes())
        .merge(book_routes())
        .merge(base_routes())
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members/create_member/", post(members::create_member))
        .route("/members/get_member/", post(members::get_member))
        .route("/members/get_members/", post(members::get_members))
        .route("/members/update_member/", post(members::update_member))
        .route(
            "/members/change-member-status/",
            post(members::change_member_status),
        )
}

fn author_routes() -> Router<AppState> {
    Router::new()
        .route("/books/create_author", post(books::create_author))
        .route("/books/get_author", post(books::get_author))
        .route("/books/fetch_authors", post(books::fetch_authors))
        .route("/books/update_author", post(books::update_author))
        .route("/books/delete_author", post(books::delete_author))
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/books/create_category", post(books::create_category))
        .route("/books/get_category", post(books::get_category))
        .route("/books/get_categories", post(books::get_categories))
        .route("/books/update_category", post(books::update_category))
        .route("/books/delete_category", post(books::delete_category))
}

/// Catalogue, lending and search routes
fn book_routes() -> Router<AppState> {
    Router::new()
        // Catalogue
        .route("/books/create_book/", post(books::create_book))
        .route("/books/get_book/", post(books::get_book))
        .route("/books/get_books/", post(books::get_books))
        .route("/books/update_book/", post(books::update_book))
        .route("/books/delete_book/", post(books::delete_book))
        .route("/books/archive_book/", post(books::archive_book))
        .route("/books/search_book/", post(books::search_book))
        // Lending
        .route("/books/borrow_book/", post(books::borrow_book))
        .route("/books/return_book/", post(books::return_book))
        .route("/books/issued_books/", post(books::issued_books))
        .route("/books/borrow_fee_lookup/", post(books::borrow_fee_lookup))
}

/// Reference data and audit ledger
fn base_routes() -> Router<AppState> {
    Router::new()
        .route("/base/get_states/", post(base::get_states))
        .route("/base/get_transactions/", post(base::get_transactions))
}
