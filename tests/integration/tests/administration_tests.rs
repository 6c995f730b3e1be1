//! Service-level flows over the in-memory store
//!
//! Run with: cargo test -p integration-tests --test administration_tests

use integration_tests::{
    author_body, book_body, category_body, member_body, memory_context, test_config, MemoryStore,
};
use library_core::{RecordId, TransactionStatus};
use library_service::dto::{BookResponse, LoanResponse, MemberResponse};
use library_service::{
    BooksAdministration, MembersAdministration, RequestContext, ServiceContext, StateService,
    TransactionsAdministration,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

struct Harness {
    store: MemoryStore,
    ctx: ServiceContext,
    rc: RequestContext,
}

impl Harness {
    async fn new() -> Self {
        let store = MemoryStore::new();
        let config = test_config().unwrap();
        let ctx = memory_context(&store, &config).await.unwrap();
        let rc = RequestContext::new("librarian").with_source_ip(Some("10.0.0.5".to_string()));
        Self { store, ctx, rc }
    }

    fn members(&self) -> MembersAdministration<'_> {
        MembersAdministration::new(&self.ctx)
    }

    fn books(&self) -> BooksAdministration<'_> {
        BooksAdministration::new(&self.ctx)
    }

    async fn member(&self) -> MemberResponse {
        self.members()
            .create_member(&self.rc, request(member_body()))
            .await
            .unwrap()
    }

    async fn book(&self) -> BookResponse {
        let author = self
            .books()
            .create_author(&self.rc, request(author_body()))
            .await
            .unwrap();
        let category = self
            .books()
            .create_category(&self.rc, request(category_body()))
            .await
            .unwrap();
        self.books()
            .create_book(
                &self.rc,
                request(book_body(&author.id.to_string(), &category.id.to_string())),
            )
            .await
            .unwrap()
    }

    async fn borrow(&self, book: &BookResponse, member: &MemberResponse) -> LoanResponse {
        self.books()
            .borrow_book(&self.rc, request(loan(book, member)))
            .await
            .unwrap()
    }
}

fn request<T: DeserializeOwned>(body: Value) -> T {
    serde_json::from_value(body).unwrap()
}

fn loan(book: &BookResponse, member: &MemberResponse) -> Value {
    json!({ "book_id": book.id.to_string(), "member_id": member.id.to_string() })
}

// ============================================================================
// Ledger
// ============================================================================

#[tokio::test]
async fn test_save_failure_is_recorded_in_ledger() {
    let h = Harness::new().await;
    h.store.fail_writes(true);

    let err = h
        .members()
        .create_member(&h.rc, request(member_body()))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "200.001.003");

    let transactions = h.store.transactions();
    let last = transactions.last().unwrap();
    assert_eq!(last.transaction_type, "CreateMember");
    assert_eq!(last.status, TransactionStatus::Failed);
    assert_eq!(last.response_code.as_deref(), Some("200.001.003"));
    assert!(last.response.is_some());
    assert_eq!(last.source_ip.as_deref(), Some("10.0.0.5"));
}

#[tokio::test]
async fn test_rejections_do_not_carry_a_response() {
    let h = Harness::new().await;
    let err = h
        .members()
        .get_member("not-an-id")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "500.004.004");

    // fetches are not audited
    assert!(h.store.transactions().is_empty());

    let err = h
        .members()
        .update_member(&h.rc, request(json!({ "id": "not-an-id" })))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "500.400.004");

    let transactions = h.store.transactions();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].status, TransactionStatus::Failed);
    assert!(transactions[0].response.is_none());
}

#[tokio::test]
async fn test_transaction_types_are_reused() {
    let h = Harness::new().await;
    h.member().await;
    h.member().await;

    let transactions = h.store.transactions();
    assert_eq!(transactions.len(), 2);
    assert_eq!(
        transactions[0].transaction_type_id,
        transactions[1].transaction_type_id
    );
    assert!(transactions
        .iter()
        .all(|t| t.status == TransactionStatus::Completed));
}

#[tokio::test]
async fn test_get_transactions_filters() {
    let h = Harness::new().await;
    h.member().await;
    h.book().await;

    let audit = TransactionsAdministration::new(&h.ctx);
    let recent = audit
        .get_transactions(request(json!({ "limit": 2 })))
        .await
        .unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].transaction_type, "CreateBook");

    let members = audit
        .get_transactions(request(json!({ "transaction_type": "CreateMember" })))
        .await
        .unwrap();
    assert_eq!(members.len(), 1);

    let err = audit
        .get_transactions(request(json!({ "state": "Archived" })))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "500.400.005");

    let err = audit
        .get_transactions(request(json!({ "limit": 0 })))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "500.400.005");
}

#[tokio::test]
async fn test_state_registry_is_seeded_once() {
    let h = Harness::new().await;
    let states = StateService::new(&h.ctx);
    assert!(states.is_seeded().await.unwrap());

    let again = states.ensure_registry().await.unwrap();
    assert_eq!(again.len(), 7);
    assert_eq!(states.list().await.unwrap().len(), 7);
}

// ============================================================================
// Members
// ============================================================================

#[tokio::test]
async fn test_status_change_failure() {
    let h = Harness::new().await;
    let member = h.member().await;
    h.store.fail_writes(true);

    let err = h
        .members()
        .change_member_status(
            &h.rc,
            request(json!({ "id": member.id.to_string(), "action": "disable" })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "200.001.007");
}

#[tokio::test]
async fn test_member_status_leaves_loans_open() {
    let h = Harness::new().await;
    let member = h.member().await;
    let book = h.book().await;
    h.borrow(&book, &member).await;

    h.members()
        .change_member_status(&h.rc, request(json!({ "id": member.id.to_string() })))
        .await
        .unwrap();

    let loans = h.store.loans();
    assert_eq!(loans.len(), 1);
    assert!(!loans[0].returned);

    // a deleted member can still bring the book back
    let returned = h
        .books()
        .return_book(&h.rc, request(loan(&book, &member)))
        .await
        .unwrap();
    assert!(returned.returned);
}

#[tokio::test]
async fn test_unknown_member_on_status_change() {
    let h = Harness::new().await;
    let err = h
        .members()
        .change_member_status(
            &h.rc,
            request(json!({ "id": RecordId::new().to_string(), "action": "suspend" })),
        )
        .await
        .unwrap_err();
    // the member is looked up before the action is judged
    assert_eq!(err.code(), "200.001.002");
}

#[tokio::test]
async fn test_unknown_actions_share_one_audit_type() {
    let h = Harness::new().await;
    let member = h.member().await;
    let long_action = "a".repeat(80);

    for action in ["suspend", long_action.as_str()] {
        let body = json!({ "id": member.id.to_string(), "action": action });
        let rc = h.rc.clone().with_request(body.clone());
        let err = h
            .members()
            .change_member_status(&rc, request(body))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "300.300.003");
    }

    let rejected: Vec<_> = h
        .store
        .transactions()
        .into_iter()
        .filter(|t| t.transaction_type == "InvalidActionMember")
        .collect();
    assert_eq!(rejected.len(), 2);
    assert_eq!(rejected[1].request["action"], long_action.as_str());
    assert_eq!(rejected[1].status, TransactionStatus::Failed);
}

#[tokio::test]
async fn test_update_member_keeps_membership_numbers_unique() {
    let h = Harness::new().await;
    let first = h.member().await;
    let second = h.member().await;

    let updated = h
        .members()
        .update_member(
            &h.rc,
            request(json!({ "id": first.id.to_string(), "membership_no": " LIB-900 " })),
        )
        .await
        .unwrap();
    assert_eq!(updated.membership_no, "LIB-900");

    let err = h
        .members()
        .update_member(
            &h.rc,
            request(json!({ "id": second.id.to_string(), "membership_no": "LIB-900" })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "500.400.005");

    let stored = h.members().get_member(&second.id.to_string()).await.unwrap();
    assert_eq!(stored.membership_no, second.membership_no);
}

// ============================================================================
// Catalogue
// ============================================================================

#[tokio::test]
async fn test_deleted_author_cannot_be_updated() {
    let h = Harness::new().await;
    let author = h
        .books()
        .create_author(&h.rc, request(author_body()))
        .await
        .unwrap();
    let id = author.id.to_string();

    h.books()
        .delete_author(&h.rc, request(json!({ "id": id })))
        .await
        .unwrap();

    let err = h
        .books()
        .update_author(&h.rc, request(json!({ "id": id, "first_name": "James" })))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "100.000.001");

    // still retrievable by id
    let fetched = h.books().get_author(&id).await.unwrap();
    assert_eq!(fetched.state_name.as_str(), "Deleted");
}

#[tokio::test]
async fn test_book_on_loan_cannot_be_removed() {
    let h = Harness::new().await;
    let member = h.member().await;
    let book = h.book().await;
    h.borrow(&book, &member).await;
    let id = book.id.to_string();

    let err = h
        .books()
        .delete_book(&h.rc, request(json!({ "id": id })))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "100.000.005");

    let err = h
        .books()
        .archive_book(&h.rc, request(json!({ "book_id": id })))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "100.000.005");
}

#[tokio::test]
async fn test_archive_twice() {
    let h = Harness::new().await;
    let book = h.book().await;
    let body = json!({ "book_id": book.id.to_string() });

    let archived = h.books().archive_book(&h.rc, request(body.clone())).await.unwrap();
    assert_eq!(archived.state_name.as_str(), "Archived");

    let err = h.books().archive_book(&h.rc, request(body)).await.unwrap_err();
    assert_eq!(err.code(), "100.000.004");

    // archived books stay in the catalogue
    assert_eq!(h.books().get_books().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_by_category() {
    let h = Harness::new().await;
    let book = h.book().await;
    h.book().await;

    let found = h
        .books()
        .search_book(request(json!({ "category": book.category_id.to_string() })))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, book.id);

    let found = h
        .books()
        .search_book(request(json!({ "isbn": "9780435905484" })))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
}

// ============================================================================
// Lending
// ============================================================================

#[tokio::test]
async fn test_issued_books_filters() {
    let h = Harness::new().await;
    let member = h.member().await;
    let late_book = h.book().await;
    let fresh_book = h.book().await;

    let late = h.borrow(&late_book, &member).await;
    let fresh = h.borrow(&fresh_book, &member).await;
    h.store.backdate_loan(late.id, 30);

    let on_time = h
        .books()
        .issued_books(request(json!({ "overdue": false })))
        .await
        .unwrap();
    assert_eq!(on_time.len(), 1);
    assert_eq!(on_time[0].id, fresh.id);

    let overdue = h
        .books()
        .issued_books(request(json!({ "overdue": true })))
        .await
        .unwrap();
    assert_eq!(overdue.len(), 1);
    assert!(overdue[0].fee_due > Decimal::ZERO);

    let by_book = h
        .books()
        .issued_books(request(json!({ "book_id": late_book.id.to_string() })))
        .await
        .unwrap();
    assert_eq!(by_book.len(), 1);

    let none = h
        .books()
        .issued_books(request(json!({ "returned": true })))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_overdue_fee_paid_on_return() {
    let h = Harness::new().await;
    let member = h.member().await;
    let book = h.book().await;
    let issued = h.borrow(&book, &member).await;
    assert_eq!(issued.borrow_duration, 14);
    h.store.backdate_loan(issued.id, 20);

    let mut body = loan(&book, &member);
    body["fee_paid"] = json!(true);
    let returned = h.books().return_book(&h.rc, request(body)).await.unwrap();
    assert!(returned.return_fee >= dec!(60.00));
    assert!(returned.fee_paid);

    // the book can be lent again
    h.borrow(&book, &member).await;
}

#[tokio::test]
async fn test_custom_borrow_duration() {
    let h = Harness::new().await;
    let member = h.member().await;
    let book = h.book().await;

    let mut body = loan(&book, &member);
    body["borrow_duration"] = json!(3);
    let issued = h.books().borrow_book(&h.rc, request(body)).await.unwrap();
    assert_eq!(issued.borrow_duration, 3);
    assert_eq!((issued.return_date - issued.issued_date).num_days(), 3);

    let mut body = loan(&book, &member);
    body["borrow_duration"] = json!(0);
    let err = h.books().borrow_book(&h.rc, request(body)).await.unwrap_err();
    assert_eq!(err.code(), "500.400.005");
}

#[tokio::test]
async fn test_borrow_unknown_book() {
    let h = Harness::new().await;
    let member = h.member().await;
    let body = json!({ "book_id": RecordId::new().to_string(), "member_id": member.id.to_string() });
    let err = h.books().borrow_book(&h.rc, request(body)).await.unwrap_err();
    assert_eq!(err.code(), "200.001.002");
}

#[tokio::test]
async fn test_borrow_fee_lookup() {
    let h = Harness::new().await;
    let terms = h.books().borrow_fee_lookup();
    assert_eq!(terms.overdue_fee_per_day, dec!(10.00));
    assert_eq!(terms.currency, "KES");
}
