//! API Integration Tests
//!
//! Each test starts a server over its own in-memory store. The PostgreSQL
//! smoke test at the bottom additionally needs DATABASE_URL and JWT_SECRET.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, author_body, book_body, category_body, check_test_env, member_body, Envelope,
    Seeded, TestServer,
};
use library_core::RecordId;
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["state_registry"], "seeded");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Envelope and Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_rejected_with_ok_status() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/members/get_members/", &json!({}))
        .await
        .unwrap();
    let envelope: Envelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.code, "401.000.001");
    assert!(envelope.data.is_none());
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let token = server.expired_token().unwrap();
    let response = server
        .post_auth("/api/v1/members/get_members/", &token, &json!({}))
        .await
        .unwrap();
    let envelope: Envelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.code, "401.000.002");

    let response = server
        .post_auth("/api/v1/members/get_members/", "not-a-jwt", &json!({}))
        .await
        .unwrap();
    let envelope: Envelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.code, "401.000.002");
}

#[tokio::test]
async fn test_malformed_body() {
    let server = TestServer::start().await.unwrap();
    let token = server.token().unwrap();

    let response = server
        .post_raw("/api/v1/members/create_member/", &token, "{not json")
        .await
        .unwrap();
    let envelope: Envelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.code, "500.400.001");

    let response = server
        .post_raw("/api/v1/members/create_member/", &token, "[1, 2]")
        .await
        .unwrap();
    let envelope: Envelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.code, "500.400.001");
}

#[tokio::test]
async fn test_mistyped_field_is_a_validation_error() {
    let server = TestServer::start().await.unwrap();
    let envelope = server
        .call("/books/borrow_book/", &json!({ "borrow_duration": "soon" }))
        .await
        .unwrap();
    assert_eq!(envelope.code, "500.400.005");
}

#[tokio::test]
async fn test_empty_body_reads_as_empty_object() {
    let server = TestServer::start().await.unwrap();
    let token = server.token().unwrap();
    let response = server
        .post_raw("/api/v1/base/get_states/", &token, "")
        .await
        .unwrap();
    let envelope: Envelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.code, "100.000.000");
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_member() {
    let server = TestServer::start().await.unwrap();

    let created = server
        .call("/members/create_member/", &member_body())
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(created["state_name"], "Active");
    assert_eq!(created["first_name"], "Wanjiru");
    let id = created["id"].as_str().unwrap();

    let fetched = server
        .call("/members/get_member/", &json!({ "member_id": id }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(fetched["membership_no"], created["membership_no"]);

    let listed = server
        .call("/members/get_members/", &json!({}))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_member_lookup_errors() {
    let server = TestServer::start().await.unwrap();

    let envelope = server
        .call("/members/get_members/", &json!({}))
        .await
        .unwrap();
    assert_eq!(envelope.code, "200.001.002");

    let envelope = server
        .call("/members/get_member/", &json!({ "member_id": "12" }))
        .await
        .unwrap();
    assert_eq!(envelope.code, "500.004.004");

    let envelope = server
        .call(
            "/members/get_member/",
            &json!({ "member_id": RecordId::new().to_string() }),
        )
        .await
        .unwrap();
    assert_eq!(envelope.code, "200.002.002");

    let envelope = server
        .call(
            "/members/update_member/",
            &json!({ "id": "12", "first_name": "Akinyi" }),
        )
        .await
        .unwrap();
    assert_eq!(envelope.code, "500.400.004");
}

#[tokio::test]
async fn test_invalid_member_name() {
    let server = TestServer::start().await.unwrap();
    let mut body = member_body();
    body["first_name"] = json!("R2-D2");
    let envelope = server.call("/members/create_member/", &body).await.unwrap();
    assert_eq!(envelope.code, "500.400.003");
}

#[tokio::test]
async fn test_member_status_changes() {
    let server = TestServer::start().await.unwrap();
    let id = server
        .call("/members/create_member/", &member_body())
        .await
        .unwrap()
        .into_id()
        .unwrap();
    let change = |action: &str| json!({ "id": id, "action": action });

    let envelope = server
        .call("/members/change-member-status/", &change("enable"))
        .await
        .unwrap();
    assert_eq!(envelope.code, "100.000.002");

    let disabled = server
        .call("/members/change-member-status/", &change("DISABLE"))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(disabled["state_name"], "Disabled");

    let envelope = server
        .call("/members/change-member-status/", &change("suspend"))
        .await
        .unwrap();
    assert_eq!(envelope.code, "300.300.003");

    let envelope = server
        .call("/members/change-member-status/", &change(&"x".repeat(120)))
        .await
        .unwrap();
    assert_eq!(envelope.code, "300.300.003");

    // no action means delete
    let deleted = server
        .call("/members/change-member-status/", &json!({ "id": id }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(deleted["state_name"], "Deleted");

    let envelope = server
        .call("/members/change-member-status/", &json!({ "id": id }))
        .await
        .unwrap();
    assert_eq!(envelope.code, "100.000.001");

    let types: Vec<String> = server
        .store()
        .transactions()
        .iter()
        .map(|t| t.transaction_type.clone())
        .collect();
    assert_eq!(types.iter().filter(|t| *t == "InvalidActionMember").count(), 2);
    assert!(types.contains(&"DeleteMember".to_string()));
}

async fn fetch_member(server: &TestServer, id: &str) -> Value {
    server
        .call("/members/get_member/", &json!({ "member_id": id }))
        .await
        .unwrap()
        .into_data()
        .unwrap()
}

#[tokio::test]
async fn test_update_member_round_trip() {
    let server = TestServer::start().await.unwrap();
    let id = server
        .call("/members/create_member/", &member_body())
        .await
        .unwrap()
        .into_id()
        .unwrap();
    let other = server
        .call("/members/create_member/", &member_body())
        .await
        .unwrap()
        .into_data()
        .unwrap();

    let envelope = server
        .call(
            "/members/update_member/",
            &json!({
                "id": id,
                "first_name": "Akinyi",
                "mobile_no": "0722000111",
                "membership_no": "LIB-777",
            }),
        )
        .await
        .unwrap();
    assert!(envelope.is_success());

    let fetched = fetch_member(&server, &id).await;
    assert_eq!(fetched["first_name"], "Akinyi");
    assert_eq!(fetched["last_name"], "Kamau");
    assert_eq!(fetched["mobile_no"], "0722000111");
    assert_eq!(fetched["membership_no"], "LIB-777");

    // blank leaves the number as it is
    let envelope = server
        .call(
            "/members/update_member/",
            &json!({ "id": id, "membership_no": "   " }),
        )
        .await
        .unwrap();
    assert!(envelope.is_success());
    let fetched = fetch_member(&server, &id).await;
    assert_eq!(fetched["membership_no"], "LIB-777");

    let envelope = server
        .call(
            "/members/update_member/",
            &json!({ "id": id, "membership_no": other["membership_no"] }),
        )
        .await
        .unwrap();
    assert_eq!(envelope.code, "500.400.005");
    let fetched = fetch_member(&server, &id).await;
    assert_eq!(fetched["membership_no"], "LIB-777");
}

// ============================================================================
// Catalogue Tests
// ============================================================================

#[tokio::test]
async fn test_catalogue_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let seeded = Seeded::create(&server).await.unwrap();

    let author = server
        .call("/books/get_author", &json!({ "author": seeded.author_id }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(author["salutation"], "Dr.");

    let categories = server
        .call("/books/get_categories", &json!({}))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(categories.as_array().map(Vec::len), Some(1));

    let updated = server
        .call(
            "/books/update_book/",
            &json!({ "id": seeded.book_id, "edition": "2nd" }),
        )
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(updated["edition"], "2nd");
    assert_eq!(updated["isbn"], "9780435905484");

    let deleted = server
        .call("/books/delete_book/", &json!({ "id": seeded.book_id }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(deleted["state_name"], "Deleted");

    let envelope = server.call("/books/get_books/", &json!({})).await.unwrap();
    assert_eq!(envelope.code, "200.001.002");
}

#[tokio::test]
async fn test_author_update_round_trip() {
    let server = TestServer::start().await.unwrap();
    let id = server
        .call("/books/create_author", &author_body())
        .await
        .unwrap()
        .into_id()
        .unwrap();

    let envelope = server
        .call(
            "/books/update_author",
            &json!({ "id": id, "salutation": "Prof.", "last_name": "Wa Thiongo" }),
        )
        .await
        .unwrap();
    assert!(envelope.is_success());

    let fetched = server
        .call("/books/get_author", &json!({ "author": id }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(fetched["salutation"], "Prof.");
    assert_eq!(fetched["first_name"], "Ngugi");
    assert_eq!(fetched["last_name"], "Wa Thiongo");
}

#[tokio::test]
async fn test_category_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let id = server
        .call("/books/create_category", &category_body())
        .await
        .unwrap()
        .into_id()
        .unwrap();

    let envelope = server
        .call(
            "/books/update_category",
            &json!({ "id": id, "name": "Poetry", "description": "Verse" }),
        )
        .await
        .unwrap();
    assert!(envelope.is_success());

    let fetched = server
        .call("/books/get_category", &json!({ "category": id }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(fetched["name"], "Poetry");
    assert_eq!(fetched["description"], "Verse");
    assert_eq!(fetched["state_name"], "Active");

    let envelope = server
        .call("/books/get_category", &json!({ "category": "12" }))
        .await
        .unwrap();
    assert_eq!(envelope.code, "500.004.004");

    let deleted = server
        .call("/books/delete_category", &json!({ "id": id }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(deleted["state_name"], "Deleted");

    let envelope = server
        .call("/books/update_category", &json!({ "id": id, "name": "Drama" }))
        .await
        .unwrap();
    assert_eq!(envelope.code, "100.000.001");

    let envelope = server
        .call("/books/get_categories", &json!({}))
        .await
        .unwrap();
    assert_eq!(envelope.code, "200.001.002");
}

#[tokio::test]
async fn test_book_update_round_trip() {
    let server = TestServer::start().await.unwrap();
    let seeded = Seeded::create(&server).await.unwrap();

    let envelope = server
        .call(
            "/books/update_book/",
            &json!({
                "id": seeded.book_id,
                "title": "Weep Not, Child",
                "published_date": "1964-05-01",
                "image_url": "https://covers.example.org/weep.jpg",
            }),
        )
        .await
        .unwrap();
    assert!(envelope.is_success());

    let fetched = server
        .call("/books/get_book/", &json!({ "book_id": seeded.book_id }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(fetched["title"], "Weep Not, Child");
    assert_eq!(fetched["published_date"], "1964-05-01");
    assert_eq!(fetched["image_url"], "https://covers.example.org/weep.jpg");
    assert_eq!(fetched["edition"], "1st");
    assert_eq!(fetched["author_id"], seeded.author_id.as_str());
}

#[tokio::test]
async fn test_book_requires_live_author() {
    let server = TestServer::start().await.unwrap();
    let author_id = server
        .call("/books/create_author", &author_body())
        .await
        .unwrap()
        .into_id()
        .unwrap();
    let category_id = server
        .call("/books/create_category", &category_body())
        .await
        .unwrap()
        .into_id()
        .unwrap();

    let envelope = server
        .call("/books/delete_author", &json!({ "id": author_id }))
        .await
        .unwrap();
    assert!(envelope.is_success());

    let envelope = server
        .call("/books/create_book/", &book_body(&author_id, &category_id))
        .await
        .unwrap();
    assert_eq!(envelope.code, "200.001.002");

    let envelope = server
        .call("/books/fetch_authors", &json!({}))
        .await
        .unwrap();
    assert_eq!(envelope.code, "200.001.002");
}

#[tokio::test]
async fn test_search_book() {
    let server = TestServer::start().await.unwrap();
    let seeded = Seeded::create(&server).await.unwrap();

    let found = server
        .call("/books/search_book/", &json!({ "author": "thiong" }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(found[0]["id"], seeded.book_id.as_str());

    let found = server
        .call("/books/search_book/", &json!({ "title": "no such title" }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(found.as_array().map(Vec::len), Some(0));

    let envelope = server
        .call("/books/search_book/", &json!({ "category": "fiction" }))
        .await
        .unwrap();
    assert_eq!(envelope.code, "500.004.004");
}

// ============================================================================
// Lending Tests
// ============================================================================

#[tokio::test]
async fn test_borrow_and_return_on_time() {
    let server = TestServer::start().await.unwrap();
    let seeded = Seeded::create(&server).await.unwrap();

    let loan = server
        .call("/books/borrow_book/", &seeded.loan_body())
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(loan["borrow_duration"], 14);
    assert_eq!(loan["returned"], false);

    let envelope = server
        .call("/books/borrow_book/", &seeded.loan_body())
        .await
        .unwrap();
    assert_eq!(envelope.code, "100.000.005");

    let returned = server
        .call("/books/return_book/", &seeded.loan_body())
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(returned["returned"], true);
    let fee: f64 = returned["return_fee"].as_str().unwrap().parse().unwrap();
    assert!(fee.abs() < f64::EPSILON);
    assert_eq!(returned["fee_paid"], true);

    let envelope = server
        .call("/books/return_book/", &seeded.loan_body())
        .await
        .unwrap();
    assert_eq!(envelope.code, "100.000.006");
}

#[tokio::test]
async fn test_overdue_return_charges_a_fee() {
    let server = TestServer::start().await.unwrap();
    let seeded = Seeded::create(&server).await.unwrap();

    let loan_id = server
        .call("/books/borrow_book/", &seeded.loan_body())
        .await
        .unwrap()
        .into_id()
        .unwrap();
    server
        .store()
        .backdate_loan(RecordId::parse(&loan_id).unwrap(), 20);

    let overdue = server
        .call("/books/issued_books/", &json!({ "overdue": true }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(overdue[0]["id"], loan_id.as_str());
    assert_eq!(overdue[0]["overdue"], true);

    let returned = server
        .call("/books/return_book/", &seeded.loan_body())
        .await
        .unwrap()
        .into_data()
        .unwrap();
    let fee: f64 = returned["return_fee"].as_str().unwrap().parse().unwrap();
    assert!(fee > 0.0);
    assert_eq!(returned["fee_paid"], false);
}

#[tokio::test]
async fn test_borrow_rules() {
    let server = TestServer::start().await.unwrap();
    let seeded = Seeded::create(&server).await.unwrap();

    let mut body = seeded.loan_body();
    body["borrow_duration"] = json!(90);
    let envelope = server.call("/books/borrow_book/", &body).await.unwrap();
    assert_eq!(envelope.code, "500.400.005");

    let mut body = seeded.loan_body();
    body["member_id"] = json!("abc");
    let envelope = server.call("/books/borrow_book/", &body).await.unwrap();
    assert_eq!(envelope.code, "500.400.004");

    let envelope = server
        .call(
            "/books/archive_book/",
            &json!({ "book_id": seeded.book_id }),
        )
        .await
        .unwrap();
    assert!(envelope.is_success());
    let envelope = server
        .call("/books/borrow_book/", &seeded.loan_body())
        .await
        .unwrap();
    assert_eq!(envelope.code, "100.000.005");
}

#[tokio::test]
async fn test_disabled_member_cannot_borrow() {
    let server = TestServer::start().await.unwrap();
    let seeded = Seeded::create(&server).await.unwrap();

    server
        .call(
            "/members/change-member-status/",
            &json!({ "id": seeded.member_id, "action": "disable" }),
        )
        .await
        .unwrap()
        .into_data()
        .unwrap();

    let envelope = server
        .call("/books/borrow_book/", &seeded.loan_body())
        .await
        .unwrap();
    assert_eq!(envelope.code, "100.000.007");
}

#[tokio::test]
async fn test_return_without_loan() {
    let server = TestServer::start().await.unwrap();
    let seeded = Seeded::create(&server).await.unwrap();
    let envelope = server
        .call("/books/return_book/", &seeded.loan_body())
        .await
        .unwrap();
    assert_eq!(envelope.code, "200.001.002");
}

#[tokio::test]
async fn test_borrow_fee_lookup() {
    let server = TestServer::start().await.unwrap();
    let terms = server
        .call("/books/borrow_fee_lookup/", &json!({}))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(terms["default_borrow_days"], 14);
    assert_eq!(terms["max_borrow_days"], 60);
    assert_eq!(terms["overdue_fee_per_day"], "10.00");
}

// ============================================================================
// Audit Ledger Tests
// ============================================================================

#[tokio::test]
async fn test_get_states() {
    let server = TestServer::start().await.unwrap();
    let states = server
        .call("/base/get_states/", &json!({}))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(states.as_array().map(Vec::len), Some(7));
}

#[tokio::test]
async fn test_every_transaction_is_settled() {
    let server = TestServer::start().await.unwrap();
    let seeded = Seeded::create(&server).await.unwrap();
    server
        .call("/books/borrow_book/", &seeded.loan_body())
        .await
        .unwrap();
    server
        .call("/books/borrow_book/", &seeded.loan_body())
        .await
        .unwrap();
    server
        .call("/members/update_member/", &json!({ "id": "bad" }))
        .await
        .unwrap();

    let entries = server
        .call("/base/get_transactions/", &json!({ "limit": 100 }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 7);
    assert!(entries
        .iter()
        .all(|t| t["state_name"] == "Completed" || t["state_name"] == "Failed"));

    // newest first
    assert_eq!(entries[0]["transaction_type"], "UpdateMember");
    assert_eq!(entries[0]["response_code"], "500.400.004");
    assert_eq!(entries[0]["user"], "librarian");
    assert_eq!(entries[1]["response_code"], "100.000.005");

    let failed = server
        .call("/base/get_transactions/", &json!({ "state": "failed" }))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(failed.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_ledger_records_source_ip() {
    let server = TestServer::start().await.unwrap();
    let token = server.token().unwrap();
    let response = server
        .client
        .post(format!("{}/api/v1/books/create_category", server.base_url()))
        .bearer_auth(&token)
        .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .json(&category_body())
        .send()
        .await
        .unwrap();
    let envelope: Envelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(envelope.is_success());

    let transactions = server.store().transactions();
    assert_eq!(transactions[0].source_ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(transactions[0].request["description"], "Novels and short stories");
}

// ============================================================================
// PostgreSQL
// ============================================================================

#[tokio::test]
async fn test_postgres_round_trip() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_postgres()
        .await
        .expect("Failed to start server");
    let response = server.get("/health/ready").await.unwrap();
    assert_json::<Value>(response, StatusCode::OK).await.unwrap();

    let member = server
        .call("/members/create_member/", &member_body())
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(member["state_name"], "Active");
}
