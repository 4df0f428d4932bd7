//! API integration tests
//!
//! These run against a live server with a freshly migrated database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

/// Create a book with the given stock, returning its id
async fn create_book(client: &Client, title: &str, stock: i32) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "author": "Test Author",
            "isbn": "978-0-00-000000-0",
            "stock": stock
        }))
        .send()
        .await
        .expect("Failed to create book");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_duplicate_username() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users/register", BASE_URL))
        .json(&json!({
            "username": "it_register",
            "password": "password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    // role/status defaults, hash never echoed
    assert_eq!(body["role"], "student");
    assert_eq!(body["status"], "active");
    assert!(body.get("password").is_none());

    // Same username again must be rejected
    let response = client
        .post(format!("{}/users/register", BASE_URL))
        .json(&json!({
            "username": "it_register",
            "password": "other"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "DuplicateUsername");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let _ = client
        .post(format!("{}/users/register", BASE_URL))
        .json(&json!({ "username": "it_login", "password": "s3cret" }))
        .send()
        .await;

    let response = client
        .post(format!("{}/users/login", BASE_URL))
        .json(&json!({ "username": "it_login", "password": "s3cret" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["user_id"].is_number());
    assert_eq!(body["username"], "it_login");
    assert_eq!(body["role"], "student");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let _ = client
        .post(format!("{}/users/register", BASE_URL))
        .json(&json!({ "username": "it_badpw", "password": "right" }))
        .send()
        .await;

    // Wrong password and unknown user give the same answer
    for payload in [
        json!({ "username": "it_badpw", "password": "wrong" }),
        json!({ "username": "it_no_such_user", "password": "whatever" }),
    ] {
        let response = client
            .post(format!("{}/users/login", BASE_URL))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[tokio::test]
#[ignore]
async fn test_borrow_until_out_of_stock() {
    let client = Client::new();

    let _ = client
        .post(format!("{}/users/register", BASE_URL))
        .json(&json!({ "username": "it_borrower", "password": "password" }))
        .send()
        .await;
    let book_id = create_book(&client, "Single Copy", 1).await;

    // First borrow succeeds and empties the shelf
    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({ "username": "it_borrower", "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["return_date"].is_null());

    let response = client
        .get(format!("{}/books/{}/stock", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let stock: i32 = response.json().await.expect("Failed to parse stock");
    assert_eq!(stock, 0);

    // Second borrow of the same book must fail, stock stays at 0
    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({ "username": "it_borrower", "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BookNotAvailable");

    let response = client
        .get(format!("{}/books/{}/stock", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let stock: i32 = response.json().await.expect("Failed to parse stock");
    assert_eq!(stock, 0);
}

#[tokio::test]
#[ignore]
async fn test_return_and_double_return() {
    let client = Client::new();

    let _ = client
        .post(format!("{}/users/register", BASE_URL))
        .json(&json!({ "username": "it_returner", "password": "password" }))
        .send()
        .await;
    let book_id = create_book(&client, "Returnable", 2).await;

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({ "username": "it_returner", "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let borrowing_id = body["id"].as_i64().expect("No borrowing ID");

    // Return: closes the record with zero fine, stock goes back up
    let response = client
        .post(format!("{}/return?borrowing_id={}", BASE_URL, borrowing_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["return_date"].is_string());
    let fine: f64 = body["fine"]
        .as_str()
        .expect("fine serializes as a decimal string")
        .parse()
        .expect("fine parses as a number");
    assert_eq!(fine, 0.0);

    let response = client
        .get(format!("{}/books/{}/stock", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let stock: i32 = response.json().await.expect("Failed to parse stock");
    assert_eq!(stock, 2);

    // Second return of the same borrowing is rejected
    let response = client
        .post(format!("{}/return?borrowing_id={}", BASE_URL, borrowing_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "AlreadyReturned");
}

#[tokio::test]
#[ignore]
async fn test_book_search() {
    let client = Client::new();

    let _ = create_book(&client, "The Rust Programming Language", 3).await;

    let response = client
        .get(format!("{}/books/search?keyword=rust", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected array");
    assert!(books
        .iter()
        .any(|b| b["title"] == "The Rust Programming Language"));
}

#[tokio::test]
#[ignore]
async fn test_statistics_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin/statistics", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["totalUsers"].is_number());
    assert!(body["totalBooks"].is_number());
    assert!(body["totalBorrowings"].is_number());
    assert!(body["overdueCount"].is_number());
    assert!(body["activeBorrowings"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_user_borrowing_history() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users/register", BASE_URL))
        .json(&json!({ "username": "it_history", "password": "password" }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let user_id = body["id"].as_i64().expect("No user ID");

    let book_id = create_book(&client, "History Book", 1).await;
    let _ = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({ "username": "it_history", "book_id": book_id }))
        .send()
        .await;

    let response = client
        .get(format!("{}/borrowings/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let borrowings = body.as_array().expect("Expected array");
    assert_eq!(borrowings.len(), 1);
    assert_eq!(borrowings[0]["book_id"].as_i64(), Some(book_id));
}
