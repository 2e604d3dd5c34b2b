//! Integration tests for product management: ownership checks and the
//! five-products-per-vitrine cap.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p flash-vitrine-server)
//!
//! Run with: cargo test -p flash-vitrine-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

const SESSION_HEADER: &str = "x-session-id";

fn base_url() -> String {
    std::env::var("VITRINE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn client() -> Client {
    Client::new()
}

/// Test helper: register a throwaway user and return its session token.
async fn register_session(client: &Client) -> String {
    let resp = client
        .post(format!("{}/api/register", base_url()))
        .json(&json!({
            "name": "Test Merchant",
            "email": format!("test-{}@example.com", Uuid::new_v4()),
            "password": "correct horse battery",
        }))
        .send()
        .await
        .expect("Failed to register test user");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    body["sessionId"]
        .as_str()
        .expect("sessionId missing")
        .to_string()
}

/// Test helper: create a vitrine, returning (id, slug).
async fn create_vitrine(client: &Client, session: &str) -> (String, String) {
    let slug = format!("loja-{}", Uuid::new_v4().simple());
    let resp = client
        .post(format!("{}/api/vitrines", base_url()))
        .header(SESSION_HEADER, session)
        .json(&json!({"name": "Corner Shop", "slug": slug}))
        .send()
        .await
        .expect("Failed to create vitrine");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let id = body["id"].as_str().expect("id missing").to_string();
    (id, slug)
}

/// Test helper: attempt to create a product, returning the raw response.
async fn create_product(
    client: &Client,
    session: &str,
    vitrine_id: &str,
    name: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/api/products", base_url()))
        .header(SESSION_HEADER, session)
        .json(&json!({
            "vitrineId": vitrine_id,
            "name": name,
            "price": "49.90",
        }))
        .send()
        .await
        .expect("Failed to send product request")
}

// ============================================================================
// Create & the product cap
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_create_product_on_own_vitrine() {
    let client = client();
    let session = register_session(&client).await;
    let (vitrine_id, _) = create_vitrine(&client, &session).await;

    let resp = create_product(&client, &session, &vitrine_id, "Candle").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let product: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(product["name"], "Candle");
    assert_eq!(product["price"], "49.90");
    assert_eq!(product["available"], true);
    assert_eq!(product["vitrineId"], vitrine_id.as_str());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_sixth_product_is_rejected() {
    let client = client();
    let session = register_session(&client).await;
    let (vitrine_id, slug) = create_vitrine(&client, &session).await;

    for i in 1..=5 {
        let resp = create_product(&client, &session, &vitrine_id, &format!("Item {i}")).await;
        assert_eq!(resp.status(), StatusCode::OK, "product {i} should fit");
    }

    let resp = create_product(&client, &session, &vitrine_id, "One Too Many").await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // The public page shows exactly five.
    let resp = client
        .get(format!("{}/api/vitrine/{slug}", base_url()))
        .send()
        .await
        .expect("Failed to fetch public page");
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["products"].as_array().expect("expected array").len(), 5);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_deleting_frees_a_cap_slot() {
    let client = client();
    let session = register_session(&client).await;
    let (vitrine_id, _) = create_vitrine(&client, &session).await;

    let mut last_id = String::new();
    for i in 1..=5 {
        let resp = create_product(&client, &session, &vitrine_id, &format!("Item {i}")).await;
        let product: Value = resp.json().await.expect("Failed to parse response");
        last_id = product["id"].as_str().expect("id missing").to_string();
    }

    let resp = client
        .delete(format!("{}/api/products/{last_id}", base_url()))
        .header(SESSION_HEADER, &session)
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = create_product(&client, &session, &vitrine_id, "Replacement").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_create_on_foreign_vitrine_is_forbidden() {
    let client = client();
    let alice = register_session(&client).await;
    let bob = register_session(&client).await;
    let (vitrine_id, _) = create_vitrine(&client, &alice).await;

    let resp = create_product(&client, &bob, &vitrine_id, "Intruder").await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_create_on_unknown_vitrine_is_not_found() {
    let client = client();
    let session = register_session(&client).await;

    let resp = create_product(&client, &session, &Uuid::new_v4().to_string(), "Ghost").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_create_without_session_is_unauthorized() {
    let client = client();
    let session = register_session(&client).await;
    let (vitrine_id, _) = create_vitrine(&client, &session).await;

    let resp = client
        .post(format!("{}/api/products", base_url()))
        .json(&json!({"vitrineId": vitrine_id, "name": "Anon", "price": "1.00"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_malformed_price_is_rejected() {
    let client = client();
    let session = register_session(&client).await;
    let (vitrine_id, _) = create_vitrine(&client, &session).await;

    for price in ["abc", "-5.00", "1.999"] {
        let resp = client
            .post(format!("{}/api/products", base_url()))
            .header(SESSION_HEADER, &session)
            .json(&json!({"vitrineId": vitrine_id, "name": "Item", "price": price}))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "price: {price:?}");
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_malformed_body_is_rejected() {
    let client = client();
    let session = register_session(&client).await;

    // Invalid JSON and a missing required field both come back as 400 with
    // the usual error shape, not a bare 422.
    for body in ["{not json", r#"{"name": "Item"}"#] {
        let resp = client
            .post(format!("{}/api/products", base_url()))
            .header(SESSION_HEADER, &session)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body:?}");

        let payload: Value = resp.json().await.expect("Failed to parse response");
        assert!(payload["error"].as_str().is_some(), "body: {body:?}");
    }
}

// ============================================================================
// Update & Delete
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_owner_can_update_product() {
    let client = client();
    let session = register_session(&client).await;
    let (vitrine_id, _) = create_vitrine(&client, &session).await;

    let resp = create_product(&client, &session, &vitrine_id, "Candle").await;
    let product: Value = resp.json().await.expect("Failed to parse response");
    let id = product["id"].as_str().expect("id missing");

    let resp = client
        .put(format!("{}/api/products/{id}", base_url()))
        .header(SESSION_HEADER, &session)
        .json(&json!({"price": "59.90", "available": false}))
        .send()
        .await
        .expect("Failed to update product");

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(updated["price"], "59.90");
    assert_eq!(updated["available"], false);
    // Untouched fields survive a partial update.
    assert_eq!(updated["name"], "Candle");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_update_with_blank_name_is_rejected() {
    let client = client();
    let session = register_session(&client).await;
    let (vitrine_id, _) = create_vitrine(&client, &session).await;

    let resp = create_product(&client, &session, &vitrine_id, "Candle").await;
    let product: Value = resp.json().await.expect("Failed to parse response");
    let id = product["id"].as_str().expect("id missing");

    let resp = client
        .put(format!("{}/api/products/{id}", base_url()))
        .header(SESSION_HEADER, &session)
        .json(&json!({"name": "  "}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_non_owner_cannot_update_or_delete() {
    let client = client();
    let alice = register_session(&client).await;
    let bob = register_session(&client).await;
    let (vitrine_id, _) = create_vitrine(&client, &alice).await;

    let resp = create_product(&client, &alice, &vitrine_id, "Candle").await;
    let product: Value = resp.json().await.expect("Failed to parse response");
    let id = product["id"].as_str().expect("id missing");

    let resp = client
        .put(format!("{}/api/products/{id}", base_url()))
        .header(SESSION_HEADER, &bob)
        .json(&json!({"name": "Hijacked"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client
        .delete(format!("{}/api/products/{id}", base_url()))
        .header(SESSION_HEADER, &bob)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_delete_unknown_product_is_not_found() {
    let client = client();
    let session = register_session(&client).await;

    let resp = client
        .delete(format!("{}/api/products/{}", base_url(), Uuid::new_v4()))
        .header(SESSION_HEADER, &session)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
