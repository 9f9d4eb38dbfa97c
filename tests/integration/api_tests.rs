//! API integration tests
//!
//! These run against a live server with the default configuration
//! (`cookie_secure = false` in development) and the seeded admin account.

use chrono::{Duration, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Suffix keeping serials and emails unique across runs
fn unique() -> String {
    format!("{}", Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

/// Helper to get a client holding a session cookie
async fn logged_in_client() -> Client {
    let client = client();
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin@123"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success());
    client
}

async fn create_asset(client: &Client, condition: &str) -> Value {
    let today = Utc::now().date_naive();
    let response = client
        .post(format!("{}/assets", BASE_URL))
        .json(&json!({
            "name": "ThinkPad X1",
            "asset_type": "Laptop",
            "make_model": "Lenovo X1 Carbon",
            "serial_number": format!("TP-{}", unique()),
            "purchase_date": today,
            "warranty_expiry_date": today + Duration::days(365),
            "condition": condition
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn create_employee(client: &Client) -> Value {
    let response = client
        .post(format!("{}/employees", BASE_URL))
        .json(&json!({
            "full_name": "Test Employee",
            "department": "QA",
            "email": format!("qa.{}@company.com", unique()),
            "designation": "Tester"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn assign(client: &Client, asset_id: &Value, employee_id: &Value) -> reqwest::Response {
    client
        .post(format!("{}/assignments", BASE_URL))
        .json(&json!({
            "asset_id": asset_id,
            "employee_id": employee_id,
            "notes": "Integration test"
        }))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
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
async fn test_login_status_logout() {
    let client = logged_in_client().await;

    let body: Value = client
        .get(format!("{}/auth/status", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["is_authenticated"], true);
    assert_eq!(body["username"], "admin");

    let response = client
        .post(format!("{}/auth/logout", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body: Value = client
        .get(format!("{}/auth/status", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["is_authenticated"], false);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let response = client()
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let response = client()
        .get(format!("{}/assets", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_asset_status_follows_condition() {
    let client = logged_in_client().await;

    let asset = create_asset(&client, "Needs Repair").await;
    assert_eq!(asset["status"], "Under Repair");
    assert!(asset["employee_id"].is_null());

    let response = client
        .put(format!("{}/assets/{}", BASE_URL, asset["id"]))
        .json(&json!({ "condition": "Good" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "Available");

    let response = client
        .delete(format!("{}/assets/{}", BASE_URL, asset["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_serial_number() {
    let client = logged_in_client().await;
    let asset = create_asset(&client, "New").await;
    let today = Utc::now().date_naive();

    let response = client
        .post(format!("{}/assets", BASE_URL))
        .json(&json!({
            "name": "Clone",
            "asset_type": "Laptop",
            "serial_number": asset["serial_number"],
            "warranty_expiry_date": today + Duration::days(30)
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "DuplicateKey");

    // Renaming another asset onto the taken serial is refused as well
    let other = create_asset(&client, "Good").await;
    let response = client
        .put(format!("{}/assets/{}", BASE_URL, other["id"]))
        .json(&json!({ "serial_number": asset["serial_number"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "DuplicateKey");

    // A fresh serial goes through
    let fresh = format!("TP-{}", unique());
    let response = client
        .put(format!("{}/assets/{}", BASE_URL, asset["id"]))
        .json(&json!({ "serial_number": fresh }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["serial_number"], fresh.as_str());
}

#[tokio::test]
#[ignore]
async fn test_warranty_before_purchase_is_rejected() {
    let client = logged_in_client().await;
    let today = Utc::now().date_naive();

    let response = client
        .post(format!("{}/assets", BASE_URL))
        .json(&json!({
            "name": "Backdated",
            "asset_type": "Monitor",
            "serial_number": format!("MN-{}", unique()),
            "purchase_date": today,
            "warranty_expiry_date": today - Duration::days(1)
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "InvalidDateOrder");
}

#[tokio::test]
#[ignore]
async fn test_assign_and_return_flow() {
    let client = logged_in_client().await;
    let asset = create_asset(&client, "Good").await;
    let employee = create_employee(&client).await;

    let response = assign(&client, &asset["id"], &employee["id"]).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record: Value = response.json().await.expect("Failed to parse response");
    assert!(record["returned_date"].is_null());

    let held: Value = client
        .get(format!("{}/assets/{}", BASE_URL, asset["id"]))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(held["status"], "Assigned");
    assert_eq!(held["employee_id"], employee["id"]);

    // A second hand-out of the same asset is refused
    let response = assign(&client, &asset["id"], &employee["id"]).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Neither the asset nor its holder can be deleted meanwhile
    let response = client
        .delete(format!("{}/employees/{}", BASE_URL, employee["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .delete(format!("{}/assets/{}", BASE_URL, asset["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .post(format!("{}/assignments/{}/return", BASE_URL, record["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let returned: Value = client
        .get(format!("{}/assets/{}", BASE_URL, asset["id"]))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(returned["status"], "Available");
    assert!(returned["employee_id"].is_null());

    let history: Value = client
        .get(format!("{}/assets/{}/history", BASE_URL, asset["id"]))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(history.as_array().map(|h| h.len()), Some(1));

    let response = client
        .delete(format!("{}/employees/{}", BASE_URL, employee["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore]
async fn test_condition_damage_releases_holder() {
    let client = logged_in_client().await;
    let asset = create_asset(&client, "New").await;
    let employee = create_employee(&client).await;

    let response = assign(&client, &asset["id"], &employee["id"]).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record: Value = response.json().await.expect("Failed to parse response");

    let body: Value = client
        .put(format!("{}/assets/{}", BASE_URL, asset["id"]))
        .json(&json!({ "condition": "Damaged" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["status"], "Retired");
    assert!(body["employee_id"].is_null());

    // The record stays open until the return is recorded
    let response = client
        .delete(format!("{}/assignments/{}", BASE_URL, record["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "AssignmentOpen");
}

#[tokio::test]
#[ignore]
async fn test_assign_missing_employee() {
    let client = logged_in_client().await;
    let asset = create_asset(&client, "Good").await;

    let response = assign(&client, &asset["id"], &json!(i32::MAX)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_reports() {
    let client = logged_in_client().await;

    let body: Value = client
        .get(format!("{}/reports/assets-by-status", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["totals"].as_array().map(|t| t.len()), Some(4));

    let response = client
        .get(format!("{}/reports/expiring-assets?within_days=30", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/reports/employee-utilization", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

async fn get_json(client: &Client, path: String) -> Value {
    client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response")
}

async fn update_condition(client: &Client, asset_id: &Value, condition: &str) -> Value {
    let response = client
        .put(format!("{}/assets/{}", BASE_URL, asset_id))
        .json(&json!({ "condition": condition }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore]
async fn test_repaired_asset_goes_back_to_open_record_holder() {
    let client = logged_in_client().await;
    let asset = create_asset(&client, "Good").await;
    let employee = create_employee(&client).await;
    let other = create_employee(&client).await;

    let response = assign(&client, &asset["id"], &employee["id"]).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record: Value = response.json().await.expect("Failed to parse response");

    let damaged = update_condition(&client, &asset["id"], "Damaged").await;
    assert_eq!(damaged["status"], "Retired");
    assert!(damaged["employee_id"].is_null());

    let repaired = update_condition(&client, &asset["id"], "Good").await;
    assert_eq!(repaired["status"], "Assigned");
    assert_eq!(repaired["employee_id"], employee["id"]);

    // Status and the open record agree: no second hand-out
    let response = assign(&client, &asset["id"], &other["id"]).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "AssetAlreadyAssigned");

    let response = client
        .post(format!("{}/assignments/{}/return", BASE_URL, record["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let returned = get_json(&client, format!("/assets/{}", asset["id"])).await;
    assert_eq!(returned["status"], "Available");

    let response = assign(&client, &asset["id"], &other["id"]).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
#[ignore]
async fn test_open_record_blocks_deletes() {
    let client = logged_in_client().await;
    // Needs Repair: recorded without setting the holder
    let asset = create_asset(&client, "Needs Repair").await;
    let employee = create_employee(&client).await;

    let response = assign(&client, &asset["id"], &employee["id"]).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record: Value = response.json().await.expect("Failed to parse response");

    let held = get_json(&client, format!("/assets/{}", asset["id"])).await;
    assert_eq!(held["status"], "Under Repair");
    assert!(held["employee_id"].is_null());

    for path in [
        format!("/employees/{}", employee["id"]),
        format!("/assets/{}", asset["id"]),
    ] {
        let response = client
            .delete(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["error"], "AssignmentOpen");
    }

    let still_there = get_json(&client, format!("/assignments/{}", record["id"])).await;
    assert!(still_there["returned_date"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_second_return_is_a_conflict() {
    let client = logged_in_client().await;
    let asset = create_asset(&client, "New").await;
    let employee = create_employee(&client).await;

    let response = assign(&client, &asset["id"], &employee["id"]).await;
    let record: Value = response.json().await.expect("Failed to parse response");
    let url = format!("{}/assignments/{}/return", BASE_URL, record["id"]);

    let (first, second) = tokio::join!(client.post(&url).send(), client.post(&url).send());
    let mut statuses = vec![
        first.expect("Failed to send request").status(),
        second.expect("Failed to send request").status(),
    ];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);
}
