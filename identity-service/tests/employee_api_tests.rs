mod common;

use common::TestApp;
use common::TENANT_ID;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

const OTHER_TENANT_ID: &str = "0f1e2d3c-4b5a-4c6d-8e7f-a1b2c3d4e5f6";

#[tokio::test]
async fn test_create_employee_in_callers_tenant() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for(TENANT_ID);

    let body = app.create_employee(&token, "Bo", "bo@x.com").await;

    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["name"], "Bo");
    assert_eq!(body["data"]["email"], "bo@x.com");
    assert_eq!(body["data"]["tenant_id"], TENANT_ID);
    assert!(body["data"]["id"].is_string());
    assert_eq!(app.employees.len().await, 1);
}

#[tokio::test]
async fn test_employee_routes_require_a_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/employees")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_email_within_tenant_is_conflict() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for(TENANT_ID);
    app.create_employee(&token, "Bo", "bo@x.com").await;

    let response = app
        .post_authenticated("/api/employees", &token)
        .json(&json!({ "name": "Bo Two", "email": "bo@x.com", "phone_number": "+2" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "EMPLOYEE_ALREADY_EXISTS");

    // Same email is free in another tenant.
    let other = app.access_token_for(OTHER_TENANT_ID);
    app.create_employee(&other, "Bo", "bo@x.com").await;
    assert_eq!(app.employees.len().await, 2);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for(TENANT_ID);

    let cases = [
        (json!({"name": "", "email": "bo@x.com", "phone_number": "+1"}), "name"),
        (json!({"name": "Bo", "email": "nope", "phone_number": "+1"}), "email"),
        (json!({"name": "Bo", "email": "bo@x.com", "phone_number": " "}), "phone_number"),
    ];

    for (payload, field) in cases {
        let response = app
            .post_authenticated("/api/employees", &token)
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "field {}", field);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["data"]["code"], "BAD_REQUEST");
    }

    assert!(app.employees.is_empty().await);
}

#[tokio::test]
async fn test_other_tenant_cannot_see_or_touch_employee() {
    let app = TestApp::spawn().await;
    let owner = app.access_token_for(TENANT_ID);
    let intruder = app.access_token_for(OTHER_TENANT_ID);
    let created = app.create_employee(&owner, "Bo", "bo@x.com").await;
    let path = format!("/api/employees/{}", created["data"]["id"].as_str().unwrap());

    let get = app
        .get_authenticated(&path, &intruder)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
    let body: Value = get.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "EMPLOYEE_NOT_FOUND");

    let update = app
        .put_authenticated(&path, &intruder)
        .json(&json!({ "name": "Hijacked" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let delete = app
        .delete_authenticated(&path, &intruder)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    let listed: Value = app
        .get_authenticated("/api/employees", &intruder)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(listed["data"]["total"], 0);

    let still_there: Value = app
        .get_authenticated(&path, &owner)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(still_there["data"]["name"], "Bo");
}

#[tokio::test]
async fn test_list_paginates_and_searches() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for(TENANT_ID);
    for (name, email) in [
        ("Cy", "cy@x.com"),
        ("Al", "al@x.com"),
        ("Bo", "bo@y.com"),
        ("Di", "di@x.com"),
        ("Ed", "ed@x.com"),
    ] {
        app.create_employee(&token, name, email).await;
    }

    let response = app
        .get_authenticated("/api/employees?page=2&limit=2", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let names: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Cy", "Di"]);
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(body["data"]["total_pages"], 3);
    assert_eq!(body["data"]["next_page"], 3);
    assert_eq!(body["data"]["prev_page"], 1);

    let body: Value = app
        .get_authenticated("/api/employees?query=Y.COM", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["name"], "Bo");
    assert_eq!(body["data"]["limit"], 10);
    assert!(body["data"].get("next_page").is_none());
    assert!(body["data"].get("prev_page").is_none());
}

#[tokio::test]
async fn test_list_rejects_bad_pagination() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for(TENANT_ID);

    for query in ["page=0", "limit=0", "limit=101", "page=first"] {
        let response = app
            .get_authenticated(&format!("/api/employees?{}", query), &token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query {}", query);
    }
}

#[tokio::test]
async fn test_get_with_malformed_id_is_bad_request() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for(TENANT_ID);

    let response = app
        .get_authenticated("/api/employees/42", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid employee ID"));
}

#[tokio::test]
async fn test_update_then_delete() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for(TENANT_ID);
    let created = app.create_employee(&token, "Bo", "bo@x.com").await;
    let path = format!("/api/employees/{}", created["data"]["id"].as_str().unwrap());

    let response = app
        .put_authenticated(&path, &token)
        .json(&json!({ "name": "Bo Renamed", "email": "bo2@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], created["data"]["id"]);
    assert_eq!(body["data"]["name"], "Bo Renamed");
    assert_eq!(body["data"]["email"], "bo2@x.com");
    assert_eq!(body["data"]["phone_number"], created["data"]["phone_number"]);

    let response = app
        .delete_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(app.employees.is_empty().await);

    let response = app
        .get_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_token_from_login_reaches_employee_routes() {
    let app = TestApp::spawn().await;
    app.register_ann().await;
    let login = app.login_ann().await;
    let token = login["data"]["access_token"].as_str().unwrap();

    let created = app.create_employee(token, "Bo", "bo@x.com").await;

    assert_eq!(created["data"]["tenant_id"], TENANT_ID);
}
