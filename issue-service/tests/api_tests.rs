mod common;

use auth::Claims;
use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    require_test_db!();
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "username": "alice",
            "password": "pass_word!",
            "fullName": "Alice Doe"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["fullName"], "Alice Doe");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["createdAt"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    require_test_db!();
    let app = TestApp::spawn().await;
    app.register_and_login("alice").await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice2@example.com",
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    require_test_db!();
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "not-an-email",
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_success() {
    require_test_db!();
    let app = TestApp::spawn().await;
    app.register_and_login("alice").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["access_token"].is_string());
    assert_eq!(body["data"]["token_type"], "bearer");
    assert_eq!(body["data"]["user"]["username"], "alice");
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    require_test_db!();
    let app = TestApp::spawn().await;
    app.register_and_login("alice").await;

    // Wrong password for an existing user
    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "alice",
            "password": "guess"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: serde_json::Value =
        wrong_password.json().await.expect("Failed to parse response");

    // Unknown username
    let unknown_user = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "mallory",
            "password": "guess"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user: serde_json::Value =
        unknown_user.json().await.expect("Failed to parse response");

    // Same body either way, so usernames cannot be enumerated.
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_me_returns_identity() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (token, user_id) = app.register_and_login("alice").await;

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], user_id.as_str());
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_protected_route_without_token() {
    require_test_db!();
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_wrong_scheme() {
    require_test_db!();
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/me")
        .header("Authorization", "Basic xyz")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (_token, user_id) = app.register_and_login("alice").await;

    let expired = app
        .jwt_handler
        .issue(Claims::for_subject(&user_id), Some(Duration::hours(-2)))
        .unwrap();

    let response = app
        .get_authenticated("/api/auth/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_inactive_account() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (token, user_id) = app.register_and_login("alice").await;

    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1::uuid")
        .bind(&user_id)
        .execute(&app.db.pool)
        .await
        .expect("Failed to deactivate user");

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_issue_applies_defaults() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (token, _user_id) = app.register_and_login("alice").await;

    let response = app
        .post_authenticated("/api/issues", &token)
        .json(&json!({
            "title": "Fix login redirect"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "Fix login redirect");
    assert_eq!(body["data"]["status"], "open");
    assert_eq!(body["data"]["priority"], "medium");
    assert!(body["data"]["assignee"].is_null());
    assert!(body["data"]["id"].is_string());
}

#[tokio::test]
async fn test_create_issue_invalid_status() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (token, _user_id) = app.register_and_login("alice").await;

    let response = app
        .post_authenticated("/api/issues", &token)
        .json(&json!({
            "title": "Fix login redirect",
            "status": "resolved"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_issue_success() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (token, _user_id) = app.register_and_login("alice").await;

    let issue_id = app
        .create_issue(
            &token,
            json!({
                "title": "Fix login redirect",
                "priority": "high",
                "assignee": "bob"
            }),
        )
        .await;

    let response = app
        .get_authenticated(&format!("/api/issues/{}", issue_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], issue_id.as_str());
    assert_eq!(body["data"]["priority"], "high");
    assert_eq!(body["data"]["assignee"], "bob");
}

#[tokio::test]
async fn test_issues_are_scoped_to_their_owner() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (alice_token, _alice) = app.register_and_login("alice").await;
    let (bob_token, _bob) = app.register_and_login("bob").await;

    let issue_id = app
        .create_issue(&alice_token, json!({"title": "Alice's issue"}))
        .await;

    // Bob cannot see it, Alice can.
    let response = app
        .get_authenticated(&format!("/api/issues/{}", issue_id), &bob_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated("/api/issues", &bob_token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["total"], 0);

    let response = app
        .get_authenticated("/api/issues", &alice_token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn test_list_issues_filters_and_pagination() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (token, _user_id) = app.register_and_login("alice").await;

    app.create_issue(&token, json!({"title": "Login page crash", "priority": "high"}))
        .await;
    app.create_issue(
        &token,
        json!({"title": "Login button misaligned", "priority": "low"}),
    )
    .await;
    app.create_issue(
        &token,
        json!({"title": "Export broken", "status": "closed", "assignee": "bob"}),
    )
    .await;

    // Title search is a case-insensitive substring match.
    let response = app
        .get_authenticated("/api/issues?search=login", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["total"], 2);

    // Status and assignee filters
    let response = app
        .get_authenticated("/api/issues?status=closed&assignee=bob", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["title"], "Export broken");

    // Pagination reports the unpaged total.
    let response = app
        .get_authenticated("/api/issues?page=2&pageSize=2", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["pageSize"], 2);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    // Priority sort ranks severity, high first on desc.
    let response = app
        .get_authenticated("/api/issues?sort=priority:desc", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["items"][0]["priority"], "high");
}

#[tokio::test]
async fn test_update_issue_replaces_fields() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (token, _user_id) = app.register_and_login("alice").await;

    let issue_id = app
        .create_issue(&token, json!({"title": "Fix login redirect"}))
        .await;

    let response = app
        .put_authenticated(&format!("/api/issues/{}", issue_id), &token)
        .json(&json!({
            "title": "Fix login redirect loop",
            "status": "in_progress",
            "priority": "high",
            "assignee": "alice"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "Fix login redirect loop");
    assert_eq!(body["data"]["status"], "in_progress");
    assert_eq!(body["data"]["priority"], "high");
    assert_eq!(body["data"]["assignee"], "alice");
}

#[tokio::test]
async fn test_update_missing_issue() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (token, _user_id) = app.register_and_login("alice").await;

    let response = app
        .put_authenticated(
            &format!("/api/issues/{}", uuid::Uuid::new_v4()),
            &token,
        )
        .json(&json!({
            "title": "whatever",
            "status": "open",
            "priority": "low"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_issue() {
    require_test_db!();
    let app = TestApp::spawn().await;
    let (token, _user_id) = app.register_and_login("alice").await;

    let issue_id = app
        .create_issue(&token, json!({"title": "Fix login redirect"}))
        .await;

    let response = app
        .delete_authenticated(&format!("/api/issues/{}", issue_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/api/issues/{}", issue_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
