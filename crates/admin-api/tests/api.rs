//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Router tests driven in-process

use admin_api::{AdminApiServer, ApiConfig};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin123";

async fn app() -> Router {
    let mut config = ApiConfig::default();
    config.auth.users.bcrypt_cost = admin_auth::MIN_BCRYPT_COST;
    config.bootstrap.admin_email = Some(ADMIN_EMAIL.to_string());
    config.bootstrap.admin_password = Some(ADMIN_PASSWORD.to_string());

    AdminApiServer::new(config).await.unwrap().router()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

async fn provision(app: &Router, admin: &str, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/users",
        Some(admin),
        Some(json!({ "email": email, "name": "Staff", "password": "secret1", "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "provisioning failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn login_returns_token_and_session_user() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "Admin@Example.com", "password": ADMIN_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert!(body["expiresAt"].is_string());
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["permissions"], json!(["all"]));
    assert_eq!(body["user"]["isActive"], true);
    assert!(body["user"]["lastLogin"].is_string());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = app().await;
    for credentials in [
        json!({ "email": ADMIN_EMAIL, "password": "wrong-password" }),
        json!({ "email": "nobody@example.com", "password": ADMIN_PASSWORD }),
        json!({ "email": ADMIN_EMAIL }),
    ] {
        let (status, body) = send(&app, "POST", "/api/auth/login", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn session_lookup_and_logout() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/auth/session", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (_, body) = send(&app, "GET", "/api/auth/session", Some(&token), None).await;
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);

    let (status, body) = send(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signedOut"], true);

    let (_, body) = send(&app, "GET", "/api/auth/session", Some(&token), None).await;
    assert!(body.is_null());

    let (status, _) = send(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unauthenticated_requests_get_401() {
    let app = app().await;
    for uri in ["/api/users", "/api/roles", "/api/permissions"] {
        let (status, body) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["message"], "You need to be logged in to access this page.");
    }

    let (status, _) = send(&app, "GET", "/api/users", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn editor_is_forbidden_from_user_management() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    provision(&app, &admin, "editor@example.com", "editor").await;
    let editor = login(&app, "editor@example.com", "secret1").await;

    let (status, body) = send(&app, "GET", "/api/users", Some(&editor), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(&editor),
        Some(json!({ "email": "x@example.com", "name": "X", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", "/api/permissions", Some(&editor), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "editor");
    assert!(body["granted"]
        .as_array()
        .unwrap()
        .contains(&json!("products.view")));
    assert_eq!(body["groups"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn provisioning_uses_role_defaults_and_overrides() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({ "email": "Acc@Example.com", "name": " Acc ", "password": "secret1", "role": "accounts" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "acc@example.com");
    assert_eq!(body["name"], "Acc");
    assert_eq!(body["permissions"].as_array().unwrap().len(), 11);

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({
            "email": "auditor@example.com",
            "name": "Auditor",
            "password": "secret1",
            "permissions": ["reports.view"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "editor");
    assert_eq!(body["permissions"], json!(["reports.view"]));

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({ "email": "acc@example.com", "name": "Dup", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "GET", "/api/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn permission_changes_take_effect_on_next_request() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let editor_id = provision(&app, &admin, "editor@example.com", "editor").await;
    let editor = login(&app, "editor@example.com", "secret1").await;

    let (status, _) = send(&app, "GET", "/api/users", Some(&editor), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/permissions", editor_id),
        Some(&admin),
        Some(json!({ "permissions": ["users.view", "products.view"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permissions"], json!(["products.view", "users.view"]));

    let (status, _) = send(&app, "GET", "/api/users", Some(&editor), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/permissions", editor_id),
        Some(&admin),
        Some(json!({ "role": "manager" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "manager");
    assert_eq!(body["permissions"].as_array().unwrap().len(), 20);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/permissions", editor_id),
        Some(&admin),
        Some(json!({ "permissions": ["users"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({ "email": "x@example.com", "name": "X", "password": "secret1", "role": "owner" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn delegated_user_managers_cannot_escalate() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let delegate_id = provision(&app, &admin, "delegate@example.com", "editor").await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/permissions", delegate_id),
        Some(&admin),
        Some(json!({ "permissions": ["users.view", "users.create", "users.edit", "products.view"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let delegate = login(&app, "delegate@example.com", "secret1").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/permissions", delegate_id),
        Some(&delegate),
        Some(json!({ "permissions": ["all"] })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().ends_with("all"));

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/permissions", delegate_id),
        Some(&delegate),
        Some(json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for body in [
        json!({ "email": "a@example.com", "name": "A", "password": "secret1", "role": "admin", "permissions": ["all"] }),
        json!({ "email": "b@example.com", "name": "B", "password": "secret1", "role": "admin", "permissions": ["products.view"] }),
        json!({ "email": "c@example.com", "name": "C", "password": "secret1", "role": "manager" }),
        json!({ "email": "d@example.com", "name": "D", "password": "secret1", "permissions": ["payments.refund"] }),
    ] {
        let (status, _) = send(&app, "POST", "/api/users", Some(&delegate), Some(body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    let (_, session) = send(&app, "GET", "/api/auth/session", Some(&delegate), None).await;
    assert_eq!(session["user"]["role"], "editor");
    assert_eq!(session["user"]["permissions"].as_array().unwrap().len(), 4);

    // grants within the delegate's own set still go through
    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&delegate),
        Some(json!({
            "email": "viewer@example.com",
            "name": "Viewer",
            "password": "secret1",
            "permissions": ["products.view", "users.view"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "editor");
}

#[tokio::test]
async fn role_and_permissions_change_together() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let staff_id = provision(&app, &admin, "staff@example.com", "editor").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/permissions", staff_id),
        Some(&admin),
        Some(json!({ "role": "accounts", "permissions": ["reports.view"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "accounts");
    assert_eq!(body["permissions"], json!(["reports.view"]));
}

#[tokio::test]
async fn deactivated_accounts_lose_their_session() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let staff_id = provision(&app, &admin, "staff@example.com", "accounts").await;
    let staff = login(&app, "staff@example.com", "secret1").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/active", staff_id),
        Some(&admin),
        Some(json!({ "isActive": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], false);

    let (_, body) = send(&app, "GET", "/api/auth/session", Some(&staff), None).await;
    assert!(body.is_null());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "staff@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Account is inactive");
}

#[tokio::test]
async fn admins_cannot_deactivate_themselves() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (_, session) = send(&app, "GET", "/api/auth/session", Some(&admin), None).await;
    let admin_id = session["user"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/active", admin_id),
        Some(&admin),
        Some(json!({ "isActive": false })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/users/missing/active",
        Some(&admin),
        Some(json!({ "isActive": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn roles_endpoint_lists_default_grants() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, body) = send(&app, "GET", "/api/roles", Some(&admin), None).await;

    assert_eq!(status, StatusCode::OK);
    let roles = body.as_array().unwrap();
    assert_eq!(roles.len(), 4);
    assert_eq!(roles[0]["role"], "admin");
    assert_eq!(roles[0]["permissions"], json!(["all"]));
    assert_eq!(roles[2]["role"], "editor");
    assert_eq!(roles[2]["permissions"].as_array().unwrap().len(), 10);
}
