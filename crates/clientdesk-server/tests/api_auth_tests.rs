//! Login, token checks and the health endpoint

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

mod common;
use common::{send, setup_test_app, ADMIN_EMAIL, ADMIN_PASSWORD};

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let app = setup_test_app().await;

    let (status, body) = send(&app.router, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["database"], "memory");
}

#[tokio::test]
async fn test_login_issues_usable_token_and_audits() {
    let app = setup_test_app().await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], ADMIN_EMAIL);
    assert!(body["data"]["user"].get("passwordHash").is_none());

    let token = body["data"]["access_token"].as_str().unwrap();
    let claims = app.jwt.verify(token).unwrap();
    assert_eq!(claims.sub, app.user_id);

    let (status, body) = send(
        &app.router,
        Method::GET,
        "/api/audits?action=LOGIN",
        Some(token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    let login = &body["data"]["data"][0];
    assert_eq!(login["tableName"], "users");
    assert_eq!(login["actorId"], app.user_id.to_string());
    assert_eq!(login["recordId"], app.user_id.to_string());
}

#[tokio::test]
async fn test_login_records_forwarded_ip_and_user_agent() {
    let app = setup_test_app().await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .header("user-agent", "integration-test")
        .body(axum::body::Body::from(
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }).to_string(),
        ))
        .unwrap();

    use tower::ServiceExt;
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = app.send(Method::GET, "/api/audits?action=LOGIN", None).await;
    let login = &body["data"]["data"][0];
    assert_eq!(login["sourceIp"], "203.0.113.7");
    assert_eq!(login["userAgent"], "integration-test");
}

#[tokio::test]
async fn test_bad_login_is_401_without_audit() {
    let app = setup_test_app().await;

    for payload in [
        json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
        json!({ "email": "nobody@example.com", "password": ADMIN_PASSWORD }),
    ] {
        let (status, body) =
            send(&app.router, Method::POST, "/api/auth/login", None, Some(payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid credentials");
    }

    let (_, body) = app.send(Method::GET, "/api/audits", None).await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn test_login_survives_audit_outage() {
    let app = setup_test_app().await;
    app.audits.set_available(false);

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.audits.is_empty().await);
}

#[tokio::test]
async fn test_client_routes_reject_foreign_tokens() {
    let app = setup_test_app().await;

    let (status, _) = send(&app.router, Method::GET, "/api/clients", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other = clientdesk_server::features::auth::JwtKeys::new(
        &clientdesk_server::config::AuthConfig {
            jwt_secret: "another-secret".to_string(),
            jwt_expires_in_secs: 3600,
        },
    );
    let forged = other.issue(Uuid::new_v4(), "x@example.com").unwrap();

    let (status, _) = send(&app.router, Method::GET, "/api/clients", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
