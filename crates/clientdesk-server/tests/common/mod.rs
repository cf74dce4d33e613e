//! Shared helpers for router-level integration tests
//!
//! Builds the full application router over in-memory stores with one seeded
//! admin account and a valid bearer token for it.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use clientdesk_server::{
    api::create_router,
    audit::{AuditWriter, InMemoryAuditStore},
    config::{AuthConfig, CorsConfig, SeedConfig},
    features::{
        auth::{InMemoryUserStore, JwtKeys},
        clients::InMemoryClientStore,
    },
    seed::seed_admin,
    state::{AppState, Backend},
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub audits: Arc<InMemoryAuditStore>,
    pub writer: AuditWriter,
    pub jwt: JwtKeys,
    pub token: String,
    pub user_id: Uuid,
}

pub async fn setup_test_app() -> TestApp {
    let users = Arc::new(InMemoryUserStore::new());
    let audits = Arc::new(InMemoryAuditStore::with_users(users.clone()));
    let jwt = JwtKeys::new(&AuthConfig {
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expires_in_secs: 3600,
    });

    let state = AppState::new(
        Arc::new(InMemoryClientStore::new()),
        users.clone(),
        audits.clone(),
        jwt.clone(),
        Backend::Memory,
    );

    let admin = seed_admin(
        users.as_ref(),
        &SeedConfig {
            enabled: true,
            admin_email: ADMIN_EMAIL.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            admin_name: "Administrator".to_string(),
        },
    )
    .await
    .unwrap();

    let token = jwt.issue(admin.id, &admin.email).unwrap();
    let writer = state.audit.clone();
    let router = create_router(
        state,
        &CorsConfig {
            allowed_origins: vec![],
            allow_credentials: false,
        },
    );

    TestApp {
        router,
        audits,
        writer,
        jwt,
        token,
        user_id: admin.id,
    }
}

impl TestApp {
    /// Authenticated request as the seeded admin
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(&self.router, method, uri, Some(&self.token), body).await
    }

    pub async fn create_client(&self, name: &str, salary: i64) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/clients",
                Some(serde_json::json!({
                    "name": name,
                    "salary": salary,
                    "companyValue": 1_000_000,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["data"].clone()
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
