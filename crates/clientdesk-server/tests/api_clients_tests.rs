//! Client endpoints through the full router

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

mod common;
use common::setup_test_app;

#[tokio::test]
async fn test_create_and_get_client() {
    let app = setup_test_app().await;
    let created = app.create_client("Acme Corp", 120_000).await;

    assert_eq!(created["name"], "Acme Corp");
    assert_eq!(created["salary"], 120_000);
    assert_eq!(created["viewCount"], 0);
    assert!(created["deletedAt"].is_null());

    let id = created["id"].as_str().unwrap();
    let (status, body) = app.send(Method::GET, &format!("/api/clients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], id);
}

#[tokio::test]
async fn test_create_validation() {
    let app = setup_test_app().await;

    let cases = [
        json!({ "name": "", "salary": 1, "companyValue": 1 }),
        json!({ "name": "x".repeat(256), "salary": 1, "companyValue": 1 }),
        json!({ "name": "Neg", "salary": -1, "companyValue": 1 }),
    ];
    for payload in cases {
        let (status, body) = app.send(Method::POST, "/api/clients", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    let (_, body) = app.send(Method::GET, "/api/audits", None).await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn test_get_is_untracked_but_view_is_audited() {
    let app = setup_test_app().await;
    let created = app.create_client("Globex", 1).await;
    let id = created["id"].as_str().unwrap();

    app.send(Method::GET, &format!("/api/clients/{id}"), None).await;
    let (_, body) = app.send(Method::GET, "/api/audits?action=READ", None).await;
    assert_eq!(body["data"]["total"], 0);

    let (status, body) = app
        .send(Method::POST, &format!("/api/clients/{id}/view"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["viewCount"], 1);

    let (_, body) = app.send(Method::GET, "/api/audits?action=READ", None).await;
    assert_eq!(body["data"]["total"], 1);
    let read = &body["data"]["data"][0];
    assert_eq!(read["recordId"], id);
    assert!(read["previousState"].is_null());
    assert!(read["newState"].is_null());
}

#[tokio::test]
async fn test_soft_deleted_client_disappears() {
    let app = setup_test_app().await;
    let kept = app.create_client("Kept", 1).await;
    let gone = app.create_client("Gone", 1).await;
    let gone_id = gone["id"].as_str().unwrap();

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/clients/{gone_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(Method::GET, &format!("/api/clients/{gone_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/clients/{gone_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.send(Method::GET, "/api/clients", None).await;
    let data = body["data"]["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], kept["id"]);

    let (_, body) = app.send(Method::GET, "/api/clients/metrics", None).await;
    assert_eq!(body["data"]["totalClients"], 1);
    assert_eq!(body["data"]["clientsToday"], 1);
}

#[tokio::test]
async fn test_update_missing_client_writes_no_audit() {
    let app = setup_test_app().await;

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/clients/{}", Uuid::new_v4()),
            Some(json!({ "name": "Nobody" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.send(Method::GET, "/api/audits", None).await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn test_list_search_and_pagination() {
    let app = setup_test_app().await;
    for name in ["Alpha", "Beta", "alphabet", "Gamma"] {
        app.create_client(name, 1).await;
    }

    let (status, body) = app
        .send(Method::GET, "/api/clients?search=ALPHA&orderBy=name&order=asc", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|n| n.to_lowercase().contains("alpha")));

    let (_, body) = app.send(Method::GET, "/api/clients?page=2&limit=3", None).await;
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["total"], 4);
    assert_eq!(body["data"]["totalPages"], 2);

    let (status, _) = app.send(Method::GET, "/api/clients?limit=101", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_huge_page_is_empty() {
    let app = setup_test_app().await;
    app.create_client("Acme", 1).await;

    let (status, body) = app
        .send(Method::GET, "/api/clients?page=9223372036854775807", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["totalPages"], 1);
}

#[tokio::test]
async fn test_metrics_most_viewed() {
    let app = setup_test_app().await;
    let client = app.create_client("Viewed", 1).await;
    let id = client["id"].as_str().unwrap();
    app.create_client("Ignored", 1).await;

    for _ in 0..3 {
        app.send(Method::POST, &format!("/api/clients/{id}/view"), None).await;
    }

    let (status, body) = app.send(Method::GET, "/api/clients/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalClients"], 2);
    assert_eq!(body["data"]["mostViewedCount"], 3);
}
