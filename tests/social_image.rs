//! End-to-end tests for the social-image endpoint against a mocked API.

use serde_json::json;
use share_edge::config::EdgeConfig;

mod common;

fn config_with_api(api_addr: std::net::SocketAddr) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.api.base_url = format!("http://{api_addr}");
    config
}

#[tokio::test]
async fn test_user_route_renders_profile_card() {
    let api_addr = common::start_mock_server(|path| async move {
        match path.as_str() {
            "/users/alice" => (
                200,
                "application/json",
                json!({
                    "handle": "alice",
                    "name": "Alice",
                    "avatarUrl": "https://cdn.example/alice.png",
                    "bio": "Writes libraries",
                })
                .to_string(),
            ),
            _ => (404, "text/plain", "Not Found".to_string()),
        }
    })
    .await;

    let edge = common::start_edge(config_with_api(api_addr)).await;
    let client = common::http_client();

    let response = client
        .get(format!("http://{edge}/social-image?path=/@alice"))
        .send()
        .await
        .expect("edge unreachable");

    assert_eq!(response.status(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("image/svg+xml"));
    assert!(response.headers().contains_key("x-request-id"));

    let body = response.text().await.unwrap();
    assert!(body.starts_with("<svg"));
    assert!(body.contains("Alice"));
    assert!(body.contains("share.example.com/@alice"));
    assert!(body.contains("https://cdn.example/alice.png"));
}

#[tokio::test]
async fn test_ticket_route_renders_sheet_card() {
    let api_addr = common::start_mock_server(|path| async move {
        match path.as_str() {
            "/users/alice/projects/mylib" => (
                200,
                "application/json",
                json!({
                    "owner": { "handle": "alice" },
                    "slug": "mylib",
                    "summary": "A tiny library",
                    "numOpenTickets": 3,
                })
                .to_string(),
            ),
            "/users/alice/projects/mylib/tickets/42" => (
                200,
                "application/json",
                json!({
                    "author": "@bob",
                    "title": "Crash on startup",
                    "description": "It crashes",
                    "numComments": 2,
                    "status": "open",
                    "createdAt": "2024-02-03T10:30:00Z",
                    "updatedAt": "2024-02-04T10:30:00Z",
                })
                .to_string(),
            ),
            _ => (404, "text/plain", "Not Found".to_string()),
        }
    })
    .await;

    let edge = common::start_edge(config_with_api(api_addr)).await;
    let client = common::http_client();

    let body = client
        .get(format!(
            "http://{edge}/social-image?path=/@alice/mylib/tickets/42"
        ))
        .send()
        .await
        .expect("edge unreachable")
        .text()
        .await
        .unwrap();

    assert!(body.contains("Crash on startup"));
    assert!(body.contains("Ticket #42"));
    assert!(body.contains("Open"));
    assert!(body.contains("@bob"));
    assert!(body.contains("Feb 3, 2024"));
}

#[tokio::test]
async fn test_primary_fetch_failure_falls_back_to_default_image() {
    let api_addr =
        common::start_mock_server(|_| async move { (404, "text/plain", "Not Found".to_string()) })
            .await;

    let config = config_with_api(api_addr);
    let default_image = config.social.default_image_url.clone();
    let edge = common::start_edge(config).await;
    let client = common::http_client();

    // Every variant degrades the same way when the primary entity is gone.
    for path in [
        "/@ghost",
        "/@ghost/mylib",
        "/@ghost/mylib/tickets/1",
        "/@ghost/mylib/releases/1.0.0",
    ] {
        let response = client
            .get(format!("http://{edge}/social-image?path={path}"))
            .send()
            .await
            .expect("edge unreachable");
        assert_eq!(response.status(), 200, "path {path}");
        let body = response.text().await.unwrap();
        assert!(body.contains(&default_image), "path {path} should fall back");
    }
}

#[tokio::test]
async fn test_unroutable_path_renders_default_image_without_api_calls() {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    let call_count = Arc::new(AtomicU32::new(0));
    let calls = call_count.clone();
    let api_addr = common::start_mock_server(move |_| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            (404, "text/plain", "Not Found".to_string())
        }
    })
    .await;

    let config = config_with_api(api_addr);
    let default_image = config.social.default_image_url.clone();
    let edge = common::start_edge(config).await;
    let client = common::http_client();

    let body = client
        .get(format!("http://{edge}/social-image?path=/about"))
        .send()
        .await
        .expect("edge unreachable")
        .text()
        .await
        .unwrap();
    assert!(body.contains(&default_image));

    // Missing `path` defaults to "/", which is also unroutable.
    let body = client
        .get(format!("http://{edge}/social-image"))
        .send()
        .await
        .expect("edge unreachable")
        .text()
        .await
        .unwrap();
    assert!(body.contains(&default_image));

    assert_eq!(
        call_count.load(std::sync::atomic::Ordering::SeqCst),
        0,
        "unroutable paths must not hit the API"
    );
}

#[tokio::test]
async fn test_contribution_status_tag_on_card() {
    let api_addr = common::start_mock_server(|path| async move {
        match path.as_str() {
            "/users/alice/projects/mylib" => (
                200,
                "application/json",
                json!({
                    "owner": { "handle": "alice" },
                    "slug": "mylib",
                    "summary": "",
                })
                .to_string(),
            ),
            "/users/alice/projects/mylib/contributions/7" => (
                200,
                "application/json",
                json!({
                    "author": "@carol",
                    "title": "Rework parser",
                    "numComments": 0,
                    "sourceBranchRef": "@carol/parser",
                    "targetBranchRef": "main",
                    "status": "in_review",
                    "createdAt": "2024-05-20T08:00:00Z",
                    "updatedAt": "2024-05-21T08:00:00Z",
                })
                .to_string(),
            ),
            _ => (404, "text/plain", "Not Found".to_string()),
        }
    })
    .await;

    let edge = common::start_edge(config_with_api(api_addr)).await;
    let client = common::http_client();

    let body = client
        .get(format!(
            "http://{edge}/social-image?path=/@alice/mylib/contributions/7"
        ))
        .send()
        .await
        .expect("edge unreachable")
        .text()
        .await
        .unwrap();

    assert!(body.contains("Rework parser"));
    assert!(body.contains("In Review"));
    assert!(body.contains("From @carol/parser to main"));
}
