//! End-to-end tests for the page-rewrite surface against a mocked SPA
//! origin and a mocked API.

use serde_json::json;
use share_edge::config::EdgeConfig;

mod common;

const SHELL_PAGE: &str = concat!(
    "<html><head>",
    r#"<meta name="social" content="content"/>"#,
    "</head><body>app</body></html>",
);

async fn start_origin() -> std::net::SocketAddr {
    common::start_mock_server(|path| async move {
        match path.as_str() {
            "/app.js" => (200, "application/javascript", "console.log(1)".to_string()),
            _ => (200, "text/html; charset=utf-8", SHELL_PAGE.to_string()),
        }
    })
    .await
}

fn config_with(
    api_addr: std::net::SocketAddr,
    origin_addr: std::net::SocketAddr,
) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.api.base_url = format!("http://{api_addr}");
    config.upstream.origin = format!("http://{origin_addr}");
    config
}

#[tokio::test]
async fn test_project_page_head_is_rewritten() {
    let api_addr = common::start_mock_server(|path| async move {
        match path.as_str() {
            "/users/alice/projects/mylib" => (
                200,
                "application/json",
                json!({
                    "owner": { "handle": "alice" },
                    "slug": "mylib",
                    "summary": "A tiny library",
                })
                .to_string(),
            ),
            _ => (404, "text/plain", "Not Found".to_string()),
        }
    })
    .await;
    let origin_addr = start_origin().await;

    let edge = common::start_edge(config_with(api_addr, origin_addr)).await;
    let client = common::http_client();

    let response = client
        .get(format!("http://{edge}/@alice/mylib"))
        .send()
        .await
        .expect("edge unreachable");
    assert_eq!(response.status(), 200);

    let body = response.text().await.unwrap();
    assert!(!body.contains(r#"<meta name="social" content="content"/>"#));
    assert!(body.contains("<title>@alice/mylib | Share</title>"));
    assert!(body.contains(r#"content="A tiny library""#));
    assert!(body.contains("/social-image?path=/@alice/mylib"));
    assert!(body.contains("<body>app</body>"));
}

#[tokio::test]
async fn test_api_failure_still_serves_page_with_defaults() {
    let api_addr =
        common::start_mock_server(|_| async move { (404, "text/plain", "Not Found".to_string()) })
            .await;
    let origin_addr = start_origin().await;

    let config = config_with(api_addr, origin_addr);
    let default_title = config.social.default_title.clone();
    let edge = common::start_edge(config).await;
    let client = common::http_client();

    let response = client
        .get(format!("http://{edge}/@ghost/mylib"))
        .send()
        .await
        .expect("edge unreachable");
    assert_eq!(response.status(), 200);

    let body = response.text().await.unwrap();
    assert!(body.contains(&format!("<title>{default_title}</title>")));
    assert!(!body.contains(r#"<meta name="social" content="content"/>"#));
}

#[tokio::test]
async fn test_non_html_responses_pass_through_untouched() {
    let api_addr =
        common::start_mock_server(|_| async move { (404, "text/plain", "Not Found".to_string()) })
            .await;
    let origin_addr = start_origin().await;

    let edge = common::start_edge(config_with(api_addr, origin_addr)).await;
    let client = common::http_client();

    let response = client
        .get(format!("http://{edge}/app.js"))
        .send()
        .await
        .expect("edge unreachable");
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/javascript"
    );
    assert_eq!(response.text().await.unwrap(), "console.log(1)");
}

#[tokio::test]
async fn test_unreachable_origin_is_bad_gateway() {
    let api_addr =
        common::start_mock_server(|_| async move { (404, "text/plain", "Not Found".to_string()) })
            .await;

    // Reserve a port and release it so nothing is listening there.
    let parked = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let origin_addr = parked.local_addr().unwrap();
    drop(parked);

    let edge = common::start_edge(config_with(api_addr, origin_addr)).await;
    let client = common::http_client();

    let response = client
        .get(format!("http://{edge}/@alice/mylib"))
        .send()
        .await
        .expect("edge unreachable");
    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let api_addr =
        common::start_mock_server(|_| async move { (404, "text/plain", "Not Found".to_string()) })
            .await;
    let origin_addr = start_origin().await;

    let edge = common::start_edge(config_with(api_addr, origin_addr)).await;
    let client = common::http_client();

    let response = client
        .get(format!("http://{edge}/@alice"))
        .send()
        .await
        .expect("edge unreachable");
    assert!(response.headers().contains_key("x-request-id"));
}
