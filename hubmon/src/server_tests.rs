use super::*;
use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

#[test]
fn test_split_targets_basic() {
    assert_eq!(
        split_targets("org1,org2"),
        vec!["org1".to_string(), "org2".to_string()]
    );
}

#[test]
fn test_split_targets_trims_whitespace() {
    assert_eq!(
        split_targets(" org1 , org2 "),
        vec!["org1".to_string(), "org2".to_string()]
    );
}

#[test]
fn test_split_targets_drops_empty_entries() {
    assert_eq!(split_targets(""), Vec::<String>::new());
    assert_eq!(split_targets(",,"), Vec::<String>::new());
    assert_eq!(split_targets("org1,,org2"), vec!["org1", "org2"]);
}

#[test]
fn test_normalize_path() {
    assert_eq!(normalize_path("/metrics"), "/metrics");
    assert_eq!(normalize_path("metrics"), "/metrics");
}

#[test]
fn test_landing_page_links_metrics_path() {
    let page = landing_page("/metrics");
    assert!(page.contains("<title>Docker Hub Exporter</title>"));
    assert!(page.contains("href='/metrics'"));
}

fn test_exporter(base_url: &str) -> Exporter {
    Exporter::builder()
        .images(vec!["a/x".to_string()])
        .base_url(base_url)
        .timeout_seconds(2)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_index_serves_landing_page() {
    let server = mockito::Server::new_async().await;
    let app = router(test_exporter(&server.url()), "/metrics");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Docker Hub Prometheus Metrics Exporter"));
    assert!(html.contains("href='/metrics'"));
}

#[tokio::test]
async fn test_metrics_endpoint_serves_snapshot() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/a/x")
        .with_status(200)
        .with_body(r#"{"name": "x", "user": "a", "star_count": 2}"#)
        .create_async()
        .await;

    let app = router(test_exporter(&server.url()), "/metrics");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains(r#"docker_hub_image_stars{image="x",user="a"} 2"#));
}

#[tokio::test]
async fn test_metrics_endpoint_with_all_targets_failing_still_responds() {
    // Nothing mocked: the image fetch 501s into a decode failure, the
    // scrape is sparse, and the endpoint still answers 200.
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/a/x")
        .with_status(501)
        .with_body("not implemented")
        .create_async()
        .await;

    let app = router(test_exporter(&server.url()), "/metrics");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!text.contains("docker_hub_image_stars{"));
}

#[tokio::test]
async fn test_custom_telemetry_path() {
    let server = mockito::Server::new_async().await;
    let app = router(test_exporter(&server.url()), "probe");

    // The un-normalized path must still be routable with a leading slash,
    // and the landing page must point at it.
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("href='/probe'"));

    let response = app
        .oneshot(Request::builder().uri("/probe").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
