use super::*;
use crate::client::ClientConfig;

fn registry_for(server: &mockito::Server) -> HubRegistry {
    let config = ClientConfig::new().with_timeout(2);
    let client = Client::with_config(&server.url(), config).unwrap();
    HubRegistry::new(client)
}

#[test]
fn test_registry_new_and_base_url() {
    let client = Client::new("https://hub.docker.com/v2/repositories").unwrap();
    let registry = HubRegistry::new(client);
    assert_eq!(
        registry.base_url(),
        "https://hub.docker.com/v2/repositories"
    );
}

#[tokio::test]
async fn test_fetch_image() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/library/nginx")
        .with_status(200)
        .with_body(r#"{"name": "nginx", "user": "library", "star_count": 9, "pull_count": 77}"#)
        .create_async()
        .await;

    let registry = registry_for(&server);
    let image = registry.fetch_image("library/nginx").await.unwrap();

    mock.assert_async().await;
    assert_eq!(image.name, "nginx");
    assert_eq!(image.user, "library");
    assert_eq!(image.star_count, 9.0);
    assert_eq!(image.pull_count, 77);
}

#[tokio::test]
async fn test_fetch_image_malformed_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/library/broken")
        .with_status(200)
        .with_body("<html>gateway error</html>")
        .create_async()
        .await;

    let registry = registry_for(&server);
    let result = registry.fetch_image("library/broken").await;

    assert!(matches!(result.unwrap_err(), HubmonError::Decode { .. }));
}

#[tokio::test]
async fn test_fetch_organisation_single_page() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/myorg")
        .with_status(200)
        .with_body(
            r#"{"count": 2, "next": null, "previous": null, "results": [
                {"name": "a", "user": "myorg"},
                {"name": "b", "user": "myorg"}
            ]}"#,
        )
        .create_async()
        .await;

    let registry = registry_for(&server);
    let pages = registry.fetch_organisation("myorg").await.unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].results.len(), 2);
}

#[tokio::test]
async fn test_fetch_organisation_concatenates_pages_in_order() {
    let mut server = mockito::Server::new_async().await;
    let page2_url = format!("{}/myorg-page2", server.url());
    let page3_url = format!("{}/myorg-page3", server.url());

    server
        .mock("GET", "/myorg")
        .with_status(200)
        .with_body(format!(
            r#"{{"count": 3, "next": "{}", "results": [{{"name": "a", "user": "myorg"}}]}}"#,
            page2_url
        ))
        .create_async()
        .await;
    server
        .mock("GET", "/myorg-page2")
        .with_status(200)
        .with_body(format!(
            r#"{{"count": 3, "next": "{}", "results": [{{"name": "b", "user": "myorg"}}]}}"#,
            page3_url
        ))
        .create_async()
        .await;
    server
        .mock("GET", "/myorg-page3")
        .with_status(200)
        .with_body(r#"{"count": 3, "next": null, "results": [{"name": "c", "user": "myorg"}]}"#)
        .create_async()
        .await;

    let registry = registry_for(&server);
    let pages = registry.fetch_organisation("myorg").await.unwrap();

    assert_eq!(pages.len(), 3);
    let names: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.results.iter().map(|r| r.name.as_str()))
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_fetch_organisation_zero_count_is_no_results() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/ghost")
        .with_status(200)
        .with_body(r#"{"count": 0, "next": null, "results": []}"#)
        .create_async()
        .await;

    let registry = registry_for(&server);
    let result = registry.fetch_organisation("ghost").await;

    match result.unwrap_err() {
        HubmonError::NoResults { url } => assert!(url.ends_with("/ghost")),
        other => panic!("expected NoResults, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_organisation_empty_results_is_no_results() {
    // count can be non-zero while the page is still empty; both shapes are
    // terminal.
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/empty")
        .with_status(200)
        .with_body(r#"{"count": 5, "next": null, "results": []}"#)
        .create_async()
        .await;

    let registry = registry_for(&server);
    let result = registry.fetch_organisation("empty").await;

    assert!(matches!(result.unwrap_err(), HubmonError::NoResults { .. }));
}

#[tokio::test]
async fn test_fetch_organisation_bounds_self_referential_next() {
    // The page points at itself as "next"; the loop must stop at MAX_PAGES
    // and return what it has instead of spinning forever.
    let mut server = mockito::Server::new_async().await;
    let self_url = format!("{}/loop", server.url());
    server
        .mock("GET", "/loop")
        .with_status(200)
        .with_body(format!(
            r#"{{"count": 1, "next": "{}", "results": [{{"name": "a", "user": "loop"}}]}}"#,
            self_url
        ))
        .expect(MAX_PAGES)
        .create_async()
        .await;

    let registry = registry_for(&server);
    let pages = registry.fetch_organisation("loop").await.unwrap();

    assert_eq!(pages.len(), MAX_PAGES);
}
