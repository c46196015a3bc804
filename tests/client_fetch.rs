// Tests for the listing backend client, against a mock HTTP server.
use scoutdesk::client::{FetchError, ScoutClient, SearchParams, UrlFetchRequest};
use scoutdesk::pipeline::normalize_all;

fn client_for(server: &mockito::ServerGuard) -> ScoutClient {
    ScoutClient::new(&server.url(), 5, false).unwrap()
}

#[tokio::test]
async fn test_fetch_success_returns_listings() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/api/fetch")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "rightmoveUrl": "https://www.rightmove.co.uk/property-for-sale/find.html?x=1"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"listings": [
                {"source": "rightmove", "title": "Flat", "price": "£250,000",
                 "undervaluePct": 24.5, "areaSqm": "61"},
                {"source": "rightmove", "title": "House", "price": 410000,
                 "undervaluePct": null}
            ]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let request = UrlFetchRequest {
        rightmove_url: Some(
            "https://www.rightmove.co.uk/property-for-sale/find.html?x=1".to_string(),
        ),
        zoopla_url: None,
    };

    let raw = client.fetch_by_urls(&request).await.unwrap();
    assert_eq!(raw.len(), 2);

    let listings = normalize_all(raw);
    assert_eq!(listings[0].price.get(), Some(250_000.0));
    assert_eq!(listings[0].undervalue_pct.get(), Some(24.5));
    assert_eq!(listings[1].price.get(), Some(410_000.0));
    assert_eq!(listings[1].undervalue_pct.get(), None);
}

#[tokio::test]
async fn test_missing_listings_array_is_empty_result() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/fetch")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server);
    let raw = client
        .fetch_by_urls(&UrlFetchRequest::default())
        .await
        .unwrap();
    assert!(raw.is_empty());
}

#[tokio::test]
async fn test_api_error_body_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/fetch")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "No portal URL provided"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_by_urls(&UrlFetchRequest::default())
        .await
        .unwrap_err();

    match err {
        FetchError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "No portal URL provided");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_page_yields_status_and_snippet() {
    let mut server = mockito::Server::new_async().await;
    let body = format!(
        "<html><head><title>502</title></head><body>{}</body></html>",
        "upstream exploded ".repeat(40)
    );
    let _mock = server
        .mock("POST", "/api/search-rightmove")
        .with_status(500)
        .with_header("content-type", "text/html")
        .with_body(&body)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.search(&SearchParams::default()).await.unwrap_err();

    match &err {
        FetchError::Http { status, snippet } => {
            assert_eq!(*status, 500);
            assert!(snippet.starts_with("<html>"));
            // Truncated, not the whole page.
            assert!(snippet.chars().count() < 200);
        }
        other => panic!("expected Http error, got {:?}", other),
    }

    // The rendered message carries both the status code and the snippet.
    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("<html>"));
}

#[tokio::test]
async fn test_search_params_serialize_camel_case_and_skip_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/search-rightmove")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "portal": "rightmove",
            "location": "Leeds",
            "radiusKm": 5.0,
            "minPrice": 100000,
            "maxPrice": 300000,
            "minBeds": 2
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"listings": []}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let params = SearchParams {
        portal: Some("rightmove".to_string()),
        location: Some("Leeds".to_string()),
        radius_km: Some(5.0),
        min_price: Some(100_000),
        max_price: Some(300_000),
        min_beds: Some(2),
        max_beds: None,
        property_type: None,
    };

    let raw = client.search(&params).await.unwrap();
    assert!(raw.is_empty());
}

#[tokio::test]
async fn test_transport_failure_is_reported() {
    // Nothing listens on this port.
    let client = ScoutClient::new("http://127.0.0.1:9", 2, false).unwrap();
    let err = client
        .fetch_by_urls(&UrlFetchRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
