//! Integration tests for `PlacesClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no
//! real network traffic is made. Covers the happy paths, empty results,
//! error statuses, and malformed bodies for every endpoint.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leadscout_places::{GeoPoint, PlacesClient, PlacesError};

/// Builds a `PlacesClient` pointed at the mock server: 5-second timeout, no retries.
fn test_client(server: &MockServer) -> PlacesClient {
    PlacesClient::new("test-key", 5, "leadscout-test/0.1", 0, 0)
        .expect("failed to build test PlacesClient")
        .with_base_urls(&server.uri(), &server.uri())
}

// ---------------------------------------------------------------------------
// geocode
// ---------------------------------------------------------------------------

#[tokio::test]
async fn geocode_returns_point_from_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", "37204"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "results": [
                {"geometry": {"location": {"lat": 36.1, "lng": -86.77}}},
                {"geometry": {"location": {"lat": 0.0, "lng": 0.0}}}
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let point = client.geocode("37204").await.unwrap();

    assert_eq!(
        point,
        Some(GeoPoint {
            lat: 36.1,
            lng: -86.77
        })
    );
}

#[tokio::test]
async fn geocode_returns_none_when_no_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"results": []})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert_eq!(client.geocode("00000").await.unwrap(), None);
}

#[tokio::test]
async fn geocode_propagates_server_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.geocode("37204").await;

    assert!(
        matches!(result, Err(PlacesError::HttpStatus { status: 500, .. })),
        "expected HttpStatus(500), got: {result:?}"
    );
}

#[tokio::test]
async fn geocode_retries_rate_limited_then_succeeds() {
    let server = MockServer::start().await;

    // First request is rate limited, every later one succeeds.
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "results": [{"geometry": {"location": {"lat": 1.0, "lng": 2.0}}}]
        })))
        .mount(&server)
        .await;

    let client = PlacesClient::new("test-key", 5, "leadscout-test/0.1", 2, 0)
        .expect("failed to build test PlacesClient")
        .with_base_urls(&server.uri(), &server.uri());

    let point = client.geocode("37204").await.unwrap();
    assert_eq!(point, Some(GeoPoint { lat: 1.0, lng: 2.0 }));
}

// ---------------------------------------------------------------------------
// text_search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn text_search_returns_summaries_in_provider_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .and(query_param("query", "truck accessories"))
        .and(query_param("location", "36.1,-86.77"))
        .and(query_param("radius", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "results": [
                {"place_id": "p1", "name": "First"},
                {"place_id": "p2", "name": "Second"}
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let center = GeoPoint {
        lat: 36.1,
        lng: -86.77,
    };
    let summaries = client
        .text_search("truck accessories", center, 5000)
        .await
        .unwrap();

    let ids: Vec<&str> = summaries.iter().map(|s| s.place_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[tokio::test]
async fn text_search_returns_empty_for_no_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"results": []})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let center = GeoPoint { lat: 0.0, lng: 0.0 };
    assert!(client
        .text_search("anything", center, 5000)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// place_details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn place_details_parses_full_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .and(query_param("place_id", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "result": {
                "place_id": "p1",
                "name": "Bob's Truck Install",
                "formatted_address": "123 Main St, Nashville, TN 37204, USA",
                "formatted_phone_number": "(615) 555-0100",
                "website": "https://bobstrucks.example",
                "photos": [
                    {"photo_reference": "ref1"},
                    {"photo_reference": "ref2"}
                ],
                "types": ["car_repair", "store"],
                "editorial_summary": {"overview": "Truck accessory installer."}
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let detail = client.place_details("p1").await.unwrap().unwrap();

    assert_eq!(detail.place_id.as_deref(), Some("p1"));
    assert_eq!(detail.name.as_deref(), Some("Bob's Truck Install"));
    assert_eq!(detail.photos.len(), 2);
    assert_eq!(detail.photos[0].photo_reference, "ref1");
    assert_eq!(detail.types, vec!["car_repair", "store"]);
    assert_eq!(
        detail.editorial_summary.unwrap().overview.as_deref(),
        Some("Truck accessory installer.")
    );
}

#[tokio::test]
async fn place_details_treats_empty_result_object_as_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"result": {}})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.place_details("p1").await.unwrap().is_none());
}

#[tokio::test]
async fn place_details_treats_missing_result_as_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({"status": "NOT_FOUND"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.place_details("gone").await.unwrap().is_none());
}

#[tokio::test]
async fn place_details_surfaces_malformed_body_as_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.place_details("p1").await;

    assert!(
        matches!(result, Err(PlacesError::Deserialize { .. })),
        "expected Deserialize error, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// fetch_photo
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_photo_returns_raw_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/photo"))
        .and(query_param("photoreference", "ref1"))
        .and(query_param("maxwidth", "800"))
        .respond_with(
            ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let bytes = client.fetch_photo("ref1", 800).await.unwrap();
    assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
}

#[tokio::test]
async fn fetch_photo_propagates_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/photo"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_photo("gone", 800).await;

    assert!(
        matches!(result, Err(PlacesError::HttpStatus { status: 404, .. })),
        "expected HttpStatus(404), got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// label_image
// ---------------------------------------------------------------------------

#[tokio::test]
async fn label_image_lowercases_descriptions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/images:annotate"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "requests": [{"features": [{"type": "LABEL_DETECTION"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "responses": [{
                "labelAnnotations": [
                    {"description": "Pickup Truck"},
                    {"description": "Garage Door"}
                ]
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let labels = client.label_image(&[1, 2, 3]).await.unwrap();
    assert_eq!(labels, vec!["pickup truck", "garage door"]);
}

#[tokio::test]
async fn label_image_returns_empty_for_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/images:annotate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"responses": []})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.label_image(&[1, 2, 3]).await.unwrap().is_empty());
}

#[tokio::test]
async fn label_image_propagates_provider_failure_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/images:annotate"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.label_image(&[1, 2, 3]).await;

    assert!(
        matches!(result, Err(PlacesError::HttpStatus { status: 403, .. })),
        "expected HttpStatus(403), got: {result:?}"
    );
}
