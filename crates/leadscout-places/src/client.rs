use std::time::Duration;

use base64::Engine;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::Deserialize;

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{GeoPoint, PlaceDetail, PlaceSummary};

const MAPS_BASE_URL: &str = "https://maps.googleapis.com";
const VISION_BASE_URL: &str = "https://vision.googleapis.com";

/// Detail fields requested from the place detail endpoint.
const DETAIL_FIELDS: &str =
    "name,formatted_address,formatted_phone_number,website,place_id,photo,editorial_summary,types";

/// Maximum labels requested per image annotation.
const LABEL_MAX_RESULTS: u32 = 10;

/// HTTP client for the geocoding, place search/detail, photo, and
/// image-label services.
///
/// All requests carry bounded request and connect timeouts. Transient
/// errors (network failures, HTTP 429) are retried with exponential
/// backoff up to `max_retries` additional attempts; with `max_retries = 0`
/// every failure is a one-shot error for the caller to skip.
pub struct PlacesClient {
    http: Client,
    api_key: String,
    maps_base_url: String,
    vision_base_url: String,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl PlacesClient {
    /// Creates a `PlacesClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, PlacesError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.to_owned(),
            maps_base_url: MAPS_BASE_URL.to_owned(),
            vision_base_url: VISION_BASE_URL.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Overrides the service base URLs. Used by tests to point the client
    /// at a local mock server.
    #[must_use]
    pub fn with_base_urls(mut self, maps_base_url: &str, vision_base_url: &str) -> Self {
        self.maps_base_url = maps_base_url.trim_end_matches('/').to_owned();
        self.vision_base_url = vision_base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Resolves a free-form area identifier (postal code or metro name) to
    /// a coordinate pair. Returns `Ok(None)` when the geocoder has no match.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] on network failure, non-2xx status, or a
    /// response body that does not parse.
    pub async fn geocode(&self, area: &str) -> Result<Option<GeoPoint>, PlacesError> {
        let url = format!("{}/maps/api/geocode/json", self.maps_base_url);
        let envelope: GeocodeResponse = self
            .get_json(
                &url,
                &[("address", area), ("key", self.api_key.as_str())],
                "geocode response",
            )
            .await?;
        Ok(envelope
            .results
            .into_iter()
            .next()
            .map(|r| r.geometry.location))
    }

    /// Searches places matching `query` around `center` within `radius_m`
    /// meters. Returns the provider's result order unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] on network failure, non-2xx status, or a
    /// response body that does not parse.
    pub async fn text_search(
        &self,
        query: &str,
        center: GeoPoint,
        radius_m: u32,
    ) -> Result<Vec<PlaceSummary>, PlacesError> {
        let url = format!("{}/maps/api/place/textsearch/json", self.maps_base_url);
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_m.to_string();
        let envelope: SearchResponse = self
            .get_json(
                &url,
                &[
                    ("query", query),
                    ("location", location.as_str()),
                    ("radius", radius.as_str()),
                    ("key", self.api_key.as_str()),
                ],
                "place search response",
            )
            .await?;
        Ok(envelope.results)
    }

    /// Fetches the detail record for `place_id`. Returns `Ok(None)` when
    /// the detail service has no usable record for the id.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] on network failure, non-2xx status, or a
    /// response body that does not parse.
    pub async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetail>, PlacesError> {
        let url = format!("{}/maps/api/place/details/json", self.maps_base_url);
        let envelope: DetailsResponse = self
            .get_json(
                &url,
                &[
                    ("place_id", place_id),
                    ("fields", DETAIL_FIELDS),
                    ("key", self.api_key.as_str()),
                ],
                "place detail response",
            )
            .await?;
        Ok(envelope.result.filter(|d| !d.is_empty()))
    }

    /// Fetches the raw bytes of a place photo, scaled to at most
    /// `max_width` pixels wide.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] on network failure or non-2xx status.
    pub async fn fetch_photo(
        &self,
        photo_reference: &str,
        max_width: u32,
    ) -> Result<Vec<u8>, PlacesError> {
        let url = format!("{}/maps/api/place/photo", self.maps_base_url);
        let url = url.as_str();
        let width = max_width.to_string();
        let width = width.as_str();
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self
                .http
                .get(url)
                .query(&[
                    ("photoreference", photo_reference),
                    ("maxwidth", width),
                    ("key", self.api_key.as_str()),
                ])
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(PlacesError::HttpStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }
            Ok(response.bytes().await?.to_vec())
        })
        .await
    }

    /// Constructs the durable URL for a place photo. Pure — always
    /// constructible regardless of whether the photo bytes can be fetched.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        let encoded = utf8_percent_encode(photo_reference, NON_ALPHANUMERIC);
        format!(
            "{}/maps/api/place/photo?maxwidth={max_width}&photoreference={encoded}&key={}",
            self.maps_base_url, self.api_key
        )
    }

    /// Runs label detection on raw image bytes and returns the lowercased
    /// label descriptions.
    ///
    /// Callers treat any error as an empty label set — a label-service
    /// failure must never abort a discovery run.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] on network failure, non-2xx status, or a
    /// response body that does not parse.
    pub async fn label_image(&self, image_bytes: &[u8]) -> Result<Vec<String>, PlacesError> {
        let url = format!("{}/v1/images:annotate", self.vision_base_url);
        let url = url.as_str();
        let content = base64::engine::general_purpose::STANDARD.encode(image_bytes);
        let body = serde_json::json!({
            "requests": [{
                "image": { "content": content },
                "features": [{ "type": "LABEL_DETECTION", "maxResults": LABEL_MAX_RESULTS }]
            }]
        });
        let body = &body;

        let envelope: AnnotateResponse =
            retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
                let response = self
                    .http
                    .post(url)
                    .query(&[("key", self.api_key.as_str())])
                    .json(body)
                    .send()
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(PlacesError::HttpStatus {
                        status: status.as_u16(),
                        url: url.to_owned(),
                    });
                }
                let text = response.text().await?;
                serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
                    context: "image annotate response".to_owned(),
                    source: e,
                })
            })
            .await?;

        Ok(envelope
            .responses
            .into_iter()
            .next()
            .map(|r| r.label_annotations)
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.description.to_lowercase())
            .collect())
    }

    /// Shared GET-and-parse helper with retry, status checking, and typed
    /// deserialize errors carrying the response context.
    async fn get_json<T>(
        &self,
        url: &str,
        params: &[(&str, &str)],
        context: &str,
    ) -> Result<T, PlacesError>
    where
        T: serde::de::DeserializeOwned,
    {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self.http.get(url).query(params).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(PlacesError::HttpStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }
            let text = response.text().await?;
            serde_json::from_str::<T>(&text).map_err(|e| PlacesError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: GeoPoint,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<PlaceSummary>,
}

#[derive(Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    result: Option<PlaceDetail>,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateResult>,
}

#[derive(Deserialize)]
struct AnnotateResult {
    #[serde(default, rename = "labelAnnotations")]
    label_annotations: Vec<LabelAnnotation>,
}

#[derive(Deserialize)]
struct LabelAnnotation {
    description: String,
}
