//! Domain types for the places directory and image-label services.

use serde::Deserialize;

/// A geographic coordinate pair produced by the geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Minimal search-result record. `place_id` is the global dedup key and
/// the handle into the detail service; `name` is kept for diagnostics only.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// An opaque photo reference usable with the photo endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoRef {
    pub photo_reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EditorialSummary {
    #[serde(default)]
    pub overview: Option<String>,
}

/// Enriched place record. Every field the directory may omit is optional;
/// sequences default to empty. Immutable once fetched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetail {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub editorial_summary: Option<EditorialSummary>,
}

impl PlaceDetail {
    /// True when the detail service returned an empty record — treated the
    /// same as no record at all by callers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.place_id.is_none() && self.name.is_none() && self.formatted_address.is_none()
    }
}
