//! Relevance scorer for discovered places.
//!
//! A fixed 10-point system: name keywords are worth 5, photo-content
//! matches up to 5 more. Deterministic, no I/O.

use leadscout_places::PlaceDetail;

use crate::types::Tier;

/// Name keywords worth 5 points. Matched as substrings of the lowercased
/// place name, so "installment" matches "install" — that permissiveness is
/// intentional and relied on by existing result sets.
const NAME_KEYWORDS: &[&str] = &["truck", "atv", "install", "installation"];

/// Photo labels indicating garage bays / repair shops (+2).
const GARAGE_BAY_LABELS: &[&str] = &[
    "garage door",
    "automotive repair shop",
    "auto part",
    "vehicle repair",
    "service bay",
];

/// Photo labels indicating trucks on premises (+2).
const TRUCK_LABELS: &[&str] = &["truck", "pickup truck", "commercial vehicle", "monster truck"];

/// Photo labels indicating a retail showroom (+1).
const SHOWROOM_LABELS: &[&str] = &[
    "retail",
    "showroom",
    "display case",
    "store",
    "shelf",
    "merchandise",
];

/// Computes the raw 0–10 relevance score.
///
/// The three image checks are independent — all can fire on one label set.
/// `_query` is accepted for interface stability; reserved for future
/// semantic matching.
#[must_use]
pub fn raw_score(detail: &PlaceDetail, image_labels: &[String], _query: &str) -> u8 {
    let mut raw = 0u8;

    let name = detail.name.as_deref().unwrap_or("").to_lowercase();
    if NAME_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        raw += 5;
    }

    if !image_labels.is_empty() {
        let any_match =
            |fixed: &[&str]| fixed.iter().any(|f| image_labels.iter().any(|l| l == f));

        if any_match(GARAGE_BAY_LABELS) {
            raw += 2;
        }
        if any_match(TRUCK_LABELS) {
            raw += 2;
        }
        if any_match(SHOWROOM_LABELS) {
            raw += 1;
        }
    }

    raw
}

/// Scores a candidate and converts to its tier.
#[must_use]
pub fn score(detail: &PlaceDetail, image_labels: &[String], query: &str) -> Tier {
    Tier::from_raw(raw_score(detail, image_labels, query))
}
