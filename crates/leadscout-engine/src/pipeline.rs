//! Discovery pipeline orchestration.
//!
//! Runs one discovery pass: per area, geocode → text search → global
//! de-dup → detail fetch → account resolution → exclusion filter → photo
//! and label enrichment → scoring → accumulation. Strictly sequential;
//! one request in flight at a time. Any single area/place/photo failure
//! is logged and skipped — only a missing area plan refuses a run, and
//! that is rejected by the area provider before this module is reached.

use std::collections::HashSet;

use leadscout_places::{GeoPoint, PlaceDetail, PlacesClient};

use crate::areas::AreaPlan;
use crate::cache::{content_key, MemoCache};
use crate::result::ResultSet;
use crate::roster::RosterIndex;
use crate::scorer;
use crate::types::{ScoredCandidate, Tier};

/// Photo references consumed per place.
const MAX_PHOTOS_PER_PLACE: usize = 3;

/// Parameters for one discovery pass.
#[derive(Debug, Clone)]
pub struct DiscoveryRequest<'a> {
    /// Free-text description of the business type being scouted.
    pub query: &'a str,
    pub plan: &'a AreaPlan,
    /// Stop as soon as this many non-excluded candidates are accumulated.
    pub max_results: usize,
    /// Account-type labels to discard. Excluded places still count as
    /// seen, so a later duplicate occurrence is not re-evaluated.
    pub excluded_account_types: &'a [String],
    pub photo_max_width: u32,
}

/// Mutable state for one run: the global de-dup set, the accumulator, and
/// the memo caches. Owned by a single `discover` invocation — concurrent
/// runs never share state.
struct RunContext {
    seen: HashSet<String>,
    results: Vec<ScoredCandidate>,
    geocode_cache: MemoCache<String, Option<GeoPoint>>,
    label_cache: MemoCache<String, Vec<String>>,
}

impl RunContext {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            results: Vec::new(),
            geocode_cache: MemoCache::new(),
            label_cache: MemoCache::new(),
        }
    }
}

/// Runs one discovery pass and returns the accumulated result set,
/// ordered best-first.
///
/// Terminates when `max_results` distinct non-excluded candidates have
/// been accumulated or when all areas are exhausted; partial results are
/// always returned.
pub async fn discover(
    client: &PlacesClient,
    roster: &RosterIndex,
    request: &DiscoveryRequest<'_>,
) -> ResultSet {
    let mut ctx = RunContext::new();

    'areas: for area in &request.plan.areas {
        if ctx.results.len() >= request.max_results {
            break;
        }
        tracing::info!(
            kind = request.plan.kind.as_str(),
            area = %area,
            found = ctx.results.len(),
            "searching area"
        );

        let Some(center) = geocode_area(client, &mut ctx.geocode_cache, area).await else {
            continue;
        };

        let summaries = match client
            .text_search(request.query, center, request.plan.radius_m)
            .await
        {
            Ok(summaries) => summaries,
            Err(e) => {
                tracing::warn!(area = %area, error = %e, "place search failed — skipping area");
                continue;
            }
        };

        for summary in summaries {
            if ctx.results.len() >= request.max_results {
                break 'areas;
            }
            if ctx.seen.contains(&summary.place_id) {
                continue;
            }

            let detail = match client.place_details(&summary.place_id).await {
                Ok(Some(detail)) => detail,
                Ok(None) => {
                    tracing::debug!(place_id = %summary.place_id, "no detail record — skipping place");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        place_id = %summary.place_id,
                        error = %e,
                        "detail fetch failed — skipping place"
                    );
                    continue;
                }
            };

            let account_type = roster.resolve(&detail).label().to_owned();
            if request
                .excluded_account_types
                .iter()
                .any(|t| t == &account_type)
            {
                // Counts as processed, not toward max_results.
                ctx.seen.insert(summary.place_id.clone());
                tracing::debug!(
                    place_id = %summary.place_id,
                    account_type = %account_type,
                    "excluded account type"
                );
                continue;
            }
            ctx.seen.insert(summary.place_id.clone());

            let (image_urls, image_labels) = collect_photo_media(
                client,
                &mut ctx.label_cache,
                &detail,
                request.photo_max_width,
            )
            .await;

            let raw = scorer::raw_score(&detail, &image_labels, request.query);
            ctx.results.push(ScoredCandidate {
                place_id: summary.place_id,
                tier: Tier::from_raw(raw),
                raw_score: raw,
                detail,
                image_urls,
                image_labels,
                account_type,
            });
        }
    }

    tracing::info!(
        found = ctx.results.len(),
        requested = request.max_results,
        "discovery pass complete"
    );
    ResultSet::new(ctx.results)
}

/// Geocodes an area through the run's memo cache. `None` (miss or error)
/// means the caller skips the area.
async fn geocode_area(
    client: &PlacesClient,
    cache: &mut MemoCache<String, Option<GeoPoint>>,
    area: &str,
) -> Option<GeoPoint> {
    if let Some(cached) = cache.get(area) {
        return *cached;
    }
    let resolved = match client.geocode(area).await {
        Ok(Some(point)) => Some(point),
        Ok(None) => {
            tracing::warn!(area, "area did not geocode — skipping");
            None
        }
        Err(e) => {
            tracing::warn!(area, error = %e, "geocode failed — skipping area");
            None
        }
    };
    cache.insert(area.to_owned(), resolved);
    resolved
}

/// Collects durable photo URLs for the first [`MAX_PHOTOS_PER_PLACE`]
/// photo references, fetching bytes best-effort, and runs label analysis
/// until the label set becomes non-empty. Later photos contribute only
/// their URL. The final label set is deduplicated, first-seen order.
async fn collect_photo_media(
    client: &PlacesClient,
    label_cache: &mut MemoCache<String, Vec<String>>,
    detail: &PlaceDetail,
    photo_max_width: u32,
) -> (Vec<String>, Vec<String>) {
    let mut urls = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    for photo in detail.photos.iter().take(MAX_PHOTOS_PER_PLACE) {
        urls.push(client.photo_url(&photo.photo_reference, photo_max_width));

        let bytes = match client.fetch_photo(&photo.photo_reference, photo_max_width).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, "photo fetch failed — URL kept, bytes skipped");
                continue;
            }
        };

        if labels.is_empty() {
            labels.extend(analyze_labels(client, label_cache, &bytes).await);
        }
    }

    let mut seen = HashSet::new();
    labels.retain(|label| seen.insert(label.clone()));
    (urls, labels)
}

/// Label analysis through the run's content-addressed memo cache. A
/// label-service failure degrades to an empty list with a diagnostic —
/// it never aborts the place.
async fn analyze_labels(
    client: &PlacesClient,
    cache: &mut MemoCache<String, Vec<String>>,
    bytes: &[u8],
) -> Vec<String> {
    let key = content_key(bytes);
    if let Some(cached) = cache.get(&key) {
        return cached.clone();
    }
    let labels = match client.label_image(bytes).await {
        Ok(labels) => labels,
        Err(e) => {
            tracing::warn!(error = %e, "image label service failed — treating as no labels");
            Vec::new()
        }
    };
    cache.insert(key, labels.clone());
    labels
}
