//! Core domain types for the discovery pipeline.

use leadscout_places::PlaceDetail;

/// Ordinal relevance classification derived from the raw 0–10 score.
/// `Top` sorts before `Mid` sorts before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Top = 1,
    Mid = 2,
    Low = 3,
}

impl Tier {
    /// Converts a raw score to its tier: `>= 7` top, `>= 4` mid, else low.
    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        if raw >= 7 {
            Tier::Top
        } else if raw >= 4 {
            Tier::Mid
        } else {
            Tier::Low
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Tier::Top => 1,
            Tier::Mid => 2,
            Tier::Low => 3,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A discovered place after enrichment, account resolution, and scoring.
/// Immutable after creation; the export-selection flag lives outside, in
/// [`crate::ResultSet`], keyed by `place_id`.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// Dedup key for the run; also keys the selection flags.
    pub place_id: String,
    pub tier: Tier,
    pub raw_score: u8,
    pub detail: PlaceDetail,
    /// Durable photo URLs, at most 3.
    pub image_urls: Vec<String>,
    /// Deduplicated label set from the first analyzable photo, first-seen order.
    pub image_labels: Vec<String>,
    pub account_type: String,
}
