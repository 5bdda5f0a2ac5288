//! Ordered result collection with export-selection flags.

use std::collections::HashSet;

use crate::export::ExportRecord;
use crate::types::ScoredCandidate;

/// Accumulated scored candidates, ordered best-first: tier 1 before 2
/// before 3, ties broken by higher raw score, then by discovery order.
///
/// Selection flags are owned here, keyed by `place_id`, not on the
/// candidates themselves — candidates stay immutable after creation.
#[derive(Debug, Default)]
pub struct ResultSet {
    candidates: Vec<ScoredCandidate>,
    selected: HashSet<String>,
}

impl ResultSet {
    #[must_use]
    pub fn new(mut candidates: Vec<ScoredCandidate>) -> Self {
        // Stable sort: discovery order breaks remaining ties.
        candidates.sort_by(|a, b| {
            a.tier
                .cmp(&b.tier)
                .then_with(|| b.raw_score.cmp(&a.raw_score))
        });
        Self {
            candidates,
            selected: HashSet::new(),
        }
    }

    #[must_use]
    pub fn all(&self) -> &[ScoredCandidate] {
        &self.candidates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Flags a candidate for export. Returns `false` for an unknown id.
    pub fn select(&mut self, place_id: &str) -> bool {
        if self.candidates.iter().any(|c| c.place_id == place_id) {
            self.selected.insert(place_id.to_owned());
            true
        } else {
            false
        }
    }

    /// Clears a candidate's export flag. Returns `false` if it was not set.
    pub fn deselect(&mut self, place_id: &str) -> bool {
        self.selected.remove(place_id)
    }

    pub fn select_all(&mut self) {
        for candidate in &self.candidates {
            self.selected.insert(candidate.place_id.clone());
        }
    }

    /// Flagged candidates, in result order.
    #[must_use]
    pub fn selected(&self) -> Vec<&ScoredCandidate> {
        self.candidates
            .iter()
            .filter(|c| self.selected.contains(&c.place_id))
            .collect()
    }

    /// Export projection of the flagged candidates, in result order.
    #[must_use]
    pub fn export_records(&self) -> Vec<ExportRecord> {
        self.selected()
            .into_iter()
            .map(ExportRecord::from_candidate)
            .collect()
    }
}
