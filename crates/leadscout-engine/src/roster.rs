//! Known-accounts roster loading and candidate matching.
//!
//! Two independent lookup keys are derived from the roster: an exact
//! `place_id` index and a composite `(address prefix, zipcode)` index.
//! Resolution returns a tagged [`RosterMatch`] so the priority order
//! (id match, then address+zip match, then unmatched) is enforced by
//! structure rather than code order.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use leadscout_places::PlaceDetail;

/// Account-type label for candidates matching neither index.
pub const NEW_ACCOUNT_LABEL: &str = "New";

/// Label assigned to rows from the legacy id-only roster schema, which
/// carried no account-type column.
const LEGACY_ACCOUNT_LABEL: &str = "Existing";

/// Characters of the normalized address used in the composite key.
const ADDRESS_KEY_LEN: usize = 6;

/// One roster row. Every column is optional — rows contribute to whichever
/// indices their populated fields allow.
#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    addr: Option<String>,
    #[serde(default)]
    zipcode: Option<String>,
    #[serde(default)]
    sap_account_type: Option<String>,
}

/// Outcome of resolving a candidate against the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterMatch {
    /// Exact `place_id` hit. Always wins.
    MatchedById(String),
    /// Composite address-prefix + zipcode hit.
    MatchedByAddress(String),
    Unmatched,
}

impl RosterMatch {
    /// The account-type label for this outcome; [`NEW_ACCOUNT_LABEL`] when unmatched.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            RosterMatch::MatchedById(label) | RosterMatch::MatchedByAddress(label) => label,
            RosterMatch::Unmatched => NEW_ACCOUNT_LABEL,
        }
    }
}

/// The loaded roster: two lookup indices, built once per run.
#[derive(Debug, Default)]
pub struct RosterIndex {
    by_place_id: HashMap<String, String>,
    by_address_zip: HashMap<(String, String), String>,
}

impl RosterIndex {
    /// Loads the roster from a CSV file. A missing or unreadable file is
    /// not an error — it yields empty indices and every candidate
    /// classifies as [`NEW_ACCOUNT_LABEL`].
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::File::open(path) {
            Ok(file) => Self::from_reader(file),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "roster file unavailable — candidates will classify as New"
                );
                Self::default()
            }
        }
    }

    /// Builds the indices from CSV data. Malformed rows are skipped with a
    /// warning, never fatal to the whole load.
    pub fn from_reader<R: Read>(reader: R) -> Self {
        let mut index = Self::default();
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        for row in csv_reader.deserialize::<RosterRow>() {
            match row {
                Ok(row) => index.insert_row(row),
                Err(e) => tracing::warn!(error = %e, "skipping malformed roster row"),
            }
        }
        tracing::debug!(
            by_place_id = index.by_place_id.len(),
            by_address_zip = index.by_address_zip.len(),
            "roster indices loaded"
        );
        index
    }

    fn insert_row(&mut self, row: RosterRow) {
        let account_type = row
            .sap_account_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if let Some(place_id) = row
            .place_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let label = account_type.unwrap_or(LEGACY_ACCOUNT_LABEL);
            self.by_place_id
                .insert(place_id.to_owned(), label.to_owned());
        }

        if let (Some(addr), Some(zip), Some(label)) =
            (row.addr.as_deref(), row.zipcode.as_deref(), account_type)
        {
            let zip = zip.trim();
            if !addr.trim().is_empty() && !zip.is_empty() {
                self.by_address_zip
                    .insert((address_key(addr), zip.to_owned()), label.to_owned());
            }
        }
    }

    /// Resolves a candidate detail record to its roster match.
    ///
    /// Pure lookup: tolerates missing fields and never panics on malformed
    /// input — anything unresolvable degrades to `Unmatched`.
    #[must_use]
    pub fn resolve(&self, detail: &PlaceDetail) -> RosterMatch {
        if let Some(place_id) = detail.place_id.as_deref() {
            if let Some(label) = self.by_place_id.get(place_id) {
                return RosterMatch::MatchedById(label.clone());
            }
        }

        if let Some(address) = detail.formatted_address.as_deref() {
            if let Some(zip) = extract_zip(address) {
                if let Some(label) = self.by_address_zip.get(&(address_key(address), zip)) {
                    return RosterMatch::MatchedByAddress(label.clone());
                }
            }
        }

        RosterMatch::Unmatched
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_place_id.is_empty() && self.by_address_zip.is_empty()
    }
}

/// Normalized address prefix: lowercase, whitespace-trimmed, first
/// [`ADDRESS_KEY_LEN`] characters.
fn address_key(address: &str) -> String {
    address
        .trim()
        .to_lowercase()
        .chars()
        .take(ADDRESS_KEY_LEN)
        .collect()
}

/// First standalone 5-digit run anywhere in the address, left-to-right.
///
/// Street and suite numbers can collide with this; the heuristic is kept
/// as-is for compatibility with existing roster data.
fn extract_zip(address: &str) -> Option<String> {
    let re = Regex::new(r"\b\d{5}\b").expect("valid regex");
    re.find(address).map(|m| m.as_str().to_owned())
}
