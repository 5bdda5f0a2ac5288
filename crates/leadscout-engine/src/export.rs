//! Flat export projection for scored candidates.

use std::io::Write;

use serde::Serialize;

use crate::error::ExportError;
use crate::types::ScoredCandidate;

/// Column headers, in the stable export order.
const HEADERS: [&str; 13] = [
    "Name",
    "Account_Type",
    "Score",
    "Address",
    "Phone",
    "Website",
    "PlaceID",
    "Description",
    "Google_Types",
    "Detected_Image_Keywords",
    "Image_URL_1",
    "Image_URL_2",
    "Image_URL_3",
];

/// One export row. Missing values are empty strings; field order matches
/// [`HEADERS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    pub name: String,
    pub account_type: String,
    pub score: u8,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub place_id: String,
    pub description: String,
    /// Comma-joined category tags.
    pub types: String,
    /// Comma-joined detected image labels.
    pub image_keywords: String,
    pub image_url_1: String,
    pub image_url_2: String,
    pub image_url_3: String,
}

impl ExportRecord {
    #[must_use]
    pub fn from_candidate(candidate: &ScoredCandidate) -> Self {
        let detail = &candidate.detail;
        let url = |i: usize| candidate.image_urls.get(i).cloned().unwrap_or_default();
        Self {
            name: detail.name.clone().unwrap_or_default(),
            account_type: candidate.account_type.clone(),
            score: candidate.tier.as_u8(),
            address: detail.formatted_address.clone().unwrap_or_default(),
            phone: detail.formatted_phone_number.clone().unwrap_or_default(),
            website: detail.website.clone().unwrap_or_default(),
            place_id: detail
                .place_id
                .clone()
                .unwrap_or_else(|| candidate.place_id.clone()),
            description: detail
                .editorial_summary
                .as_ref()
                .and_then(|s| s.overview.clone())
                .unwrap_or_default(),
            types: detail.types.join(", "),
            image_keywords: candidate.image_labels.join(", "),
            image_url_1: url(0),
            image_url_2: url(1),
            image_url_3: url(2),
        }
    }
}

/// Writes records as UTF-8 CSV. The header row is always emitted, even
/// for an empty record list, so the column order is stable across runs.
///
/// # Errors
///
/// Returns [`ExportError`] on CSV serialization or I/O failure.
pub fn write_csv<W: Write>(records: &[ExportRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
