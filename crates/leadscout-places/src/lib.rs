pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::{EditorialSummary, GeoPoint, PhotoRef, PlaceDetail, PlaceSummary};
