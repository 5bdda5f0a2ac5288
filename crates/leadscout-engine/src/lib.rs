pub mod areas;
pub mod cache;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod result;
pub mod roster;
pub mod scorer;
pub mod types;

pub use areas::{load_zip_list, plan_areas, AreaKind, AreaPlan, SearchScope, TOP_100_METROS};
pub use error::{AreaError, ExportError};
pub use export::{write_csv, ExportRecord};
pub use pipeline::{discover, DiscoveryRequest};
pub use result::ResultSet;
pub use roster::{RosterIndex, RosterMatch};
pub use types::{ScoredCandidate, Tier};
