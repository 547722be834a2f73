pub mod classify;
pub mod criteria;
pub mod record;
pub mod summary;

pub use classify::{DEFAULT_INCLUDE, Keywords};
pub use criteria::{ALL_CATEGORIES, FilterCriteria, IncidentMatch};
pub use record::{AwardRecord, ResultSet, SELECT_FIELDS};
pub use summary::{UtilitySummary, summarize, top_utilities};
