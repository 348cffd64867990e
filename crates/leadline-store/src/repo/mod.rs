use crate::error::{Result, StoreError};
use chrono::NaiveDate;

pub mod activity;
pub mod intake;
pub mod interactions;
pub mod leads;
pub mod listings;
pub mod staff;

pub use activity::{ActivityNew, ActivityRepo};
pub use intake::{BrochureRequestNew, IntakeOutcome, IntakeRepo, QueryNew};
pub use interactions::{InteractionNew, InteractionsRepo};
pub use leads::{LeadsRepo, ReconcileRequest};
pub use listings::{ListingNew, ListingsRepo};
pub use staff::{StaffNew, StaffRepo};

/// Day-granular dates are stored as ISO-8601 text so they compare
/// lexicographically in SQL.
pub(crate) fn date_to_sql(date: Option<NaiveDate>) -> Option<String> {
    date.map(|value| value.format("%Y-%m-%d").to_string())
}

pub(crate) fn date_from_sql(raw: Option<String>) -> Result<Option<NaiveDate>> {
    match raw {
        Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| StoreError::InvalidDate(value)),
        None => Ok(None),
    }
}
