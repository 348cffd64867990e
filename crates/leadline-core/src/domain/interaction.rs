use crate::domain::ids::{InteractionId, LeadId, ListingId, StaffId};
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot title recorded when an interaction references no listing.
pub const GENERAL_INQUIRY: &str = "General Inquiry";

/// First-touch channel stamped on brochure downloads.
pub const BROCHURE_SOURCE: &str = "Brochure Download";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Brochure,
    Query,
    Call,
    SiteVisit,
    Meeting,
    Email,
    Other(String),
}

impl InteractionKind {
    pub fn other(label: &str) -> Result<Self, CoreError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInteractionKindLabel);
        }
        Ok(Self::Other(trimmed.to_ascii_lowercase()))
    }

    pub fn is_site_visit(&self) -> bool {
        matches!(self, InteractionKind::SiteVisit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: InteractionId,
    pub lead_id: Option<LeadId>,
    pub phone: String,
    pub listing_id: Option<ListingId>,
    pub kind: InteractionKind,
    pub source: Option<String>,
    pub message: Option<String>,
    pub property_name: String,
    pub caller_id: Option<StaffId>,
    pub next_action: Option<String>,
    pub next_follow_up_date: Option<NaiveDate>,
    pub site_visit_status: Option<String>,
    pub created_at: i64,
}
