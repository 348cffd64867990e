use crate::domain::{InteractionId, LeadId, LeadStatus, LeadTemperature, ListingId, StaffId};
use crate::rules::FollowUpState;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadListItemDto {
    pub id: LeadId,
    pub name: String,
    pub phone: String,
    pub status: LeadStatus,
    pub temperature: LeadTemperature,
    pub last_contact_date: Option<NaiveDate>,
    pub next_action_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionDto {
    pub id: InteractionId,
    pub kind: String,
    pub source: Option<String>,
    pub message: Option<String>,
    pub property_name: String,
    pub listing_id: Option<ListingId>,
    pub caller_id: Option<StaffId>,
    pub next_follow_up_date: Option<NaiveDate>,
    pub site_visit_status: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDetailDto {
    pub id: LeadId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub lead_source: String,
    pub status: LeadStatus,
    pub temperature: LeadTemperature,
    pub last_contact_date: Option<NaiveDate>,
    pub next_action_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub recent_interactions: Vec<InteractionDto>,
}

/// What the public intake paths hand back to the caller, mirroring the
/// contact-form response: a success flag, a human message and, for brochure
/// requests, the download URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeReceiptDto {
    pub success: bool,
    pub message: String,
    pub lead_id: LeadId,
    pub brochure_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorklistItemDto {
    pub id: LeadId,
    pub name: String,
    pub phone: String,
    pub status: LeadStatus,
    pub temperature: LeadTemperature,
    pub follow_up_state: FollowUpState,
    pub next_action_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorklistDto {
    pub overdue: Vec<WorklistItemDto>,
    pub today: Vec<WorklistItemDto>,
    pub soon: Vec<WorklistItemDto>,
}

impl WorklistDto {
    pub fn from_items(items: Vec<WorklistItemDto>) -> Self {
        let mut output = Self::default();
        for item in items {
            match item.follow_up_state {
                FollowUpState::Overdue => output.overdue.push(item),
                FollowUpState::Today => output.today.push(item),
                FollowUpState::Soon => output.soon.push(item),
                FollowUpState::Unscheduled | FollowUpState::Scheduled => {}
            }
        }
        output
    }

    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.today.is_empty() && self.soon.is_empty()
    }
}
