use crate::domain::ids::LeadId;
use crate::domain::phone::ensure_normalized_phone;
use crate::error::CoreError;
use crate::rules::validation::{MAX_NOTE_LEN, MIN_NAME_LEN};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Interested,
    SiteVisitScheduled,
    Converted,
    Lost,
}

impl LeadStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Interested => "interested",
            LeadStatus::SiteVisitScheduled => "site_visit_scheduled",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Interested => "Interested",
            LeadStatus::SiteVisitScheduled => "Site Visit Scheduled",
            LeadStatus::Converted => "Converted",
            LeadStatus::Lost => "Lost",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(LeadStatus::New),
            "contacted" => Some(LeadStatus::Contacted),
            "interested" => Some(LeadStatus::Interested),
            "site_visit_scheduled" => Some(LeadStatus::SiteVisitScheduled),
            "converted" => Some(LeadStatus::Converted),
            "lost" => Some(LeadStatus::Lost),
            _ => None,
        }
    }

    pub const fn all() -> &'static [LeadStatus] {
        &[
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::Interested,
            LeadStatus::SiteVisitScheduled,
            LeadStatus::Converted,
            LeadStatus::Lost,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTemperature {
    Cold,
    Warm,
    Hot,
}

impl LeadTemperature {
    pub const fn as_str(self) -> &'static str {
        match self {
            LeadTemperature::Cold => "cold",
            LeadTemperature::Warm => "warm",
            LeadTemperature::Hot => "hot",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cold" => Some(LeadTemperature::Cold),
            "warm" => Some(LeadTemperature::Warm),
            "hot" => Some(LeadTemperature::Hot),
            _ => None,
        }
    }

    const fn rank(self) -> u8 {
        match self {
            LeadTemperature::Cold => 0,
            LeadTemperature::Warm => 1,
            LeadTemperature::Hot => 2,
        }
    }

    /// Temperature only ever moves Cold -> Warm -> Hot; an escalation to a
    /// cooler value is a no-op.
    pub fn escalate(self, target: LeadTemperature) -> LeadTemperature {
        if target.rank() > self.rank() {
            target
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
    pub lead_source: String,
    pub status: LeadStatus,
    pub temperature: LeadTemperature,
    pub last_contact_date: Option<NaiveDate>,
    pub next_action_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Lead {
    pub fn validate(&self) -> Result<(), CoreError> {
        ensure_normalized_phone(&self.phone)?;

        if self.name.trim().chars().count() < MIN_NAME_LEN {
            return Err(CoreError::InvalidName);
        }

        if let Some(notes) = self.notes.as_deref() {
            if notes.chars().count() > MAX_NOTE_LEN {
                return Err(CoreError::NoteTooLong(notes.chars().count()));
            }
        }

        Ok(())
    }
}
