use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use leadline_core::domain::{InteractionKind, LeadId, LeadStatus, ListingId, PropertyType};
use std::str::FromStr;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date format: expected YYYY-MM-DD"))
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap())
        .with_timezone(&Local);
    dt.format("%Y-%m-%d %H:%M").to_string()
}

pub fn parse_lead_id(raw: &str) -> Result<LeadId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("lead id cannot be empty"));
    }
    LeadId::from_str(trimmed).map_err(|_| anyhow!("invalid lead id"))
}

pub fn parse_listing_id(raw: &str) -> Result<ListingId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("listing id cannot be empty"));
    }
    ListingId::from_str(trimmed).map_err(|_| anyhow!("invalid listing id"))
}

pub fn parse_lead_status(raw: &str) -> Result<LeadStatus> {
    let normalized = normalize_enum_token(raw);
    LeadStatus::parse(&normalized).ok_or_else(|| {
        anyhow!(
            "invalid lead status: expected one of {}",
            LeadStatus::all()
                .iter()
                .map(|status| status.as_str())
                .collect::<Vec<_>>()
                .join("|")
        )
    })
}

pub fn parse_property_type(raw: &str) -> Result<PropertyType> {
    let normalized = normalize_enum_token(raw);
    PropertyType::parse(&normalized).ok_or_else(|| {
        anyhow!("invalid property type: expected residential|commercial|plot|villa")
    })
}

pub fn parse_activity_kind(raw: &str) -> Result<InteractionKind> {
    let normalized = normalize_enum_token(raw);
    match normalized.as_str() {
        "call" => Ok(InteractionKind::Call),
        "site_visit" => Ok(InteractionKind::SiteVisit),
        "meeting" => Ok(InteractionKind::Meeting),
        "email" => Ok(InteractionKind::Email),
        _ => {
            if let Some(rest) = raw.trim().strip_prefix("other:") {
                return Ok(InteractionKind::other(rest)?);
            }
            Err(anyhow!(
                "invalid activity kind: expected call|site-visit|meeting|email|other:<label>"
            ))
        }
    }
}

pub fn format_interaction_kind(kind: &InteractionKind) -> String {
    match kind {
        InteractionKind::Brochure => "brochure".to_string(),
        InteractionKind::Query => "query".to_string(),
        InteractionKind::Call => "call".to_string(),
        InteractionKind::SiteVisit => "site-visit".to_string(),
        InteractionKind::Meeting => "meeting".to_string(),
        InteractionKind::Email => "email".to_string(),
        InteractionKind::Other(label) => format!("other:{}", label),
    }
}

fn normalize_enum_token(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}
