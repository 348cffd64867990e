use crate::error::{Result, StoreError};
use crate::repo::interactions::record_inner;
use crate::repo::leads::{reconcile_inner, ReconcileRequest};
use crate::repo::listings;
use crate::repo::InteractionNew;
use leadline_core::domain::{
    normalize_email, normalize_phone, Interaction, InteractionKind, Lead, ListingId,
    BROCHURE_SOURCE,
};
use leadline_core::rules::{validate_name, validate_note};
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct BrochureRequestNew {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub listing_id: ListingId,
}

#[derive(Debug, Clone)]
pub struct QueryNew {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub source: String,
    pub listing_id: Option<ListingId>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub lead: Lead,
    pub interaction: Interaction,
    pub brochure_url: Option<String>,
}

/// Public intake paths. Each operation runs as one transaction spanning the
/// lead upsert and the interaction append; both commit or neither does.
pub struct IntakeRepo<'a> {
    conn: &'a Connection,
}

impl<'a> IntakeRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Brochure download: validates the listing and its brochure before any
    /// write, then reconciles the lead and records the interaction.
    pub fn brochure_request(
        &self,
        now_utc: i64,
        request: BrochureRequestNew,
    ) -> Result<IntakeOutcome> {
        let phone = normalize_phone(&request.phone).map_err(StoreError::Core)?;
        let name = validate_name(&request.name).map_err(StoreError::Core)?;
        let email = match request.email.as_deref() {
            Some(raw) => normalize_email(raw).map_err(StoreError::Core)?,
            None => None,
        };

        let listing = listings::get_inner(self.conn, request.listing_id)?
            .ok_or_else(|| StoreError::NotFound(format!("listing {}", request.listing_id)))?;
        let brochure_url = listing.brochure_url.clone().ok_or_else(|| {
            StoreError::NotFound(format!("no brochure available for listing {}", listing.id))
        })?;

        let tx = self.conn.unchecked_transaction()?;
        let lead = reconcile_inner(
            &tx,
            now_utc,
            &ReconcileRequest {
                phone: phone.clone(),
                name,
                email,
                source: BROCHURE_SOURCE.to_string(),
                brochure_request: true,
            },
        )?;
        let interaction = record_inner(
            &tx,
            now_utc,
            InteractionNew {
                lead_id: Some(lead.id),
                phone,
                listing_id: Some(listing.id),
                kind: InteractionKind::Brochure,
                source: Some(BROCHURE_SOURCE.to_string()),
                message: None,
                caller_id: None,
                next_action: None,
                next_follow_up_date: None,
                site_visit_status: None,
            },
        )?;
        tx.commit()?;

        Ok(IntakeOutcome {
            lead,
            interaction,
            brochure_url: Some(brochure_url),
        })
    }

    /// Contact-form query: the listing reference is optional, and a stale
    /// one degrades to a general inquiry instead of failing.
    pub fn submit_query(&self, now_utc: i64, request: QueryNew) -> Result<IntakeOutcome> {
        let phone = normalize_phone(&request.phone).map_err(StoreError::Core)?;
        let name = validate_name(&request.name).map_err(StoreError::Core)?;
        let email = match request.email.as_deref() {
            Some(raw) => normalize_email(raw).map_err(StoreError::Core)?,
            None => None,
        };
        let message = match request.message.as_deref() {
            Some(raw) => {
                let cleaned = validate_note(raw).map_err(StoreError::Core)?;
                if cleaned.is_empty() {
                    None
                } else {
                    Some(cleaned)
                }
            }
            None => None,
        };

        let tx = self.conn.unchecked_transaction()?;
        let lead = reconcile_inner(
            &tx,
            now_utc,
            &ReconcileRequest {
                phone: phone.clone(),
                name,
                email,
                source: request.source.clone(),
                brochure_request: false,
            },
        )?;
        let interaction = record_inner(
            &tx,
            now_utc,
            InteractionNew {
                lead_id: Some(lead.id),
                phone,
                listing_id: request.listing_id,
                kind: InteractionKind::Query,
                source: Some(request.source),
                message,
                caller_id: None,
                next_action: None,
                next_follow_up_date: None,
                site_visit_status: None,
            },
        )?;
        tx.commit()?;

        Ok(IntakeOutcome {
            lead,
            interaction,
            brochure_url: None,
        })
    }
}
