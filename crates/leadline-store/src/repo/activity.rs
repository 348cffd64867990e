use crate::error::{Result, StoreError};
use crate::repo::interactions::record_inner;
use crate::repo::leads::find_by_phone_inner;
use crate::repo::{date_to_sql, InteractionNew};
use chrono::NaiveDate;
use leadline_core::domain::{normalize_phone, Interaction, InteractionKind, StaffId};
use leadline_core::rules::{next_state, validate_note, LeadEvent};
use leadline_core::time::utc_date;
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct ActivityNew {
    pub phone: String,
    pub kind: InteractionKind,
    pub notes: String,
    pub next_action: Option<String>,
    pub next_follow_up_date: Option<NaiveDate>,
    pub site_visit_status: Option<String>,
}

/// Staff-side ledger. Unlike the self-serve intake paths this never creates
/// a lead: activity always targets a known record.
pub struct ActivityRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ActivityRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn log(&self, now_utc: i64, staff_id: StaffId, input: ActivityNew) -> Result<Interaction> {
        let phone = normalize_phone(&input.phone).map_err(StoreError::Core)?;
        let notes = validate_note(&input.notes).map_err(StoreError::Core)?;

        let tx = self.conn.unchecked_transaction()?;

        let lead = find_by_phone_inner(&tx, &phone)?.ok_or_else(|| {
            StoreError::NotFound(format!(
                "no lead with phone {}; create the lead first",
                phone
            ))
        })?;

        let event = LeadEvent::ActivityLogged {
            kind: input.kind.clone(),
            follow_up: input.next_follow_up_date,
        };
        let next = next_state(lead.status, lead.temperature, lead.next_action_date, &event);
        let today = utc_date(now_utc);

        tx.execute(
            "UPDATE leads
             SET lead_status = ?2, lead_temperature = ?3, last_contact_date = ?4, next_action_date = ?5, updated_at = ?6
             WHERE id = ?1;",
            params![
                lead.id.to_string(),
                next.status.as_str(),
                next.temperature.as_str(),
                date_to_sql(Some(today)),
                date_to_sql(next.next_action_date),
                now_utc,
            ],
        )?;

        let interaction = record_inner(
            &tx,
            now_utc,
            InteractionNew {
                lead_id: Some(lead.id),
                phone,
                listing_id: None,
                kind: input.kind,
                source: None,
                message: Some(notes),
                caller_id: Some(staff_id),
                next_action: input.next_action,
                next_follow_up_date: input.next_follow_up_date,
                site_visit_status: input.site_visit_status,
            },
        )?;

        tx.commit()?;
        Ok(interaction)
    }
}
