use crate::error::{is_unique_violation, Result, StoreError};
use crate::repo::{date_from_sql, date_to_sql};
use chrono::NaiveDate;
use leadline_core::domain::{ensure_normalized_phone, Lead, LeadId, LeadStatus, LeadTemperature};
use leadline_core::rules::{next_state, validate_note, validate_page, validate_soon_days, LeadEvent};
use rusqlite::{params, Connection};
use std::str::FromStr;

/// Input to the reconciliation engine. `phone` must already be normalized
/// and `name`/`email` validated by the intake path.
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
    pub source: String,
    pub brochure_request: bool,
}

pub struct LeadsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> LeadsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Finds-or-creates the canonical lead for a phone number and applies
    /// the merge and state rules for the triggering self-serve event.
    /// At most one lead row is inserted or updated per call.
    pub fn reconcile(&self, now_utc: i64, request: ReconcileRequest) -> Result<Lead> {
        if self.conn.is_autocommit() {
            let tx = self.conn.unchecked_transaction()?;
            let lead = reconcile_inner(&tx, now_utc, &request)?;
            tx.commit()?;
            Ok(lead)
        } else {
            reconcile_inner(self.conn, now_utc, &request)
        }
    }

    pub fn get(&self, id: LeadId) -> Result<Option<Lead>> {
        get_inner(self.conn, id)
    }

    pub fn find_by_phone(&self, phone: &str) -> Result<Option<Lead>> {
        find_by_phone_inner(self.conn, phone)
    }

    /// Lead pool listing. Leads with an upcoming follow-up sort first so the
    /// list doubles as the outreach queue.
    pub fn list(
        &self,
        status: Option<LeadStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lead>> {
        validate_page(limit, offset).map_err(StoreError::Core)?;

        let mut sql = String::from(
            "SELECT id, phone, name, email, lead_source, lead_status, lead_temperature, last_contact_date, next_action_date, notes, created_at, updated_at
             FROM leads",
        );
        if status.is_some() {
            sql.push_str(" WHERE lead_status = ?3");
        }
        sql.push_str(
            " ORDER BY (next_action_date IS NULL) ASC, next_action_date ASC, created_at ASC
             LIMIT ?1 OFFSET ?2;",
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut leads = Vec::new();
        let mut rows = match status {
            Some(status) => stmt.query(params![limit, offset, status.as_str()])?,
            None => stmt.query(params![limit, offset])?,
        };
        while let Some(row) = rows.next()? {
            leads.push(lead_from_row(row)?);
        }
        Ok(leads)
    }

    /// Follow-up worklist: every lead whose `next_action_date` falls on or
    /// before `today + soon_days`, overdue first.
    pub fn worklist(&self, today: NaiveDate, soon_days: i64) -> Result<Vec<Lead>> {
        let soon_days = validate_soon_days(soon_days).map_err(StoreError::Core)?;
        let soon_end = today + chrono::Duration::days(soon_days);
        let mut stmt = self.conn.prepare(
            "SELECT id, phone, name, email, lead_source, lead_status, lead_temperature, last_contact_date, next_action_date, notes, created_at, updated_at
             FROM leads
             WHERE next_action_date IS NOT NULL
               AND next_action_date <= ?1
             ORDER BY next_action_date ASC, name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([date_to_sql(Some(soon_end))])?;
        let mut leads = Vec::new();
        while let Some(row) = rows.next()? {
            leads.push(lead_from_row(row)?);
        }
        Ok(leads)
    }

    /// Staff pipeline update: the only path that moves a lead to
    /// Converted/Lost (self-serve events never change a non-New status).
    pub fn set_status(&self, now_utc: i64, id: LeadId, status: LeadStatus) -> Result<Lead> {
        let updated = self.conn.execute(
            "UPDATE leads SET lead_status = ?2, updated_at = ?3 WHERE id = ?1;",
            params![id.to_string(), status.as_str(), now_utc],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        get_inner(self.conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn set_notes(&self, now_utc: i64, id: LeadId, notes: &str) -> Result<Lead> {
        let notes = validate_note(notes).map_err(StoreError::Core)?;
        let notes = if notes.is_empty() { None } else { Some(notes) };
        let updated = self.conn.execute(
            "UPDATE leads SET notes = ?2, updated_at = ?3 WHERE id = ?1;",
            params![id.to_string(), notes, now_utc],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        get_inner(self.conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Explicit deletion only; interaction history keeps a NULL `lead_id`.
    pub fn delete(&self, id: LeadId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM leads WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

pub(crate) fn reconcile_inner(
    conn: &Connection,
    now_utc: i64,
    request: &ReconcileRequest,
) -> Result<Lead> {
    ensure_normalized_phone(&request.phone).map_err(StoreError::Core)?;

    let event = if request.brochure_request {
        LeadEvent::BrochureRequested
    } else {
        LeadEvent::QuerySubmitted
    };

    if let Some(lead) = find_by_phone_inner(conn, &request.phone)? {
        return merge_inner(conn, now_utc, lead, request, &event);
    }

    match insert_inner(conn, now_utc, request, &event) {
        Ok(lead) => Ok(lead),
        // Two first-touch requests can race on the phone UNIQUE constraint;
        // the loser retries as a merge against the committed row.
        Err(StoreError::Sql(err)) if is_unique_violation(&err) => {
            match find_by_phone_inner(conn, &request.phone)? {
                Some(lead) => merge_inner(conn, now_utc, lead, request, &event),
                None => Err(StoreError::Conflict(format!(
                    "lead insert raced for phone {}",
                    request.phone
                ))),
            }
        }
        Err(err) => Err(err),
    }
}

fn insert_inner(
    conn: &Connection,
    now_utc: i64,
    request: &ReconcileRequest,
    event: &LeadEvent,
) -> Result<Lead> {
    // A fresh lead starts at New/Cold; the triggering event runs through the
    // same transition table as every later touch.
    let next = next_state(LeadStatus::New, LeadTemperature::Cold, None, event);

    let lead = Lead {
        id: LeadId::new(),
        phone: request.phone.clone(),
        name: request.name.clone(),
        email: request.email.clone(),
        lead_source: request.source.clone(),
        status: next.status,
        temperature: next.temperature,
        last_contact_date: None,
        next_action_date: next.next_action_date,
        notes: None,
        created_at: now_utc,
        updated_at: now_utc,
    };

    lead.validate()?;

    conn.execute(
        "INSERT INTO leads (id, phone, name, email, lead_source, lead_status, lead_temperature, last_contact_date, next_action_date, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
        params![
            lead.id.to_string(),
            lead.phone,
            lead.name,
            lead.email,
            lead.lead_source,
            lead.status.as_str(),
            lead.temperature.as_str(),
            date_to_sql(lead.last_contact_date),
            date_to_sql(lead.next_action_date),
            lead.notes,
            lead.created_at,
            lead.updated_at,
        ],
    )?;

    Ok(lead)
}

fn merge_inner(
    conn: &Connection,
    now_utc: i64,
    mut lead: Lead,
    request: &ReconcileRequest,
    event: &LeadEvent,
) -> Result<Lead> {
    // Merge-if-different: a known name or email is never nulled out, and
    // lead_source keeps the true first-touch channel (the UPDATE below never
    // references it).
    if request.name != lead.name {
        lead.name = request.name.clone();
    }
    if let Some(email) = request.email.as_deref() {
        if lead.email.as_deref() != Some(email) {
            lead.email = Some(email.to_string());
        }
    }

    let next = next_state(lead.status, lead.temperature, lead.next_action_date, event);
    lead.status = next.status;
    lead.temperature = next.temperature;
    lead.next_action_date = next.next_action_date;
    lead.updated_at = now_utc;

    lead.validate()?;

    conn.execute(
        "UPDATE leads
         SET name = ?2, email = ?3, lead_status = ?4, lead_temperature = ?5, next_action_date = ?6, updated_at = ?7
         WHERE id = ?1;",
        params![
            lead.id.to_string(),
            lead.name,
            lead.email,
            lead.status.as_str(),
            lead.temperature.as_str(),
            date_to_sql(lead.next_action_date),
            lead.updated_at,
        ],
    )?;

    Ok(lead)
}

pub(crate) fn get_inner(conn: &Connection, id: LeadId) -> Result<Option<Lead>> {
    let mut stmt = conn.prepare(
        "SELECT id, phone, name, email, lead_source, lead_status, lead_temperature, last_contact_date, next_action_date, notes, created_at, updated_at
         FROM leads WHERE id = ?1;",
    )?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(lead_from_row(row)?))
    } else {
        Ok(None)
    }
}

pub(crate) fn find_by_phone_inner(conn: &Connection, phone: &str) -> Result<Option<Lead>> {
    let mut stmt = conn.prepare(
        "SELECT id, phone, name, email, lead_source, lead_status, lead_temperature, last_contact_date, next_action_date, notes, created_at, updated_at
         FROM leads WHERE phone = ?1;",
    )?;
    let mut rows = stmt.query([phone])?;
    if let Some(row) = rows.next()? {
        Ok(Some(lead_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn lead_from_row(row: &rusqlite::Row<'_>) -> Result<Lead> {
    let id_str: String = row.get(0)?;
    let id = LeadId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let status_raw: String = row.get(5)?;
    let status = LeadStatus::parse(&status_raw)
        .ok_or_else(|| StoreError::InvalidId(status_raw.clone()))?;
    let temperature_raw: String = row.get(6)?;
    let temperature = LeadTemperature::parse(&temperature_raw)
        .ok_or_else(|| StoreError::InvalidId(temperature_raw.clone()))?;
    Ok(Lead {
        id,
        phone: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        lead_source: row.get(4)?,
        status,
        temperature,
        last_contact_date: date_from_sql(row.get(7)?)?,
        next_action_date: date_from_sql(row.get(8)?)?,
        notes: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}
