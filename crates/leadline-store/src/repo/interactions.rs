use crate::error::{Result, StoreError};
use crate::repo::{date_from_sql, date_to_sql};
use leadline_core::domain::{
    Interaction, InteractionId, InteractionKind, LeadId, ListingId, StaffId, GENERAL_INQUIRY,
};
use leadline_core::rules::validate_page;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct InteractionNew {
    pub lead_id: Option<LeadId>,
    pub phone: String,
    pub listing_id: Option<ListingId>,
    pub kind: InteractionKind,
    pub source: Option<String>,
    pub message: Option<String>,
    pub caller_id: Option<StaffId>,
    pub next_action: Option<String>,
    pub next_follow_up_date: Option<chrono::NaiveDate>,
    pub site_visit_status: Option<String>,
}

pub struct InteractionsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> InteractionsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Appends one immutable interaction. The listing title is snapshotted
    /// here so history keeps displaying correctly after catalog edits.
    pub fn record(&self, now_utc: i64, input: InteractionNew) -> Result<Interaction> {
        record_inner(self.conn, now_utc, input)
    }

    pub fn list_for_lead(
        &self,
        lead_id: LeadId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Interaction>> {
        validate_page(limit, offset).map_err(StoreError::Core)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, lead_id, phone, listing_id, kind, source, message, property_name, caller_id, next_action, next_follow_up_date, site_visit_status, created_at
             FROM interactions
             WHERE lead_id = ?1
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?2 OFFSET ?3;",
        )?;
        let mut rows = stmt.query(params![lead_id.to_string(), limit, offset])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(interaction_from_row(row)?);
        }
        Ok(items)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM interactions;", [], |row| row.get(0))?;
        Ok(count)
    }
}

pub(crate) fn record_inner(
    conn: &Connection,
    now_utc: i64,
    input: InteractionNew,
) -> Result<Interaction> {
    // Snapshot the listing title at write time. A reference that no longer
    // resolves is stored as a general inquiry rather than blocking the
    // append.
    let (listing_id, property_name) = match input.listing_id {
        Some(listing_id) => match listing_title_inner(conn, listing_id)? {
            Some(title) => (Some(listing_id), title),
            None => (None, GENERAL_INQUIRY.to_string()),
        },
        None => (None, GENERAL_INQUIRY.to_string()),
    };

    let interaction = Interaction {
        id: InteractionId::new(),
        lead_id: input.lead_id,
        phone: input.phone,
        listing_id,
        kind: input.kind,
        source: input.source,
        message: input.message,
        property_name,
        caller_id: input.caller_id,
        next_action: input.next_action,
        next_follow_up_date: input.next_follow_up_date,
        site_visit_status: input.site_visit_status,
        created_at: now_utc,
    };

    conn.execute(
        "INSERT INTO interactions (id, lead_id, phone, listing_id, kind, source, message, property_name, caller_id, next_action, next_follow_up_date, site_visit_status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13);",
        params![
            interaction.id.to_string(),
            interaction.lead_id.map(|id| id.to_string()),
            interaction.phone,
            interaction.listing_id.map(|id| id.to_string()),
            serialize_kind(&interaction.kind)?,
            interaction.source,
            interaction.message,
            interaction.property_name,
            interaction.caller_id.map(|id| id.as_i64()),
            interaction.next_action,
            date_to_sql(interaction.next_follow_up_date),
            interaction.site_visit_status,
            interaction.created_at,
        ],
    )?;

    Ok(interaction)
}

fn listing_title_inner(conn: &Connection, listing_id: ListingId) -> Result<Option<String>> {
    let title: Option<String> = conn
        .query_row(
            "SELECT title FROM listings WHERE id = ?1;",
            [listing_id.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(title)
}

pub(crate) fn serialize_kind(kind: &InteractionKind) -> Result<String> {
    match kind {
        InteractionKind::Brochure => Ok("brochure".to_string()),
        InteractionKind::Query => Ok("query".to_string()),
        InteractionKind::Call => Ok("call".to_string()),
        InteractionKind::SiteVisit => Ok("site_visit".to_string()),
        InteractionKind::Meeting => Ok("meeting".to_string()),
        InteractionKind::Email => Ok("email".to_string()),
        InteractionKind::Other(label) => {
            let trimmed = label.trim();
            if trimmed.is_empty() {
                return Err(StoreError::InvalidInteractionKind(label.clone()));
            }
            Ok(format!("other:{}", trimmed.to_ascii_lowercase()))
        }
    }
}

pub(crate) fn parse_kind(raw: &str) -> Result<InteractionKind> {
    match raw {
        "brochure" => Ok(InteractionKind::Brochure),
        "query" => Ok(InteractionKind::Query),
        "call" => Ok(InteractionKind::Call),
        "site_visit" => Ok(InteractionKind::SiteVisit),
        "meeting" => Ok(InteractionKind::Meeting),
        "email" => Ok(InteractionKind::Email),
        _ => {
            if let Some(rest) = raw.strip_prefix("other:") {
                if rest.trim().is_empty() {
                    return Err(StoreError::InvalidInteractionKind(raw.to_string()));
                }
                return Ok(InteractionKind::Other(rest.trim().to_ascii_lowercase()));
            }
            Err(StoreError::InvalidInteractionKind(raw.to_string()))
        }
    }
}

fn interaction_from_row(row: &rusqlite::Row<'_>) -> Result<Interaction> {
    let id_str: String = row.get(0)?;
    let id =
        InteractionId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let lead_id = match row.get::<_, Option<String>>(1)? {
        Some(raw) => {
            Some(LeadId::from_str(&raw).map_err(|_| StoreError::InvalidId(raw.clone()))?)
        }
        None => None,
    };
    let listing_id = match row.get::<_, Option<String>>(3)? {
        Some(raw) => {
            Some(ListingId::from_str(&raw).map_err(|_| StoreError::InvalidId(raw.clone()))?)
        }
        None => None,
    };
    let kind_raw: String = row.get(4)?;
    let kind = parse_kind(&kind_raw)?;
    Ok(Interaction {
        id,
        lead_id,
        phone: row.get(2)?,
        listing_id,
        kind,
        source: row.get(5)?,
        message: row.get(6)?,
        property_name: row.get(7)?,
        caller_id: row.get::<_, Option<i64>>(8)?.map(StaffId),
        next_action: row.get(9)?,
        next_follow_up_date: date_from_sql(row.get(10)?)?,
        site_visit_status: row.get(11)?,
        created_at: row.get(12)?,
    })
}
